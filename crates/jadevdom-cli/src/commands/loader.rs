//! Reading documents and locals from files, stdin, or inline text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use jadevdom_core::{AstError, Node};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("document and locals cannot both be read from stdin")]
    BothStdin,

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error("invalid locals JSON: {0}")]
    Locals(serde_json::Error),

    #[error("locals must be a JSON object")]
    LocalsNotObject,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, LoadError> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Load a document AST from parser JSON output.
pub fn load_document(path: &Path) -> Result<Node, LoadError> {
    let json = read_input(path)?;
    Ok(Node::from_json(&json)?)
}

/// Load the locals object. No locals at all means an empty object.
pub fn load_locals(
    locals_path: Option<&Path>,
    locals_text: Option<&str>,
    ast_path: &Path,
) -> Result<serde_json::Value, LoadError> {
    let text = match (locals_text, locals_path) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => {
            if is_stdin(path) && is_stdin(ast_path) {
                return Err(LoadError::BothStdin);
            }
            read_input(path)?
        }
        (None, None) => return Ok(serde_json::Value::Object(Default::default())),
    };

    let locals: serde_json::Value = serde_json::from_str(&text).map_err(LoadError::Locals)?;
    if !locals.is_object() {
        return Err(LoadError::LocalsNotObject);
    }
    Ok(locals)
}
