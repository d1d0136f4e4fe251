//! Compile and materialize a document without rendering it.

use std::path::PathBuf;

use jadevdom_compiler::compile;
use jadevdom_runtime::Template;

use super::loader::load_document;

pub struct CheckArgs {
    pub ast_path: PathBuf,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    if let Err(msg) = execute(&args) {
        super::fail(msg);
    }
    // Silent on success (like cargo check)
}

pub fn execute(args: &CheckArgs) -> Result<(), String> {
    let document = load_document(&args.ast_path).map_err(|e| format!("error: {e}"))?;
    let compiled = compile(&document).map_err(|e| format!("error: {e}"))?;

    let source = compiled.source();
    if let Err(err) = Template::materialize(&source) {
        return Err(err
            .printer()
            .source(&source)
            .path("<generated>")
            .colored(args.color)
            .render());
    }
    Ok(())
}
