//! Print generated source.

use std::path::PathBuf;

use jadevdom_compiler::{CompileOptions, Compiler};

use super::loader::load_document;

pub struct CompileArgs {
    pub ast_path: PathBuf,
    pub pretty: bool,
    pub instructions: bool,
}

pub fn run(args: CompileArgs) {
    match execute(&args) {
        Ok(output) => println!("{output}"),
        Err(msg) => super::fail(msg),
    }
}

pub fn execute(args: &CompileArgs) -> Result<String, String> {
    let document = load_document(&args.ast_path).map_err(|e| format!("error: {e}"))?;

    let compiler = Compiler::with_options(CompileOptions::new().pretty(args.pretty));
    let compiled = compiler
        .compile(&document)
        .map_err(|e| format!("error: {e}"))?;

    if args.instructions {
        return Ok(compiled.append_instructions());
    }
    Ok(compiled.source())
}
