//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same definition is reused across commands with different visibility
//! (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Document AST file (positional, `-` for stdin).
pub fn ast_path_arg() -> Arg {
    Arg::new("ast_path")
        .value_name("AST")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Document AST as JSON (`-` reads stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Emit the body on a single line (--no-pretty).
pub fn no_pretty_arg() -> Arg {
    Arg::new("no_pretty")
        .long("no-pretty")
        .action(ArgAction::SetTrue)
        .help("Generate source without newlines or indentation")
}

/// Print append instructions instead of source (--instructions).
pub fn instructions_arg() -> Arg {
    Arg::new("instructions")
        .long("instructions")
        .action(ArgAction::SetTrue)
        .help("Print one `buf.push(..)` instruction per emitted fragment")
}

/// Locals file (--locals).
pub fn locals_path_arg() -> Arg {
    Arg::new("locals_path")
        .long("locals")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("locals_text")
        .help("Locals object as a JSON file (`-` reads stdin)")
}

/// Inline locals (-L/--locals-json).
pub fn locals_text_arg() -> Arg {
    Arg::new("locals_text")
        .short('L')
        .long("locals-json")
        .value_name("JSON")
        .help("Inline locals object")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Execution fuel limit")
}

/// Print evaluation trace to stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print an evaluation trace to stderr")
}

/// Verbosity level (-v, -vv). Implies --trace.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace verbosity (-v for verbose, -vv for very verbose)")
}
