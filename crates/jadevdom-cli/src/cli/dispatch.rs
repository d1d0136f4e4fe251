//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs are populated from clap, ignoring hidden flags
//! - `Into<*Args>` impls resolve terminal-dependent defaults for the handlers

use std::path::PathBuf;

use clap::ArgMatches;
use jadevdom_runtime::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::render::RenderArgs;

pub struct CompileParams {
    pub ast_path: PathBuf,
    pub no_pretty: bool,
    pub instructions: bool,
    // Note: --color and render flags are parsed but not extracted
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ast_path: ast_path(m),
            no_pretty: m.get_flag("no_pretty"),
            instructions: m.get_flag("instructions"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            ast_path: p.ast_path,
            pretty: !p.no_pretty,
            instructions: p.instructions,
        }
    }
}

pub struct CheckParams {
    pub ast_path: PathBuf,
    pub color: ColorChoice,
    // Note: generation and render flags are parsed but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ast_path: ast_path(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            ast_path: p.ast_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RenderParams {
    pub ast_path: PathBuf,
    pub locals_path: Option<PathBuf>,
    pub locals_text: Option<String>,
    pub compact: bool,
    pub fuel: u32,
    pub trace: bool,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ast_path: ast_path(m),

            // Locals
            locals_path: m.get_one::<PathBuf>("locals_path").cloned(),
            locals_text: m.get_one::<String>("locals_text").cloned(),

            // Output and trace options
            compact: m.get_flag("compact"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
            trace: m.get_flag("trace"),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            ast_path: p.ast_path,
            locals_path: p.locals_path,
            locals_text: p.locals_text,
            pretty,
            fuel: p.fuel,
            trace: trace_verbosity(p.trace, p.verbose),
            color: p.color.should_colorize(),
        }
    }
}

/// `-v` implies `--trace`.
pub(super) fn trace_verbosity(trace: bool, verbose: u8) -> Option<Verbosity> {
    match verbose {
        0 if !trace => None,
        0 => Some(Verbosity::Default),
        1 => Some(Verbosity::Verbose),
        _ => Some(Verbosity::VeryVerbose),
    }
}

fn ast_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("ast_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
