//! Command builders for the CLI.
//!
//! All subcommands accept the full flag set so switching between `compile`,
//! `check` and `render` never trips over a leftover flag; flags a command
//! ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden generation args (for commands that print no source).
fn with_hidden_compile_args(cmd: Command) -> Command {
    cmd.arg(no_pretty_arg().hide(true))
        .arg(instructions_arg().hide(true))
}

/// Add hidden render args (for commands that do not render).
fn with_hidden_render_args(cmd: Command) -> Command {
    cmd.arg(locals_path_arg().hide(true))
        .arg(locals_text_arg().hide(true))
        .arg(compact_arg().hide(true))
        .arg(fuel_arg().hide(true))
        .arg(trace_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("jadevdom")
        .about("Compile template documents into virtual-node trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(render_command())
}

/// Print the generated function body.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Print the generated source for a document")
        .after_help(
            r#"EXAMPLES:
  jadevdom compile page.json                 # pretty body
  jadevdom compile page.json --no-pretty     # single line
  jadevdom compile page.json --instructions  # buf.push(..) form
  cat page.json | jadevdom compile -         # from stdin"#,
        )
        .arg(ast_path_arg())
        .arg(no_pretty_arg())
        .arg(instructions_arg())
        .arg(color_arg());

    with_hidden_render_args(cmd)
}

/// Compile and materialize without rendering.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate that a document compiles to well-formed source")
        .after_help(
            r#"EXAMPLES:
  jadevdom check page.json           # silent on success
  jadevdom check page.json --color never"#,
        )
        .arg(ast_path_arg())
        .arg(color_arg());

    with_hidden_render_args(with_hidden_compile_args(cmd))
}

/// Render a document against locals and print the virtual node.
pub fn render_command() -> Command {
    let cmd = Command::new("render")
        .about("Render a document against locals and output JSON")
        .after_help(
            r#"EXAMPLES:
  jadevdom render page.json --locals data.json
  jadevdom render page.json -L '{"items": [1, 2]}'
  jadevdom render page.json -L '{}' --trace -vv
  jadevdom render page.json --fuel 1000 --compact"#,
        )
        .arg(ast_path_arg())
        .arg(locals_path_arg())
        .arg(locals_text_arg())
        .arg(compact_arg())
        .arg(fuel_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_hidden_compile_args(cmd)
}
