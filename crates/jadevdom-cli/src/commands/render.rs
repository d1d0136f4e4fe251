//! Render a document against locals.

use std::path::PathBuf;

use jadevdom_compiler::compile;
use jadevdom_core::Colors;
use jadevdom_runtime::{FuelLimits, NoopTracer, PrintTracer, Template, VNode, Verbosity};

use super::loader::{load_document, load_locals};

pub struct RenderArgs {
    pub ast_path: PathBuf,
    pub locals_path: Option<PathBuf>,
    pub locals_text: Option<String>,
    pub pretty: bool,
    pub fuel: u32,
    /// Trace verbosity; `None` disables tracing.
    pub trace: Option<Verbosity>,
    pub color: bool,
}

/// Formatted node plus any trace lines collected on the way.
pub struct RenderOutput {
    pub json: String,
    pub trace: Vec<String>,
}

pub fn run(args: RenderArgs) {
    match execute(&args) {
        Ok(output) => {
            for line in &output.trace {
                eprintln!("{line}");
            }
            println!("{}", output.json);
        }
        Err(msg) => super::fail(msg),
    }
}

pub fn execute(args: &RenderArgs) -> Result<RenderOutput, String> {
    let document = load_document(&args.ast_path).map_err(|e| format!("error: {e}"))?;
    let locals = load_locals(
        args.locals_path.as_deref(),
        args.locals_text.as_deref(),
        &args.ast_path,
    )
    .map_err(|e| format!("error: {e}"))?;

    let compiled = compile(&document).map_err(|e| format!("error: {e}"))?;
    let source = compiled.source();
    let template = Template::materialize(&source).map_err(|err| {
        err.printer()
            .source(&source)
            .path("<generated>")
            .colored(args.color)
            .render()
    })?;

    let colors = Colors::new(args.color);
    let limits = FuelLimits::new().exec_fuel(args.fuel);
    let (vnode, trace) = match args.trace {
        Some(verbosity) => {
            let mut tracer = PrintTracer::new(verbosity, colors);
            let result = template.render_with(&locals, limits, &mut tracer);
            (result, tracer.lines().to_vec())
        }
        None => (template.render_with(&locals, limits, &mut NoopTracer), Vec::new()),
    };
    let vnode: VNode = vnode.map_err(|e| {
        let mut lines = trace.clone();
        lines.push(format!("error: {e}"));
        lines.join("\n")
    })?;

    Ok(RenderOutput {
        json: vnode.format(args.pretty, colors),
        trace,
    })
}
