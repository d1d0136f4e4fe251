//! Tracing infrastructure for debugging template evaluation.
//!
//! # Design: Zero-Cost Abstraction
//!
//! With `NoopTracer` every hook is an `#[inline(always)]` empty function, so
//! the calls and their arguments compile away. No tracing state lives in the
//! interpreter itself; `PrintTracer` keeps whatever it needs for display.

use jadevdom_core::Colors;

use super::value::Value;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Default: branches, iterations and calls.
    #[default]
    Default,
    /// Verbose (-v): adds assignments, loop items and the result.
    Verbose,
    /// Very verbose (-vv): adds the values involved.
    VeryVerbose,
}

/// Hooks called by the interpreter at fixed points.
///
/// - `trace_branch` - after a ternary test, with the branch taken
/// - `trace_iterate` - when the iteration helper starts a loop
/// - `trace_item` - before each loop item, with its index or key
/// - `trace_call` - when entering a function or builtin method
/// - `trace_assign` - after an assignment
/// - `trace_result` - once, with the value of the whole body
pub trait Tracer {
    fn trace_branch(&mut self, taken: bool);

    fn trace_iterate(&mut self, len: usize);

    fn trace_item(&mut self, key: &Value);

    fn trace_call(&mut self, name: &str);

    fn trace_assign(&mut self, name: &str, value: &Value);

    fn trace_result(&mut self, value: &Value);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_branch(&mut self, _taken: bool) {}

    #[inline(always)]
    fn trace_iterate(&mut self, _len: usize) {}

    #[inline(always)]
    fn trace_item(&mut self, _key: &Value) {}

    #[inline(always)]
    fn trace_call(&mut self, _name: &str) {}

    #[inline(always)]
    fn trace_assign(&mut self, _name: &str, _value: &Value) {}

    #[inline(always)]
    fn trace_result(&mut self, _value: &Value) {}
}

/// Tracer that collects one line per event.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn shows(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    fn add_line(&mut self, event: &str, detail: String) {
        let c = self.colors;
        self.lines
            .push(format!("{}{event:>7}{} {detail}", c.dim, c.reset));
    }

    fn name(&self, name: &str) -> String {
        format!("{}{name}{}", self.colors.blue, self.colors.reset)
    }

    fn value(&self, value: &Value) -> String {
        format!("{}{}{}", self.colors.green, value.to_json(), self.colors.reset)
    }
}

impl Tracer for PrintTracer {
    fn trace_branch(&mut self, taken: bool) {
        let branch = if taken { "then" } else { "else" };
        self.add_line("branch", branch.to_owned());
    }

    fn trace_iterate(&mut self, len: usize) {
        let noun = if len == 1 { "item" } else { "items" };
        self.add_line("iterate", format!("{len} {noun}"));
    }

    fn trace_item(&mut self, key: &Value) {
        if !self.shows(Verbosity::Verbose) {
            return;
        }
        let key = self.value(key);
        self.add_line("item", key);
    }

    fn trace_call(&mut self, name: &str) {
        let name = self.name(name);
        self.add_line("call", name);
    }

    fn trace_assign(&mut self, name: &str, value: &Value) {
        if !self.shows(Verbosity::Verbose) {
            return;
        }
        let mut detail = self.name(name);
        if self.shows(Verbosity::VeryVerbose) {
            detail = format!("{detail} = {}", self.value(value));
        }
        self.add_line("assign", detail);
    }

    fn trace_result(&mut self, value: &Value) {
        if !self.shows(Verbosity::Verbose) {
            return;
        }
        let detail = if self.shows(Verbosity::VeryVerbose) {
            self.value(value)
        } else {
            value.type_of().to_owned()
        };
        self.add_line("result", detail);
    }
}
