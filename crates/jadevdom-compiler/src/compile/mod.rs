//! Template document to virtual-node source compilation.
//!
//! A document tree is walked once, depth first, and emitted into an ordered
//! fragment buffer whose concatenation is a function body `return <expr>;`.
//!
//! # Module Organization
//!
//! - `state`: per-call fragment buffer, indentation and chain flags
//! - `visit`: node dispatch plus block, text, tag and comment handlers
//! - `attributes`: class / data / attributes / key bucketing
//! - `conditional`: flat `if`/`else` chains and structural conditionals
//! - `iteration`: `each` loops over the iteration helper
//! - `output`: the compiled template and its renderings

mod attributes;
mod compiler;
mod conditional;
mod error;
mod iteration;
mod output;
mod state;
mod visit;

#[cfg(test)]
mod attributes_tests;
#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod render_tests;

pub use compiler::{CompileOptions, Compiler, compile};
pub use error::{CompileError, CompileResult};
pub use output::CompiledTemplate;
