//! Runtime for jadevdom generated source.
//!
//! Turns the body produced by `jadevdom-compiler` into an invocable
//! [`Template`] and renders it against caller-supplied locals.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod engine;

pub use diagnostics::SnippetPrinter;
pub use engine::{
    Element, FuelLimits, MaterializeError, NoopTracer, ParseLimits, PrintTracer, RuntimeError,
    Template, Tracer, VNode, Value, Verbosity,
};
