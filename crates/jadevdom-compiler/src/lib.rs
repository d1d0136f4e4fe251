//! jadevdom compiler: template document tree to virtual-node source.
//!
//! The output of [`Compiler::compile`] is the body of a function of one
//! `locals` argument; evaluating it (see `jadevdom-runtime`) yields the
//! VirtualNode tree the document describes.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;

#[cfg(test)]
pub mod test_utils;

pub use compile::{CompileError, CompileOptions, CompileResult, CompiledTemplate, Compiler, compile};
