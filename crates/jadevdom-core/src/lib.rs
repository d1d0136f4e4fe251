#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for jadevdom template documents.
//!
//! Two layers:
//! - **Document layer**: the immutable template AST produced by an external parser
//! - **Contract layer**: the iteration helper shared by the compiler and the runtime
//!
//! Plus the terminal color palette used by every presentation layer.

pub mod ast;
mod colors;
mod helper;
mod json;


pub use ast::{Attribute, Block, Code, Comment, Conditional, Each, Node, Tag, Text};
pub use colors::Colors;
pub use helper::{DEFAULT_NESTING_LIMIT, ITERATION_HELPER_NAME, ITERATION_HELPER_SOURCE};
pub use json::AstError;
