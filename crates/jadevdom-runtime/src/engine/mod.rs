//! Materialization and evaluation of generated template bodies.
//!
//! A body is lexed and parsed once into an expression tree (`Template`),
//! then evaluated per render against a locals object, producing a `VNode`.

mod ast;
mod error;
mod eval;
mod format;
mod lexer;
mod parser;
mod scope;
mod stack;
mod template;
mod trace;
mod value;
mod vnode;

#[cfg(test)]
mod template_tests;
#[cfg(test)]
mod vnode_tests;

pub use ast::{BinaryOp, Expr, FunctionExpr, LogicalOp, Program, UnaryOp};
pub use error::{MaterializeError, RuntimeError};
pub use eval::FuelLimits;
pub use format::format_json;
pub use lexer::{Token, TokenKind, lex};
pub use parser::{ParseLimits, parse_expression, parse_program};
pub use template::Template;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::{Function, Method, Value};
pub use vnode::{Element, VNode};
