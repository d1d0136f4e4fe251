//! Errors raised while materializing or rendering a template.

use std::ops::Range;

/// The generated body could not be turned into an invocable template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterializeError {
    /// The body does not conform to the expression grammar.
    #[error("malformed expression: {message}")]
    MalformedExpression { message: String, span: Range<usize> },

    /// Expressions are nested deeper than the parser limit.
    #[error("expression nesting limit exceeded")]
    RecursionLimitExceeded,
}

impl MaterializeError {
    pub(crate) fn malformed(message: impl Into<String>, span: Range<usize>) -> Self {
        MaterializeError::MalformedExpression {
            message: message.into(),
            span,
        }
    }

    /// Byte span into the materialized source, when the error has one.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            MaterializeError::MalformedExpression { span, .. } => Some(span.clone()),
            MaterializeError::RecursionLimitExceeded => None,
        }
    }
}

/// Rendering failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Execution fuel exhausted (too many evaluation steps).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    /// Too many nested function calls.
    #[error("runtime recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("type error: {0}")]
    TypeError(String),

    /// Locals must be a JSON object (or null for none).
    #[error("locals must be an object")]
    InvalidLocals,

    /// The body evaluated to something other than a virtual node.
    #[error("invalid virtual node: {0}")]
    InvalidNode(String),
}
