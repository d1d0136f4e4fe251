//! Errors that abort a compilation.

/// Compilation failure. No partial output is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The document contains a node variant with no handler.
    #[error("unsupported node kind `{0}`")]
    UnsupportedNodeKind(String),

    /// An `else` or `else if` with no open conditional right before it.
    #[error("`{0}` without a preceding `if`")]
    AmbiguousElse(String),

    /// The document is nested deeper than the configured limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
