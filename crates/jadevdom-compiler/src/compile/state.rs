//! Per-call emission state: the fragment buffer plus traversal flags.

use super::compiler::CompileOptions;
use super::error::CompileError;

const INDENT: &str = "  ";

/// Append-only fragment buffer with indentation depth and chain flags.
///
/// Created fresh by every `Compiler::compile` call and consumed into the
/// output, so nothing leaks between compilations.
pub(super) struct CompileState {
    buf: Vec<String>,
    depth: usize,
    nesting: u32,
    pretty: bool,
    recursion_limit: u32,
    /// An `iterate` call was emitted; the helper must be prepended.
    pub(super) needs_iteration_helper: bool,
    /// A ternary is open and waits for its false branch.
    pub(super) expect_pending_branch: bool,
    /// The next fragment continues the current line.
    pub(super) suppress_next_indent: bool,
}

impl CompileState {
    pub(super) fn new(options: &CompileOptions) -> Self {
        Self {
            buf: Vec::new(),
            depth: 0,
            nesting: 0,
            pretty: options.pretty,
            recursion_limit: options.recursion_limit,
            needs_iteration_helper: false,
            expect_pending_branch: false,
            suppress_next_indent: false,
        }
    }

    pub(super) fn push(&mut self, fragment: impl Into<String>) {
        self.buf.push(fragment.into());
    }

    /// Indentation for a fragment that starts a node.
    ///
    /// Returns nothing (and clears the flag) when the node continues an
    /// already open line.
    pub(super) fn leading(&mut self) -> String {
        if self.suppress_next_indent {
            self.suppress_next_indent = false;
            return String::new();
        }
        self.margin()
    }

    /// Indentation at the current depth, ignoring the suppress flag.
    pub(super) fn margin(&self) -> String {
        if self.pretty {
            INDENT.repeat(self.depth)
        } else {
            String::new()
        }
    }

    /// Separator between sequence elements and object fields.
    pub(super) fn separator(&self) -> &'static str {
        if self.pretty { ",\n" } else { ", " }
    }

    pub(super) fn line_break(&self) -> &'static str {
        if self.pretty { "\n" } else { "" }
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(super) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Track one level of node nesting.
    pub(super) fn enter(&mut self) -> Result<(), CompileError> {
        if self.nesting >= self.recursion_limit {
            return Err(CompileError::RecursionLimitExceeded);
        }
        self.nesting += 1;
        Ok(())
    }

    pub(super) fn exit(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Close a dangling ternary with a synthetic false branch.
    ///
    /// Returns whether anything was emitted.
    pub(super) fn close_pending_branch(&mut self) -> bool {
        if !self.expect_pending_branch {
            return false;
        }
        self.push(" : undefined");
        self.expect_pending_branch = false;
        true
    }

    pub(super) fn into_fragments(self) -> Vec<String> {
        self.buf
    }
}

/// Quote text as a double-quoted string literal.
pub(super) fn quote(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
