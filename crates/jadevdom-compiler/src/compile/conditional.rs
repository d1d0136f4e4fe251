//! Conditional chains and other embedded code.
//!
//! Flat parsers emit `if` / `else if` / `else` as adjacent `Code` siblings.
//! The chain is rebuilt as a nested ternary: an opening branch leaves
//! `expect_pending_branch` raised, the next sibling either continues the
//! chain (`else`) or forces a synthetic `: undefined` (see `visit`).
//! Structural `Conditional` nodes compile to the same shape directly.

use jadevdom_core::{Block, Code, Conditional, Node};

use super::error::{CompileError, CompileResult};
use super::state::CompileState;

/// What a `Code` node's text means.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum CodeKind<'a> {
    If(&'a str),
    ElseIf(&'a str),
    Else,
    /// `var` declaration; holds the text after the keyword.
    Declaration(&'a str),
    Expression(&'a str),
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    let boundary = rest
        .chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$'));
    boundary.then_some(rest)
}

pub(super) fn classify(val: &str) -> CodeKind<'_> {
    let text = val.trim();
    if let Some(cond) = strip_keyword(text, "if") {
        return CodeKind::If(cond.trim());
    }
    if let Some(rest) = strip_keyword(text, "else") {
        let rest = rest.trim_start();
        if let Some(cond) = strip_keyword(rest, "if") {
            return CodeKind::ElseIf(cond.trim());
        }
        if rest.is_empty() {
            return CodeKind::Else;
        }
    }
    if let Some(decl) = strip_keyword(text, "var") {
        return CodeKind::Declaration(decl.trim().trim_end_matches(';').trim_end());
    }
    CodeKind::Expression(text)
}

/// Whether `node` continues an open chain instead of ending it.
pub(super) fn continues_chain(node: &Node) -> bool {
    match node {
        Node::Code(code) => matches!(classify(&code.val), CodeKind::ElseIf(_) | CodeKind::Else),
        _ => false,
    }
}

/// `(cond)`, reusing the author's parentheses when they span the whole condition.
pub(super) fn parenthesize(cond: &str) -> String {
    if is_parenthesized(cond) {
        cond.to_owned()
    } else {
        format!("({cond})")
    }
}

fn is_parenthesized(text: &str) -> bool {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != text.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

impl CompileState {
    pub(super) fn visit_code(&mut self, code: &Code) -> CompileResult<()> {
        let empty = Block::default();
        let block = code.block.as_ref().unwrap_or(&empty);

        match classify(&code.val) {
            CodeKind::If(cond) => {
                let leading = self.leading();
                self.push(format!("{leading}{} ? ", parenthesize(cond)));
                self.open_branch(block)?;
                self.expect_pending_branch = true;
            }
            CodeKind::ElseIf(cond) => {
                self.take_pending_branch(&code.val)?;
                self.push(format!(" : {} ? ", parenthesize(cond)));
                self.open_branch(block)?;
                self.expect_pending_branch = true;
            }
            CodeKind::Else => {
                self.take_pending_branch(&code.val)?;
                self.push(" : ");
                self.open_branch(block)?;
            }
            CodeKind::Declaration(decl) => {
                // The name binds in the render scope; later siblings read it back.
                let leading = self.leading();
                self.push(format!("{leading}({decl}, undefined)"));
            }
            CodeKind::Expression(expr) => {
                let leading = self.leading();
                self.push(format!("{leading}\"\" + ({expr})"));
            }
        }
        Ok(())
    }

    pub(super) fn visit_conditional(&mut self, cond: &Conditional) -> CompileResult<()> {
        let leading = self.leading();
        self.push(format!("{leading}{} ? ", parenthesize(cond.test.trim())));
        self.open_branch(&cond.consequent)?;
        self.push(" : ");
        match cond.alternate.as_deref() {
            None => self.push("undefined"),
            Some(Node::Block(block)) => self.open_branch(block)?,
            Some(node) => {
                self.suppress_next_indent = true;
                self.visit(node, true)?;
            }
        }
        Ok(())
    }

    /// Consume the open ternary an `else` continues.
    fn take_pending_branch(&mut self, val: &str) -> CompileResult<()> {
        if !self.expect_pending_branch {
            return Err(CompileError::AmbiguousElse(val.trim().to_owned()));
        }
        self.expect_pending_branch = false;
        Ok(())
    }

    /// `(<block>)`, continuing the current line.
    fn open_branch(&mut self, block: &Block) -> CompileResult<()> {
        self.push("(");
        self.suppress_next_indent = true;
        self.visit_block(block, true)?;
        self.push(")");
        Ok(())
    }
}
