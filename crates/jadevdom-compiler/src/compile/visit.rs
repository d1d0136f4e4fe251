//! Node dispatch and the sequence-level handlers (blocks, text, tags, comments).

use jadevdom_core::{Block, Node, Tag, Text};

use super::attributes::AttributeSet;
use super::conditional::continues_chain;
use super::error::{CompileError, CompileResult};
use super::state::{CompileState, quote};

const RED_ZONE: usize = 64 * 1024;
const STACK_PER_RECURSION: usize = 1024 * 1024;

impl CompileState {
    /// Compile one node, closing a dangling ternary left by the previous sibling first.
    ///
    /// `wrap` asks block-shaped nodes to bracket multi-element sequences.
    pub(super) fn visit(&mut self, node: &Node, wrap: bool) -> CompileResult<()> {
        if !continues_chain(node) && self.close_pending_branch() {
            self.push(self.separator());
        }

        self.enter()?;
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || self.dispatch(node, wrap))?;
        self.exit();
        Ok(())
    }

    fn dispatch(&mut self, node: &Node, wrap: bool) -> CompileResult<()> {
        match node {
            Node::Block(block) => self.visit_block(block, wrap)?,
            Node::Tag(tag) => self.visit_tag(tag)?,
            Node::Text(text) => self.visit_text(text),
            Node::Code(code) => self.visit_code(code)?,
            Node::Each(each) => self.visit_each(each)?,
            Node::Comment(_) => self.visit_comment(),
            Node::Conditional(cond) => self.visit_conditional(cond)?,
            Node::Unsupported { kind } => {
                return Err(CompileError::UnsupportedNodeKind(kind.clone()));
            }
        }
        Ok(())
    }

    /// Compile children in order.
    ///
    /// With `wrap` and more than one child the sequence becomes an array
    /// literal; a single child stays unwrapped. Without `wrap` the children
    /// are spliced into the enclosing sequence.
    pub(super) fn visit_block(&mut self, block: &Block, wrap: bool) -> CompileResult<()> {
        let Some(last) = block.nodes.len().checked_sub(1) else {
            let leading = self.leading();
            self.push(format!("{leading}undefined"));
            return Ok(());
        };

        let bracket = wrap && last > 0;
        if bracket {
            let leading = self.leading();
            self.push(format!("{leading}[{}", self.line_break()));
            self.indent();
        }

        // A lone child sits in our slot, so it inherits the wrap request.
        let child_wrap = if last == 0 { wrap } else { false };
        for (i, node) in block.nodes.iter().enumerate() {
            self.visit(node, child_wrap)?;
            if !self.expect_pending_branch && i < last {
                self.push(self.separator());
            }
        }
        self.close_pending_branch();

        if bracket {
            self.dedent();
            self.push(format!("{}{}]", self.line_break(), self.margin()));
        }
        Ok(())
    }

    pub(super) fn visit_comment(&mut self) {
        let leading = self.leading();
        self.push(format!("{leading}undefined"));
    }

    pub(super) fn visit_text(&mut self, text: &Text) {
        let leading = self.leading();
        self.push(format!("{leading}{}", text_expression(&text.val)));
    }

    pub(super) fn visit_tag(&mut self, tag: &Tag) -> CompileResult<()> {
        let leading = self.leading();
        self.push(format!("{leading}{{{}", self.line_break()));
        self.indent();

        self.push(format!("{}tag: {}", self.margin(), quote(&tag.name)));

        for (field, value) in AttributeSet::collect(&tag.attrs).fields() {
            self.push(format!("{}{}{field}: {value}", self.separator(), self.margin()));
        }

        if tag.code.is_some() || !tag.block.is_empty() {
            self.push(format!("{}{}children: ", self.separator(), self.margin()));
            self.suppress_next_indent = true;
            match &tag.code {
                Some(code) => {
                    self.visit_code(code)?;
                    self.close_pending_branch();
                }
                None => self.visit_block(&tag.block, true)?,
            }
        }

        self.dedent();
        self.push(format!("{}{}}}", self.line_break(), self.margin()));
        Ok(())
    }
}

/// One slice of a text node.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum TextPart<'a> {
    Literal(String),
    Interpolation(&'a str),
}

/// Split text on `#{expr}` markers. `\#{` is a literal `#{`.
///
/// An unterminated marker is kept as literal text.
pub(super) fn split_interpolations(text: &str) -> Vec<TextPart<'_>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(pos) = rest.find("#{") {
        if rest[..pos].ends_with('\\') {
            literal.push_str(&rest[..pos - 1]);
            literal.push_str("#{");
            rest = &rest[pos + 2..];
            continue;
        }

        let after = &rest[pos + 2..];
        let Some(end) = after.find('}') else {
            break;
        };

        literal.push_str(&rest[..pos]);
        if !literal.is_empty() {
            parts.push(TextPart::Literal(std::mem::take(&mut literal)));
        }
        parts.push(TextPart::Interpolation(&after[..end]));
        rest = &after[end + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() || parts.is_empty() {
        parts.push(TextPart::Literal(literal));
    }
    parts
}

/// Expression for a text node: one string value, interpolations coerced with `"" +`.
pub(super) fn text_expression(text: &str) -> String {
    split_interpolations(text)
        .into_iter()
        .map(|part| match part {
            TextPart::Literal(s) => quote(&s),
            TextPart::Interpolation(expr) => format!("(\"\" + ({}))", expr.trim()),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}
