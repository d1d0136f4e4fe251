//! Builder-pattern printer for materialization errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::engine::MaterializeError;

/// Renders a [`MaterializeError`] against the source it came from.
pub struct SnippetPrinter<'e, 's> {
    error: &'e MaterializeError,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> SnippetPrinter<'e, 's> {
    pub fn new(error: &'e MaterializeError) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let (Some(source), Some(span)) = (self.source, self.error.span()) else {
            return write!(w, "error: {}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.error.to_string();
        let label = match self.error {
            MaterializeError::MalformedExpression { message, .. } => message.as_str(),
            MaterializeError::RecursionLimitExceeded => "",
        };

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(adjust_range(span, source.len())).label(label));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Widen empty spans to one character so the caret has something to point at.
fn adjust_range(range: std::ops::Range<usize>, limit: usize) -> std::ops::Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range
}

impl MaterializeError {
    pub fn printer(&self) -> SnippetPrinter<'_, '_> {
        SnippetPrinter::new(self)
    }
}
