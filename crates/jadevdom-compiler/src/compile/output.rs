//! Compiled template output.

/// Generated function body, kept as the ordered fragments it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTemplate {
    fragments: Vec<String>,
    uses_iteration_helper: bool,
}

impl CompiledTemplate {
    pub(crate) fn new(fragments: Vec<String>, uses_iteration_helper: bool) -> Self {
        Self {
            fragments,
            uses_iteration_helper,
        }
    }

    /// Fragments in emission order, helper prelude first when present.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn uses_iteration_helper(&self) -> bool {
        self.uses_iteration_helper
    }

    /// Complete function body, ready for materialization.
    pub fn source(&self) -> String {
        self.fragments.concat()
    }

    /// The `return ...;` statement without the helper prelude.
    pub fn body(&self) -> String {
        let skip = usize::from(self.uses_iteration_helper);
        self.fragments[skip..].concat()
    }

    /// One `buf.push(<string literal>);` instruction per fragment.
    pub fn append_instructions(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| format!("buf.push({});", super::state::quote(fragment)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
