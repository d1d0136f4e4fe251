//! Compiler entry point and options.

use jadevdom_core::{DEFAULT_NESTING_LIMIT, ITERATION_HELPER_SOURCE, Node};

use super::error::CompileResult;
use super::output::CompiledTemplate;
use super::state::CompileState;

/// Options controlling the shape of generated source.
#[derive(Clone, Copy, Debug)]
pub struct CompileOptions {
    /// Emit newlines and indentation (default: true). Cosmetic only.
    pub(crate) pretty: bool,
    /// Maximum node nesting depth (default: [`DEFAULT_NESTING_LIMIT`]).
    pub(crate) recursion_limit: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            recursion_limit: DEFAULT_NESTING_LIMIT,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Template document compiler.
///
/// Holds only configuration. Every `compile` call owns its emission state,
/// so one compiler can be shared freely across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a document root into a function body returning its VirtualNode.
    pub fn compile(&self, root: &Node) -> CompileResult<CompiledTemplate> {
        let mut state = CompileState::new(&self.options);

        state.push("return ");
        state.visit(root, true)?;
        state.close_pending_branch();
        state.push(";");

        let uses_iteration_helper = state.needs_iteration_helper;
        let mut fragments = state.into_fragments();
        if uses_iteration_helper {
            fragments.insert(0, format!("{ITERATION_HELPER_SOURCE}\n"));
        }

        Ok(CompiledTemplate::new(fragments, uses_iteration_helper))
    }
}

/// Compile with default options.
pub fn compile(root: &Node) -> CompileResult<CompiledTemplate> {
    Compiler::new().compile(root)
}
