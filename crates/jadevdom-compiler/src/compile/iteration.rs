//! `each` loops.

use jadevdom_core::{Each, ITERATION_HELPER_NAME};

use super::error::CompileResult;
use super::state::CompileState;

impl CompileState {
    /// `_map(obj, function (val, key) { return <block>; })`.
    ///
    /// The body's value is the loop's per-item result, so a multi-child body
    /// yields one array per item.
    pub(super) fn visit_each(&mut self, each: &Each) -> CompileResult<()> {
        self.needs_iteration_helper = true;

        let leading = self.leading();
        self.push(format!(
            "{leading}{ITERATION_HELPER_NAME}({}, function ({}, {}) {{{}",
            each.obj.trim(),
            each.val.trim(),
            each.key.trim(),
            self.line_break(),
        ));
        self.indent();

        self.push(format!("{}return ", self.margin()));
        self.suppress_next_indent = true;
        self.visit_block(&each.block, true)?;

        self.dedent();
        self.push(format!(";{}{}}})", self.line_break(), self.margin()));
        Ok(())
    }
}
