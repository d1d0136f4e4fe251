//! Test utilities and snapshot macros.

use jadevdom_core::Node;
use jadevdom_runtime::Template;

use crate::{CompileOptions, Compiler};

/// Inline snapshot of the compact generated source.
#[macro_export]
macro_rules! shot_source {
    ($node:expr, @$snapshot:literal) => {{
        let output = $crate::test_utils::compact($node);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Compact (single line) `return` statement for `node`, helper prelude omitted.
pub fn compact(node: impl Into<Node>) -> String {
    Compiler::with_options(CompileOptions::new().pretty(false))
        .compile(&node.into())
        .expect("document should compile")
        .body()
}

/// Pretty source for `node`.
pub fn pretty(node: impl Into<Node>) -> String {
    Compiler::new()
        .compile(&node.into())
        .expect("document should compile")
        .source()
}

/// Compile, materialize and render `node` against JSON `locals`.
pub fn render(node: impl Into<Node>, locals: &str) -> serde_json::Value {
    let source = pretty(node);
    let template = Template::materialize(&source).expect("generated source should materialize");
    let locals: serde_json::Value = serde_json::from_str(locals).expect("locals should be JSON");
    template
        .render(&locals)
        .expect("render should succeed")
        .to_value()
}
