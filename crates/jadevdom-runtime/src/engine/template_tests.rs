use indoc::indoc;
use jadevdom_core::{Colors, ITERATION_HELPER_SOURCE};
use serde_json::json;

use super::error::{MaterializeError, RuntimeError};
use super::eval::FuelLimits;
use super::template::Template;
use super::trace::{PrintTracer, Verbosity};
use super::vnode::VNode;

fn with_helper(body: &str) -> String {
    format!("{ITERATION_HELPER_SOURCE}\n{body}")
}

fn render(source: &str, locals: serde_json::Value) -> serde_json::Value {
    Template::materialize(source)
        .expect("valid body")
        .render(&locals)
        .expect("render succeeds")
        .to_value()
}

#[test]
fn renders_tag_with_children() {
    let source = r#"return {tag: "div", children: "" + (computed)};"#;
    assert_eq!(
        render(source, json!({"computed": "iscomputed"})),
        json!({"tag": "div", "children": "iscomputed"})
    );
}

#[test]
fn renders_pretty_body() {
    let source = indoc! {r#"
        return [
          (condition) ? ("got true") : ("got false")
        ];
    "#};
    assert_eq!(render(source, json!({"condition": true})), json!(["got true"]));
    assert_eq!(render(source, json!({"condition": false})), json!(["got false"]));
}

#[test]
fn renders_are_independent() {
    let template = Template::materialize(
        r#"return [(foo = bar, undefined), {tag: "div", children: "" + (foo)}];"#,
    )
    .unwrap();
    for bar in ["one", "two"] {
        let vnode = template.render(&json!({"bar": bar})).unwrap();
        assert_eq!(vnode.to_value(), json!([null, {"tag": "div", "children": bar}]));
    }
}

#[test]
fn iteration_helper_is_bound_when_declared() {
    let source = with_helper(
        r#"return _map(arr, function (el, $index) {return {tag: "li", children: "" + (el)};});"#,
    );
    let template = Template::materialize(&source).unwrap();
    assert!(template.uses_iteration_helper());
    assert_eq!(
        template.render(&json!({"arr": [1, 2]})).unwrap().to_value(),
        json!([{"tag": "li", "children": "1"}, {"tag": "li", "children": "2"}])
    );
}

#[test]
fn iteration_helper_is_absent_otherwise() {
    let template = Template::materialize("return _map(arr, function (el) {return el;});").unwrap();
    assert!(!template.uses_iteration_helper());
    assert_eq!(
        template.render(&json!({"arr": ["a"]})).unwrap_err(),
        RuntimeError::TypeError("_map is not a function".to_owned())
    );
}

#[test]
fn null_locals_mean_none() {
    assert_eq!(render("return typeof x;", json!(null)), json!("undefined"));
}

#[test]
fn locals_must_be_an_object() {
    let template = Template::materialize("return undefined;").unwrap();
    assert_eq!(
        template.render(&json!([1])).unwrap_err(),
        RuntimeError::InvalidLocals
    );
}

#[test]
fn fuel_limits_apply_per_render() {
    let template = Template::materialize(r#"return ["a", "b", "c"];"#).unwrap();
    let err = template
        .render_with(&json!({}), FuelLimits::new().exec_fuel(2), &mut super::trace::NoopTracer)
        .unwrap_err();
    assert_eq!(err, RuntimeError::ExecFuelExhausted);
    assert!(template.render(&json!({})).is_ok());
}

#[test]
fn trace_default_verbosity() {
    let source = with_helper(r#"return _map(arr, function (el, $index) {return (el) ? ("y") : ("n");});"#);
    let template = Template::materialize(&source).unwrap();
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    template
        .render_with(&json!({"arr": [1, 0]}), FuelLimits::default(), &mut tracer)
        .unwrap();

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
       call _map
    iterate 2 items
       call <anonymous>
     branch then
       call <anonymous>
     branch else
    ");
}

#[test]
fn trace_verbose_adds_items_and_result() {
    let source = with_helper(r#"return _map(arr, function (el, $index) {return "" + (el);});"#);
    let template = Template::materialize(&source).unwrap();
    let mut tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    template
        .render_with(&json!({"arr": ["x"]}), FuelLimits::default(), &mut tracer)
        .unwrap();

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
       call _map
    iterate 1 item
       item 0
       call <anonymous>
     result object
    ");
}

#[test]
fn trace_very_verbose_shows_values() {
    let template = Template::materialize("return (foo = 'bar', foo);").unwrap();
    let mut tracer = PrintTracer::new(Verbosity::VeryVerbose, Colors::OFF);
    template
        .render_with(&json!({}), FuelLimits::default(), &mut tracer)
        .unwrap();

    assert_eq!(tracer.lines(), [r#" assign foo = "bar""#, r#" result "bar""#]);
}

#[test]
fn malformed_body_renders_snippet() {
    let source = "return a b";
    let err = Template::materialize(source).unwrap_err();
    assert_eq!(err.span(), Some(9..10));

    let rendered = err.printer().source(source).path("template.js").render();
    assert!(rendered.contains("error: malformed expression: expected end of input, found `b`"));
    assert!(rendered.contains("template.js"));
    assert!(rendered.contains('^'));
}

#[test]
fn nesting_error_has_no_snippet() {
    let source = format!("return {}a{};", "(".repeat(3000), ")".repeat(3000));
    let err = Template::materialize(&source).unwrap_err();
    assert_eq!(err, MaterializeError::RecursionLimitExceeded);
    assert_eq!(
        err.printer().source(&source).render(),
        "error: expression nesting limit exceeded"
    );
}

#[test]
fn deep_bodies_render() {
    let depth = 1500;
    let source = format!(
        "return {}\"leaf\"{};",
        "{tag: \"div\", children: ".repeat(depth),
        "}".repeat(depth)
    );
    let node = Template::materialize(&source).unwrap().render(&json!({})).unwrap();

    let mut current = &node;
    let mut levels = 0;
    while let VNode::Element(el) = current {
        levels += 1;
        current = el.children.as_deref().expect("nested child");
    }
    assert_eq!(levels, depth);
    assert_eq!(current, &VNode::Text("leaf".to_owned()));
}

#[test]
fn self_referencing_closure_renders() {
    let source = "return (f = function (n) {return n <= 0 ? \"done\" : f(n - 1);}, {tag: \"p\", children: f(3)});";
    assert_eq!(
        render(source, json!({})),
        json!({"tag": "p", "children": "done"})
    );
}
