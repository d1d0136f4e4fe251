//! Compiled documents rendered end to end.

use jadevdom_core::{Block, Code, Conditional, DEFAULT_NESTING_LIMIT, Each, Node, Tag};
use jadevdom_runtime::{MaterializeError, ParseLimits, Template};
use serde_json::json;

use crate::test_utils::render;
use crate::{CompileOptions, Compiler};

fn if_else() -> Block {
    Block::new(vec![
        Code::new("if condition")
            .block(vec![Node::text("got true")])
            .into(),
        Code::new("else").block(vec![Node::text("got false")]).into(),
    ])
}

#[test]
fn computed_child() {
    let tag = Tag::new("div").code("computed");
    assert_eq!(
        render(tag, r#"{"computed": "iscomputed"}"#),
        json!({"tag": "div", "children": "iscomputed"})
    );
}

#[test]
fn classes_merge_in_order() {
    let tag = Tag::new("div")
        .attr("class", "'class second'")
        .attr("class", "['attrclass', computed]");
    assert_eq!(
        render(tag, r#"{"computed": "iscomputed"}"#),
        json!({"tag": "div", "class": ["class", "second", "attrclass", "iscomputed"]})
    );
}

#[test]
fn escaped_class_literal_renders_decoded() {
    let tag = Tag::new("div").attr("class", r#""a\"b c""#);
    assert_eq!(
        render(tag, "{}"),
        json!({"tag": "div", "class": ["a\"b", "c"]})
    );
}

#[test]
fn data_attributes_are_camel_cased() {
    let tag = Tag::new("div")
        .attr("data-foo", "'foo'")
        .attr("data-foo-bar", "bar");
    assert_eq!(
        render(tag, r#"{"bar": "baz"}"#),
        json!({"tag": "div", "data": {"foo": "foo", "fooBar": "baz"}})
    );
}

#[test]
fn plain_attributes_keep_their_names() {
    let tag = Tag::new("input")
        .attr("type", "'checkbox'")
        .attr("aria-label", "label")
        .attr("checked", "true");
    assert_eq!(
        render(tag, r#"{"label": "Done"}"#),
        json!({
            "tag": "input",
            "attributes": {"type": "checkbox", "aria-label": "Done", "checked": true}
        })
    );
}

#[test]
fn if_else_picks_a_branch() {
    assert_eq!(render(if_else(), r#"{"condition": true}"#), json!(["got true"]));
    assert_eq!(render(if_else(), r#"{"condition": false}"#), json!(["got false"]));
}

#[test]
fn else_if_chain() {
    let doc = Block::new(vec![
        Code::new("if condition == 2")
            .block(vec![Node::text("got two")])
            .into(),
        Code::new("else if condition == 1")
            .block(vec![Node::text("got one")])
            .into(),
        Code::new("else").block(vec![Node::text("got zero")]).into(),
    ]);
    assert_eq!(render(doc.clone(), r#"{"condition": 2}"#), json!(["got two"]));
    assert_eq!(render(doc.clone(), r#"{"condition": 1}"#), json!(["got one"]));
    assert_eq!(render(doc, r#"{"condition": 0}"#), json!(["got zero"]));
}

#[test]
fn if_without_else() {
    let doc = Code::new("if condition").block(vec![Node::text("got true")]);
    assert_eq!(render(doc.clone(), r#"{"condition": true}"#), json!("got true"));
    assert_eq!(render(doc, r#"{"condition": false}"#), json!(null));
}

#[test]
fn if_without_else_keeps_sibling_slots() {
    let doc = Block::new(vec![
        Code::new("if condition")
            .block(vec![Node::text("got true")])
            .into(),
        Node::text("other child"),
    ]);
    assert_eq!(
        render(doc.clone(), r#"{"condition": false}"#),
        json!([null, "other child"])
    );
    assert_eq!(
        render(doc, r#"{"condition": true}"#),
        json!(["got true", "other child"])
    );
}

#[test]
fn structural_conditional() {
    let cond = Conditional::new("n > 1", vec![Node::text("many")])
        .alternate(Block::new(vec![Tag::new("em").child(Node::text("few")).into()]));
    assert_eq!(render(cond.clone(), r#"{"n": 5}"#), json!("many"));
    assert_eq!(
        render(cond, r#"{"n": 0}"#),
        json!({"tag": "em", "children": "few"})
    );
}

#[test]
fn each_over_array() {
    let each = Each::new("arr", "el").block(vec![Tag::new("li").code("el").into()]);
    let ul = Tag::new("ul").child(each);
    assert_eq!(
        render(ul, r#"{"arr": [1, 2, 3]}"#),
        json!({"tag": "ul", "children": [
            {"tag": "li", "children": "1"},
            {"tag": "li", "children": "2"},
            {"tag": "li", "children": "3"}
        ]})
    );
}

#[test]
fn each_over_object_keys() {
    let li = Tag::new("li").attr("key", "key").code("el");
    let each = Each::new("obj", "el").key("key").block(vec![li.into()]);
    assert_eq!(
        render(each, r#"{"obj": {"k1": 1, "k2": 2}}"#),
        json!([
            {"tag": "li", "key": "k1", "children": "1"},
            {"tag": "li", "key": "k2", "children": "2"}
        ])
    );
}

#[test]
fn each_over_array_like() {
    let each = Each::new("arr", "el").block(vec![Tag::new("li").code("el").into()]);
    assert_eq!(
        render(each, r#"{"arr": {"0": 1, "1": 2, "length": 2}}"#),
        json!([{"tag": "li", "children": "1"}, {"tag": "li", "children": "2"}])
    );
}

#[test]
fn each_index_as_key() {
    let li = Tag::new("li").attr("key", "$index").code("el");
    let each = Each::new("arr", "el").block(vec![li.into()]);
    assert_eq!(
        render(each, r#"{"arr": ["a"]}"#),
        json!([{"tag": "li", "key": "0", "children": "a"}])
    );
}

#[test]
fn each_with_several_children_yields_lists() {
    let each = Each::new("arr", "el").block(vec![
        Tag::new("dt").code("el").into(),
        Tag::new("dd").code("$index").into(),
    ]);
    assert_eq!(
        render(each, r#"{"arr": ["x"]}"#),
        json!([[{"tag": "dt", "children": "x"}, {"tag": "dd", "children": "0"}]])
    );
}

#[test]
fn empty_each_renders_empty_list() {
    let each = Each::new("arr", "el").block(vec![Node::code("el")]);
    assert_eq!(render(each, r#"{"arr": []}"#), json!([]));
}

#[test]
fn interpolation() {
    let tag = Tag::new("div").child(Node::text("#{obj.prop[0]}text#{obj.prop[1]}"));
    assert_eq!(
        render(tag, r#"{"obj": {"prop": [0, 1]}}"#),
        json!({"tag": "div", "children": "0text1"})
    );
}

#[test]
fn comments_render_as_holes() {
    let doc = Block::new(vec![Tag::new("div").into(), Node::comment(" comment")]);
    assert_eq!(render(doc, "{}"), json!([{"tag": "div"}, null]));
}

#[test]
fn var_binds_for_later_siblings() {
    let doc = Block::new(vec![
        Node::code("var foo = bar"),
        Tag::new("div").code("foo").into(),
    ]);
    assert_eq!(
        render(doc, r#"{"bar": "bar"}"#),
        json!([null, {"tag": "div", "children": "bar"}])
    );
}

#[test]
fn nested_document() {
    let doc = Tag::new("section")
        .attr("class", "'card'")
        .child(Tag::new("h1").child(Node::text("#{title}")))
        .child(
            Tag::new("ul").child(
                Each::new("items", "item").block(vec![
                    Code::new("if item.done")
                        .block(vec![Tag::new("s").code("item.name").into()])
                        .into(),
                    Code::new("else")
                        .block(vec![Tag::new("b").code("item.name").into()])
                        .into(),
                ]),
            ),
        );
    let locals = r#"{
        "title": "Todo",
        "items": [{"name": "write", "done": true}, {"name": "ship", "done": false}]
    }"#;
    assert_eq!(
        render(doc, locals),
        json!({
            "tag": "section",
            "class": ["card"],
            "children": [
                {"tag": "h1", "children": "Todo"},
                {"tag": "ul", "children": [
                    [{"tag": "s", "children": "write"}],
                    [{"tag": "b", "children": "ship"}]
                ]}
            ]
        })
    );
}

fn nested_divs(depth: usize) -> Node {
    let mut node = Node::text("leaf");
    for _ in 0..depth {
        node = Tag::new("div").child(node).into();
    }
    node
}

#[test]
fn deepest_accepted_document_renders() {
    let depth = DEFAULT_NESTING_LIMIT as usize - 1;
    let mut value = render(nested_divs(depth), "{}");
    let mut levels = 0;
    while let Some(child) = value.get_mut("children").map(serde_json::Value::take) {
        levels += 1;
        value = child;
    }
    assert_eq!(levels, depth);
    assert_eq!(value, json!("leaf"));
}

#[test]
fn nesting_past_the_expression_limit_is_rejected() {
    let unbounded =
        Compiler::with_options(CompileOptions::new().pretty(false).recursion_limit(u32::MAX));
    let depth = ParseLimits::default().get_recursion_limit() as usize + 1;
    let source = unbounded.compile(&nested_divs(depth)).unwrap().source();

    assert_eq!(
        Template::materialize(&source).unwrap_err(),
        MaterializeError::RecursionLimitExceeded
    );
    let source = unbounded.compile(&nested_divs(150)).unwrap().source();
    assert_eq!(
        Template::materialize_with(&source, ParseLimits::new().recursion_limit(100)).unwrap_err(),
        MaterializeError::RecursionLimitExceeded
    );
    assert!(Template::materialize(&source).is_ok());
}
