//! Generated source for whole documents.

use indoc::indoc;
use jadevdom_core::{Block, Code, Conditional, Each, ITERATION_HELPER_SOURCE, Node, Tag};

use crate::shot_source;
use crate::test_utils::pretty;
use crate::{CompileError, CompileOptions, Compiler, compile};

fn root(nodes: Vec<Node>) -> Block {
    Block::new(nodes)
}

#[test]
fn text_root() {
    shot_source!(Node::text("text"), @r#"return "text";"#);
}

#[test]
fn bare_tag() {
    shot_source!(Tag::new("div"), @r#"return {tag: "div"};"#);
}

#[test]
fn id_and_class_shorthand() {
    let tag = Tag::new("div").attr("id", "'id'").attr("class", "'class'");
    shot_source!(tag, @r#"return {tag: "div", class: ["class"], attributes: {"id": 'id'}};"#);
}

#[test]
fn field_order_is_fixed() {
    let tag = Tag::new("a")
        .attr("key", "k")
        .attr("href", "url")
        .attr("data-x", "1")
        .attr("class", "'c'");
    shot_source!(tag, @r#"return {tag: "a", class: ["c"], data: {"x": 1}, attributes: {"href": url}, key: k};"#);
}

#[test]
fn code_child() {
    shot_source!(Tag::new("div").code("computed"), @r#"return {tag: "div", children: "" + (computed)};"#);
}

#[test]
fn mixed_children() {
    let tag = Tag::new("div")
        .child(Node::code("computed"))
        .child(Tag::new("span").child(Node::text("text")))
        .child(Node::text("more text"));
    shot_source!(tag, @r#"return {tag: "div", children: ["" + (computed), {tag: "span", children: "text"}, "more text"]};"#);
}

#[test]
fn sibling_roots() {
    let doc = root(vec![Tag::new("div").into(), Tag::new("div").into()]);
    shot_source!(doc, @r#"return [{tag: "div"}, {tag: "div"}];"#);
}

#[test]
fn empty_document() {
    shot_source!(Block::default(), @"return undefined;");
}

#[test]
fn empty_tag_block_has_no_children_field() {
    let tag = Tag {
        block: Block::default(),
        ..Tag::new("br")
    };
    shot_source!(tag, @r#"return {tag: "br"};"#);
}

#[test]
fn comment_keeps_slot() {
    let doc = root(vec![Tag::new("div").into(), Node::comment(" comment")]);
    shot_source!(doc, @r#"return [{tag: "div"}, undefined];"#);
}

#[test]
fn interpolated_text() {
    let tag = Tag::new("div").child(Node::text("#{obj.prop[0]}text#{obj.prop[1]}"));
    shot_source!(tag, @r#"return {tag: "div", children: ("" + (obj.prop[0])) + "text" + ("" + (obj.prop[1]))};"#);
}

#[test]
fn if_else_chain() {
    let doc = root(vec![
        Code::new("if condition")
            .block(vec![Node::text("got true")])
            .into(),
        Code::new("else").block(vec![Node::text("got false")]).into(),
    ]);
    shot_source!(doc, @r#"return [(condition) ? ("got true") : ("got false")];"#);
}

#[test]
fn if_else_if_else_chain() {
    let doc = root(vec![
        Code::new("if condition == 2")
            .block(vec![Node::text("got two")])
            .into(),
        Code::new("else if condition == 1")
            .block(vec![Node::text("got one")])
            .into(),
        Code::new("else").block(vec![Node::text("got zero")]).into(),
    ]);
    shot_source!(doc, @r#"return [(condition == 2) ? ("got two") : (condition == 1) ? ("got one") : ("got zero")];"#);
}

#[test]
fn if_without_else_at_end() {
    let doc = root(vec![
        Code::new("if condition")
            .block(vec![Node::text("got true")])
            .into(),
    ]);
    shot_source!(doc, @r#"return (condition) ? ("got true") : undefined;"#);
}

#[test]
fn if_without_else_before_sibling() {
    let doc = root(vec![
        Code::new("if condition")
            .block(vec![Node::text("got true")])
            .into(),
        Node::text("other child"),
    ]);
    shot_source!(doc, @r#"return [(condition) ? ("got true") : undefined, "other child"];"#);
}

#[test]
fn if_body_with_several_children_is_an_array() {
    let doc = Code::new("if ok").block(vec![Node::text("a"), Node::text("b")]);
    shot_source!(doc, @r#"return (ok) ? (["a", "b"]) : undefined;"#);
}

#[test]
fn inline_code_conditional_is_closed_inside_tag() {
    let tag = Tag {
        code: Some(Code::new("if flag").block(vec![Node::text("yes")])),
        ..Tag::new("p")
    };
    shot_source!(tag, @r#"return {tag: "p", children: (flag) ? ("yes") : undefined};"#);
}

#[test]
fn structural_conditional() {
    let cond = Conditional::new("a", vec![Node::text("one")]).alternate(
        Conditional::new("b", vec![Node::text("two")]).alternate(Block::new(vec![Node::text("three")])),
    );
    shot_source!(cond, @r#"return (a) ? ("one") : (b) ? ("two") : ("three");"#);
}

#[test]
fn structural_conditional_without_alternate() {
    shot_source!(Conditional::new("a", vec![Node::text("one")]), @r#"return (a) ? ("one") : undefined;"#);
}

#[test]
fn each_over_array() {
    let each = Each::new("arr", "el").block(vec![Tag::new("li").code("el").into()]);
    shot_source!(each, @r#"return _map(arr, function (el, $index) {return {tag: "li", children: "" + (el)};});"#);
}

#[test]
fn each_with_key() {
    let li = Tag::new("li").attr("key", "key").code("el");
    let each = Each::new("obj", "el").key("key").block(vec![li.into()]);
    shot_source!(each, @r#"return _map(obj, function (el, key) {return {tag: "li", key: key, children: "" + (el)};});"#);
}

#[test]
fn var_declaration() {
    let doc = root(vec![Node::code("var foo = bar"), Tag::new("div").code("foo").into()]);
    shot_source!(doc, @r#"return [(foo = bar, undefined), {tag: "div", children: "" + (foo)}];"#);
}

#[test]
fn pretty_children() {
    let tag = Tag::new("div")
        .child(Node::code("computed"))
        .child(Tag::new("span").child(Node::text("text")))
        .child(Node::text("more text"));
    insta::assert_snapshot!(pretty(tag), @r#"
    return {
      tag: "div",
      children: [
        "" + (computed),
        {
          tag: "span",
          children: "text"
        },
        "more text"
      ]
    };
    "#);
}

#[test]
fn pretty_each() {
    let each = Each::new("arr", "el").block(vec![Tag::new("li").code("el").into()]);
    let ul = Tag::new("ul").child(each);
    let output = Compiler::new().compile(&ul.into()).unwrap();
    insta::assert_snapshot!(output.body(), @r#"
    return {
      tag: "ul",
      children: _map(arr, function (el, $index) {
        return {
          tag: "li",
          children: "" + (el)
        };
      })
    };
    "#);
}

#[test]
fn helper_prelude_only_when_iterating() {
    let plain = compile(&Tag::new("div").into()).unwrap();
    assert!(!plain.uses_iteration_helper());
    assert!(!plain.source().contains("function _map"));

    let each = Each::new("arr", "el").block(vec![Node::code("el")]);
    let looped = compile(&Tag::new("ul").child(each).into()).unwrap();
    assert!(looped.uses_iteration_helper());
    assert!(looped.source().starts_with(ITERATION_HELPER_SOURCE));
    assert_eq!(looped.source(), format!("{ITERATION_HELPER_SOURCE}\n{}", looped.body()));
}

#[test]
fn helper_prelude_emitted_once() {
    let each = || Each::new("arr", "el").block(vec![Node::code("el")]);
    let doc = root(vec![each().into(), each().into()]);
    let output = compile(&doc.into()).unwrap();
    assert_eq!(output.source().matches("function _map").count(), 1);
}

#[test]
fn append_instructions() {
    let output = Compiler::with_options(CompileOptions::new().pretty(false))
        .compile(&Tag::new("div").into())
        .unwrap();
    assert_eq!(
        output.append_instructions(),
        indoc! {r#"
            buf.push("return ");
            buf.push("{");
            buf.push("tag: \"div\"");
            buf.push("}");
            buf.push(";");"#}
    );
}

#[test]
fn pretty_flag_is_cosmetic() {
    let tag = Tag::new("div")
        .attr("class", "'a'")
        .child(Node::text("x"))
        .child(Node::text("y"));
    let pretty = Compiler::new().compile(&tag.clone().into()).unwrap().source();
    let compact = Compiler::with_options(CompileOptions::new().pretty(false))
        .compile(&tag.into())
        .unwrap()
        .source();
    let squash = |s: &str| s.split_whitespace().collect::<String>();
    assert_eq!(squash(&pretty), squash(&compact));
}

#[test]
fn compilation_is_deterministic() {
    let doc: Node = root(vec![
        Code::new("if a").block(vec![Node::text("x")]).into(),
        Each::new("items", "it").block(vec![Node::code("it")]).into(),
    ])
    .into();
    let compiler = Compiler::new();
    let first = compiler.compile(&doc).unwrap();
    let second = compiler.compile(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unsupported_node_fails() {
    let doc = root(vec![
        Tag::new("div").into(),
        Node::Unsupported {
            kind: "Mixin".to_owned(),
        },
    ]);
    let err = compile(&doc.into()).unwrap_err();
    assert_eq!(err, CompileError::UnsupportedNodeKind("Mixin".to_owned()));
    assert_eq!(err.to_string(), "unsupported node kind `Mixin`");
}

#[test]
fn nested_unsupported_node_fails() {
    let tag = Tag::new("div").child(Node::Unsupported {
        kind: "Case".to_owned(),
    });
    let err = compile(&tag.into()).unwrap_err();
    assert_eq!(err, CompileError::UnsupportedNodeKind("Case".to_owned()));
}

#[test]
fn recursion_limit() {
    let mut node: Node = Node::text("leaf");
    for _ in 0..20 {
        node = Tag::new("div").child(node).into();
    }
    let compiler = Compiler::with_options(CompileOptions::new().recursion_limit(10));
    assert_eq!(
        compiler.compile(&node).unwrap_err(),
        CompileError::RecursionLimitExceeded
    );
    assert!(Compiler::new().compile(&node).is_ok());
}
