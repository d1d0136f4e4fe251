use indexmap::IndexMap;
use jadevdom_core::Colors;
use serde_json::json;

use super::error::RuntimeError;
use super::value::Value;
use super::vnode::{Element, VNode};

fn node(json: serde_json::Value) -> Result<VNode, RuntimeError> {
    VNode::from_value(&Value::from_json(&json))
}

#[test]
fn element_with_every_field() {
    let vnode = node(json!({
        "tag": "div",
        "class": ["a", null, "b"],
        "data": {"fooBar": "x"},
        "attributes": {"id": "main"},
        "key": 3,
        "children": "text"
    }))
    .unwrap();

    let mut expected = Element::new("div");
    expected.class = Some(vec!["a".to_owned(), "b".to_owned()]);
    expected.data = Some(IndexMap::from([("fooBar".to_owned(), json!("x"))]));
    expected.attributes = Some(IndexMap::from([("id".to_owned(), json!("main"))]));
    expected.key = Some("3".to_owned());
    expected.children = Some(Box::new(VNode::Text("text".to_owned())));
    assert_eq!(vnode, VNode::Element(expected));
}

#[test]
fn lists_and_holes() {
    let vnode = node(json!([null, "other child", [{"tag": "br"}]])).unwrap();
    assert_eq!(
        vnode,
        VNode::List(vec![
            VNode::Undefined,
            VNode::Text("other child".to_owned()),
            VNode::List(vec![VNode::Element(Element::new("br"))]),
        ])
    );
}

#[test]
fn undefined_fields_are_absent() {
    let value = Value::Object(std::rc::Rc::new(IndexMap::from([
        ("tag".to_owned(), Value::from("p")),
        ("children".to_owned(), Value::Undefined),
        ("key".to_owned(), Value::Undefined),
    ])));
    let vnode = VNode::from_value(&value).unwrap();
    assert_eq!(vnode, VNode::Element(Element::new("p")));
    assert_eq!(vnode.to_value(), json!({"tag": "p"}));
}

#[test]
fn non_nodes_are_rejected() {
    assert_eq!(
        node(json!(1)).unwrap_err(),
        RuntimeError::InvalidNode("a number is not a node".to_owned())
    );
    assert_eq!(
        node(json!({"children": "x"})).unwrap_err(),
        RuntimeError::InvalidNode("element has no tag".to_owned())
    );
    assert_eq!(
        node(json!({"tag": "a", "href": "/"})).unwrap_err(),
        RuntimeError::InvalidNode("unknown element field `href`".to_owned())
    );
    assert_eq!(
        node(json!({"tag": "a", "class": "x"})).unwrap_err(),
        RuntimeError::InvalidNode("element class must be an array, found string".to_owned())
    );
}

#[test]
fn wire_shape_keeps_field_order() {
    let vnode = node(json!({"children": [1], "tag": "ul", "class": ["x"]}));
    // Numbers are not nodes, even inside children.
    assert!(vnode.is_err());

    let vnode = node(json!({"children": ["1"], "tag": "ul", "class": ["x"]})).unwrap();
    assert_eq!(
        serde_json::to_string(&vnode).unwrap(),
        r#"{"tag":"ul","class":["x"],"children":["1"]}"#
    );
}

#[test]
fn format_pretty_and_compact() {
    let vnode = node(json!({"tag": "div", "children": ["a", null]})).unwrap();
    assert_eq!(
        vnode.format(false, Colors::OFF),
        r#"{"tag":"div","children":["a",null]}"#
    );
    insta::assert_snapshot!(vnode.format(true, Colors::OFF), @r#"
    {
      "tag": "div",
      "children": [
        "a",
        null
      ]
    }
    "#);
}
