use jadevdom_core::Tag;

use super::attributes::{AttributeSet, camelize, class_expression};

#[test]
fn camelize_data_names() {
    assert_eq!(camelize("foo"), "foo");
    assert_eq!(camelize("foo-bar"), "fooBar");
    assert_eq!(camelize("foo-bar-baz"), "fooBarBaz");
    assert_eq!(camelize("x-1"), "x1");
    assert_eq!(camelize("trailing-"), "trailing-");
}

#[test]
fn class_literals_split_on_whitespace() {
    assert_eq!(class_expression(&["'class'", "\"attrclass space\""]), r#"["class", "attrclass", "space"]"#);
}

#[test]
fn class_literal_escapes_are_decoded_once() {
    assert_eq!(class_expression(&[r#""a\"b c""#]), r#"["a\"b", "c"]"#);
    assert_eq!(class_expression(&[r"'it\'s \u0041'"]), r#"["it's", "A"]"#);
}

#[test]
fn class_expressions_starting_with_a_literal_kept_verbatim() {
    assert_eq!(class_expression(&["'a' + b"]), r#"['a' + b]"#);
}

#[test]
fn class_arrays_are_concatenated() {
    assert_eq!(
        class_expression(&["'class'", "'second'", "[\"attrclass\", computed]"]),
        r#"["class", "second"].concat(["attrclass", computed])"#
    );
}

#[test]
fn class_expressions_kept_verbatim() {
    assert_eq!(class_expression(&["'class'", "computed"]), r#"["class", computed]"#);
}

#[test]
fn collect_buckets() {
    let tag = Tag::new("div")
        .attr("class", "'a'")
        .attr("data-foo", "computed")
        .attr("data-foo-bar", "\"foobar\"")
        .attr("aria-label", "'x'")
        .attr("key", "first")
        .attr("key", "second");
    let set = AttributeSet::collect(&tag.attrs);

    assert_eq!(set.classes, ["'a'"]);
    assert_eq!(set.data.keys().collect::<Vec<_>>(), ["foo", "fooBar"]);
    assert_eq!(set.attributes.get("aria-label"), Some(&"'x'"));
    assert_eq!(set.key, Some("second"));
}

#[test]
fn repeated_attribute_keeps_first_position() {
    let tag = Tag::new("input")
        .attr("type", "'text'")
        .attr("name", "'q'")
        .attr("type", "'search'");
    let set = AttributeSet::collect(&tag.attrs);

    let entries: Vec<_> = set.attributes.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, [("type", "'search'"), ("name", "'q'")]);
}

#[test]
fn fields_omit_empty_buckets() {
    let tag = Tag::new("div").attr("data-a-b", "1");
    let fields = AttributeSet::collect(&tag.attrs).fields();
    assert_eq!(fields, [("data", r#"{"aB": 1}"#.to_owned())]);
}
