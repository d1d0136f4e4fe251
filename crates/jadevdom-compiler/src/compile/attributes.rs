//! Attribute bucketing for tags.
//!
//! A tag's attributes split into four buckets, in source order:
//! - `class` values, merged into one class array
//! - `data-*` names, camel-cased into the `data` map
//! - `key`, the node identity expression (last one wins)
//! - everything else, into the `attributes` map under its literal name

use indexmap::IndexMap;
use jadevdom_core::Attribute;

use super::state::quote;

/// Bucketed attributes of one tag. Values are raw expression text.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct AttributeSet<'a> {
    pub(super) classes: Vec<&'a str>,
    pub(super) data: IndexMap<String, &'a str>,
    pub(super) attributes: IndexMap<&'a str, &'a str>,
    pub(super) key: Option<&'a str>,
}

impl<'a> AttributeSet<'a> {
    pub(super) fn collect(attrs: &'a [Attribute]) -> Self {
        let mut set = Self::default();
        for attr in attrs {
            let val = attr.val.as_str();
            if attr.name == "class" {
                set.classes.push(val);
            } else if let Some(rest) = attr.name.strip_prefix("data-") {
                set.data.insert(camelize(rest), val);
            } else if attr.name == "key" {
                set.key = Some(val);
            } else {
                set.attributes.insert(attr.name.as_str(), val);
            }
        }
        set
    }

    /// Object-literal fields in emission order; empty buckets are omitted.
    pub(super) fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if !self.classes.is_empty() {
            fields.push(("class", class_expression(&self.classes)));
        }
        if !self.data.is_empty() {
            fields.push(("data", object_literal(self.data.iter().map(|(k, v)| (k.as_str(), *v)))));
        }
        if !self.attributes.is_empty() {
            fields.push((
                "attributes",
                object_literal(self.attributes.iter().map(|(k, v)| (*k, *v))),
            ));
        }
        if let Some(key) = self.key {
            fields.push(("key", key.to_owned()));
        }
        fields
    }
}

/// `foo-bar-baz` to `fooBarBaz`.
pub(super) fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-'
            && let Some(next) = chars.peek().copied()
            && (next.is_alphanumeric() || next == '_')
        {
            chars.next();
            out.extend(next.to_uppercase());
            continue;
        }
        out.push(c);
    }
    out
}

/// Decoded value of a quoted literal spanning all of `expr`, or `None`.
fn string_literal_value(expr: &str) -> Option<String> {
    let quote = expr.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let mut out = String::with_capacity(expr.len());
    let mut chars = expr[1..].chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                '0' => out.push('\0'),
                'u' => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let decoded = u32::from_str_radix(&hex, 16)
                        .ok()
                        .filter(|_| hex.len() == 4)
                        .and_then(char::from_u32)?;
                    out.push(decoded);
                }
                other => out.push(other),
            },
            c if c == quote => return chars.as_str().is_empty().then_some(out),
            c => out.push(c),
        }
    }
    None
}

fn is_array_literal(expr: &str) -> bool {
    expr.starts_with('[')
}

/// Merge class values into one array expression.
///
/// Quoted literals are decoded and split on whitespace into separate entries
/// at compile time. Other scalar expressions, including ones that merely start
/// with a literal, are kept verbatim. Array expressions are appended with
/// `.concat(..)` in source order.
pub(super) fn class_expression(classes: &[&str]) -> String {
    let mut tokens = Vec::new();
    let mut arrays = Vec::new();

    for class in classes.iter().map(|c| c.trim()) {
        if is_array_literal(class) {
            arrays.push(class);
        } else if let Some(value) = string_literal_value(class) {
            tokens.extend(value.split_whitespace().map(quote));
        } else {
            tokens.push(class.to_owned());
        }
    }

    let mut out = format!("[{}]", tokens.join(", "));
    for array in arrays {
        out.push_str(".concat(");
        out.push_str(array);
        out.push(')');
    }
    out
}

fn object_literal<'s>(entries: impl Iterator<Item = (&'s str, &'s str)>) -> String {
    let fields: Vec<String> = entries
        .map(|(key, val)| format!("{}: {}", quote(key), val))
        .collect();
    format!("{{{}}}", fields.join(", "))
}
