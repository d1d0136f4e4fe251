//! jq-style JSON formatting.
//!
//! Color scheme:
//! - Keys: Blue
//! - String values: Green
//! - Numbers, booleans: Normal
//! - null: Dim
//! - Structure `{}[]:,`: Dim

use jadevdom_core::Colors;

pub fn format_json(value: &serde_json::Value, pretty: bool, colors: Colors) -> String {
    let mut out = String::new();
    format_value(&mut out, value, &colors, pretty, 0);
    out
}

fn format_value(out: &mut String, value: &serde_json::Value, c: &Colors, pretty: bool, indent: usize) {
    match value {
        serde_json::Value::Null => {
            out.push_str(c.dim);
            out.push_str("null");
            out.push_str(c.reset);
        }
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&n.to_string()),
        serde_json::Value::String(s) => {
            out.push_str(c.green);
            out.push_str(&quoted(s));
            out.push_str(c.reset);
        }
        serde_json::Value::Array(items) => format_array(out, items, c, pretty, indent),
        serde_json::Value::Object(fields) => format_object(out, fields, c, pretty, indent),
    }
}

fn punct(out: &mut String, c: &Colors, ch: char) {
    out.push_str(c.dim);
    out.push(ch);
    out.push_str(c.reset);
}

fn newline(out: &mut String, pretty: bool, indent: usize) {
    if pretty {
        out.push('\n');
        out.push_str(&" ".repeat(indent));
    }
}

fn format_array(out: &mut String, items: &[serde_json::Value], c: &Colors, pretty: bool, indent: usize) {
    punct(out, c, '[');
    if items.is_empty() {
        punct(out, c, ']');
        return;
    }

    let elem_indent = if pretty { indent + 2 } else { 0 };
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            punct(out, c, ',');
        }
        newline(out, pretty, elem_indent);
        format_value(out, item, c, pretty, elem_indent);
    }

    newline(out, pretty, indent);
    punct(out, c, ']');
}

fn format_object(
    out: &mut String,
    fields: &serde_json::Map<String, serde_json::Value>,
    c: &Colors,
    pretty: bool,
    indent: usize,
) {
    punct(out, c, '{');
    if fields.is_empty() {
        punct(out, c, '}');
        return;
    }

    let field_indent = if pretty { indent + 2 } else { 0 };
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            punct(out, c, ',');
        }
        newline(out, pretty, field_indent);

        out.push_str(c.blue);
        out.push_str(&quoted(key));
        out.push_str(c.reset);
        punct(out, c, ':');
        if pretty {
            out.push(' ');
        }

        format_value(out, value, c, pretty, field_indent);
    }

    newline(out, pretty, indent);
    punct(out, c, '}');
}

fn quoted(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
