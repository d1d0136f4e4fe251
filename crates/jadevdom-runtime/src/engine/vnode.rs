//! Typed virtual nodes and the conversion from evaluated values.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use jadevdom_core::Colors;

use super::error::RuntimeError;
use super::format::format_json;
use super::stack;
use super::value::Value;

/// The value a rendered template describes.
#[derive(Clone, Debug, PartialEq)]
pub enum VNode {
    Undefined,
    Text(String),
    List(Vec<VNode>),
    Element(Element),
}

/// An element node. Absent fields are `None`, never empty placeholders.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub class: Option<Vec<String>>,
    pub data: Option<IndexMap<String, serde_json::Value>>,
    pub attributes: Option<IndexMap<String, serde_json::Value>>,
    pub key: Option<String>,
    pub children: Option<Box<VNode>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: None,
            data: None,
            attributes: None,
            key: None,
            children: None,
        }
    }
}

impl VNode {
    /// Convert an evaluated body into a virtual node.
    pub fn from_value(value: &Value) -> Result<Self, RuntimeError> {
        stack::grow(|| Self::convert(value))
    }

    fn convert(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            // `null` has the same JSON form as `undefined`.
            Value::Undefined | Value::Null => Ok(VNode::Undefined),
            Value::String(s) => Ok(VNode::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(VNode::from_value)
                .collect::<Result<_, _>>()
                .map(VNode::List),
            Value::Object(fields) => element(fields).map(VNode::Element),
            other => Err(RuntimeError::InvalidNode(format!(
                "a {} is not a node",
                other.type_of()
            ))),
        }
    }

    /// Wire-shape JSON: elements as objects with only their present fields.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            VNode::Undefined => serde_json::Value::Null,
            VNode::Text(s) => serde_json::Value::String(s.clone()),
            VNode::List(items) => {
                serde_json::Value::Array(items.iter().map(VNode::to_value).collect())
            }
            VNode::Element(el) => {
                let mut map = serde_json::Map::new();
                map.insert("tag".to_owned(), el.tag.clone().into());
                if let Some(class) = &el.class {
                    map.insert("class".to_owned(), class.clone().into());
                }
                if let Some(data) = &el.data {
                    map.insert("data".to_owned(), json_object(data));
                }
                if let Some(attributes) = &el.attributes {
                    map.insert("attributes".to_owned(), json_object(attributes));
                }
                if let Some(key) = &el.key {
                    map.insert("key".to_owned(), key.clone().into());
                }
                if let Some(children) = &el.children {
                    map.insert("children".to_owned(), children.to_value());
                }
                serde_json::Value::Object(map)
            }
        }
    }

    /// jq-style JSON, optionally indented and colored.
    pub fn format(&self, pretty: bool, colors: Colors) -> String {
        format_json(&self.to_value(), pretty, colors)
    }
}

impl Serialize for VNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

fn json_object(map: &IndexMap<String, serde_json::Value>) -> serde_json::Value {
    serde_json::Value::Object(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

fn element(fields: &IndexMap<String, Value>) -> Result<Element, RuntimeError> {
    let tag = match fields.get("tag") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(RuntimeError::InvalidNode(format!(
                "element tag must be a string, found {}",
                other.type_of()
            )));
        }
        None => return Err(RuntimeError::InvalidNode("element has no tag".to_owned())),
    };

    let mut el = Element::new(tag);
    for (name, value) in fields {
        match name.as_str() {
            "tag" => {}
            "class" => el.class = Some(class_list(value)?),
            "data" => el.data = Some(string_map(name, value)?),
            "attributes" => el.attributes = Some(string_map(name, value)?),
            "key" if !matches!(value, Value::Undefined) => el.key = Some(value.to_display_string()),
            "children" if !matches!(value, Value::Undefined) => {
                el.children = Some(Box::new(VNode::from_value(value)?));
            }
            "key" | "children" => {}
            other => {
                return Err(RuntimeError::InvalidNode(format!(
                    "unknown element field `{other}`"
                )));
            }
        }
    }
    Ok(el)
}

/// Class entries: nullish ones are dropped, the rest stringified.
fn class_list(value: &Value) -> Result<Vec<String>, RuntimeError> {
    let Value::Array(items) = value else {
        return Err(RuntimeError::InvalidNode(format!(
            "element class must be an array, found {}",
            value.type_of()
        )));
    };
    Ok(items
        .iter()
        .filter(|item| !item.is_nullish())
        .map(Value::to_display_string)
        .collect())
}

fn string_map(
    field: &str,
    value: &Value,
) -> Result<IndexMap<String, serde_json::Value>, RuntimeError> {
    let Value::Object(entries) = value else {
        return Err(RuntimeError::InvalidNode(format!(
            "element {field} must be an object, found {}",
            value.type_of()
        )));
    };
    Ok(entries
        .iter()
        .filter(|(_, v)| !matches!(v, Value::Undefined | Value::Function(_)))
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect())
}
