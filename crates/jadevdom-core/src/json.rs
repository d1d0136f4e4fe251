//! JSON loading for parser output.
//!
//! Parser output uses internally-tagged objects with a `type` field. Unknown
//! tags become [`Node::Unsupported`] rather than a load error.
//!
//! Loading is single pass: each object is read into [`RawNode`], then shaped
//! by its `type`. Nesting depth is left to the compiler's limit; the reader's
//! own depth cap is lifted and the stack grows on demand per node.

use serde::Deserialize;
use serde::de::{self, Deserializer};

use crate::ast::{
    Attribute, Block, Code, Comment, Conditional, Each, Node, Tag, Text, default_each_key,
};

const RED_ZONE: usize = 64 * 1024;
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Error while loading a document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AstError {
    #[error("invalid document JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for AstError {
    fn from(err: serde_json::Error) -> Self {
        AstError::Json(err.to_string())
    }
}

impl Node {
    /// Parse a document from the parser's JSON output.
    pub fn from_json(json: &str) -> Result<Self, AstError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let node = Node::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(node)
    }
}

/// Union of the fields any node type carries. Fields a type does not use are ignored.
#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attrs: Vec<Attribute>,
    #[serde(default)]
    code: Option<Code>,
    #[serde(default)]
    block: Option<Block>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    val: Option<String>,
    #[serde(default)]
    obj: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    test: Option<String>,
    #[serde(default)]
    consequent: Option<Block>,
    #[serde(default)]
    alternate: Option<Box<Node>>,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, move || {
            RawNode::deserialize(deserializer).and_then(RawNode::into_node)
        })
    }
}

impl RawNode {
    fn into_node<E: de::Error>(self) -> Result<Node, E> {
        let node = match self.kind.as_str() {
            "Block" => Node::Block(Block::new(self.nodes)),
            "Tag" => Node::Tag(Tag {
                name: required(self.name, "name")?,
                attrs: self.attrs,
                code: self.code,
                block: self.block.unwrap_or_default(),
            }),
            "Text" => Node::Text(Text {
                val: self.val.unwrap_or_default(),
            }),
            "Code" => Node::Code(Code {
                val: required(self.val, "val")?,
                block: self.block,
            }),
            "Each" => Node::Each(Each {
                obj: required(self.obj, "obj")?,
                val: required(self.val, "val")?,
                key: self.key.unwrap_or_else(default_each_key),
                block: self.block.unwrap_or_default(),
            }),
            "Comment" | "BlockComment" => Node::Comment(Comment {
                val: self.val.unwrap_or_default(),
            }),
            "Conditional" => Node::Conditional(Conditional {
                test: required(self.test, "test")?,
                consequent: self.consequent.unwrap_or_default(),
                alternate: self.alternate,
            }),
            _ => Node::Unsupported { kind: self.kind },
        };
        Ok(node)
    }
}

fn required<T, E: de::Error>(field: Option<T>, name: &'static str) -> Result<T, E> {
    field.ok_or_else(|| de::Error::missing_field(name))
}
