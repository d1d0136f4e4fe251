//! Template document AST.
//!
//! The external parser produces this tree once; nothing in jadevdom mutates it.
//! Expression-bearing fields (`Attribute::val`, `Code::val`, `Each::obj`, ...)
//! hold unevaluated source text in the generated-code expression language.

use serde::Deserialize;

/// A node of the template document.
///
/// `Unsupported` carries the `type` name of any parser node jadevdom has no
/// handler for. It only exists so the compiler can reject it with a precise
/// error instead of failing at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    Tag(Tag),
    Text(Text),
    Code(Code),
    Each(Each),
    Comment(Comment),
    Conditional(Conditional),
    Unsupported { kind: String },
}

impl Node {
    /// Node variant name, matching the parser's `type` field.
    pub fn kind(&self) -> &str {
        match self {
            Node::Block(_) => "Block",
            Node::Tag(_) => "Tag",
            Node::Text(_) => "Text",
            Node::Code(_) => "Code",
            Node::Each(_) => "Each",
            Node::Comment(_) => "Comment",
            Node::Conditional(_) => "Conditional",
            Node::Unsupported { kind } => kind,
        }
    }

    pub fn text(val: impl Into<String>) -> Self {
        Node::Text(Text { val: val.into() })
    }

    pub fn code(val: impl Into<String>) -> Self {
        Node::Code(Code::new(val))
    }

    pub fn comment(val: impl Into<String>) -> Self {
        Node::Comment(Comment { val: val.into() })
    }
}

/// Ordered sequence of sibling nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl From<Vec<Node>> for Block {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

/// Element with attributes and content.
///
/// `code` is the inline expression child (`div= expr`); when present the
/// nested `block` is not compiled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<Attribute>,
    #[serde(default)]
    pub code: Option<Code>,
    #[serde(default)]
    pub block: Block,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            code: None,
            block: Block::default(),
        }
    }

    /// Append an attribute. `val` is expression text, so string values keep their quotes.
    pub fn attr(mut self, name: impl Into<String>, val: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            val: val.into(),
        });
        self
    }

    pub fn code(mut self, val: impl Into<String>) -> Self {
        self.code = Some(Code::new(val));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.block.nodes.push(node.into());
        self
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Node::Tag(tag)
    }
}

/// Tag attribute; `val` is unevaluated expression text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub val: String,
}

/// Literal text, possibly containing `#{expr}` interpolations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub val: String,
}

/// Embedded statement or expression.
///
/// Flat conditional chains arrive as adjacent `Code` siblings whose text
/// starts with `if`, `else if` or `else`, each carrying its branch in `block`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Code {
    pub val: String,
    #[serde(default)]
    pub block: Option<Block>,
}

impl Code {
    pub fn new(val: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            block: None,
        }
    }

    pub fn block(mut self, block: impl Into<Block>) -> Self {
        self.block = Some(block.into());
        self
    }
}

impl From<Code> for Node {
    fn from(code: Code) -> Self {
        Node::Code(code)
    }
}

/// Loop over `obj`, binding each item to `val` and its index or key to `key`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Each {
    pub obj: String,
    pub val: String,
    #[serde(default = "default_each_key")]
    pub key: String,
    #[serde(default)]
    pub block: Block,
}

pub(crate) fn default_each_key() -> String {
    "$index".to_owned()
}

impl Each {
    pub fn new(obj: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            obj: obj.into(),
            val: val.into(),
            key: default_each_key(),
            block: Block::default(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn block(mut self, block: impl Into<Block>) -> Self {
        self.block = block.into();
        self
    }
}

impl From<Each> for Node {
    fn from(each: Each) -> Self {
        Node::Each(each)
    }
}

/// Source comment. Occupies a slot in its sequence but contributes no content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub val: String,
}

/// Structural conditional: `test ? consequent : alternate`.
///
/// `alternate` is another `Conditional` for `else if` chains, or a `Block`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conditional {
    pub test: String,
    #[serde(default)]
    pub consequent: Block,
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
}

impl Conditional {
    pub fn new(test: impl Into<String>, consequent: impl Into<Block>) -> Self {
        Self {
            test: test.into(),
            consequent: consequent.into(),
            alternate: None,
        }
    }

    pub fn alternate(mut self, node: impl Into<Node>) -> Self {
        self.alternate = Some(Box::new(node.into()));
        self
    }
}

impl From<Conditional> for Node {
    fn from(cond: Conditional) -> Self {
        Node::Conditional(cond)
    }
}
