//! Document model queried by the matcher.
//!
//! Owned trees are built from [`Node`] values; traversal and matching work
//! on the borrowed [`NodeRef`] view, which also names the entry wrappers a
//! cursor passes through.

use std::fmt;

/// How a scalar was written in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub value: String,
    pub style: ScalarStyle,
}

impl Scalar {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub key: String,
    pub value: Node,
}

/// Ordered entries; duplicate keys are kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    pub entries: Vec<MappingEntry>,
}

impl Mapping {
    /// Every entry stored under `key`.
    pub fn get<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a MappingEntry> + 'k
    where
        'a: 'k,
    {
        self.entries.iter().filter(move |e| e.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    pub entries: Vec<SequenceEntry>,
}

impl Sequence {
    /// Position of `entry` among this sequence's entries, by identity.
    pub fn position_of(&self, entry: &SequenceEntry) -> Option<usize> {
        self.entries.iter().position(|e| std::ptr::eq(e, entry))
    }
}

/// A value node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Sequence),
    Scalar(Scalar),
}

impl Node {
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::plain(value))
    }

    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::Mapping(Mapping {
            entries: entries
                .into_iter()
                .map(|(key, value)| MappingEntry {
                    key: key.into(),
                    value,
                })
                .collect(),
        })
    }

    pub fn sequence(values: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(Sequence {
            entries: values
                .into_iter()
                .map(|value| SequenceEntry { value })
                .collect(),
        })
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Mapping(_) | Node::Sequence(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(_) => "scalar",
        }
    }
}

/// One parsed document; the root of every cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }
}

/// Borrowed view over every kind of node a traversal can visit.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Mapping(&'a Mapping),
    MappingEntry(&'a MappingEntry),
    Sequence(&'a Sequence),
    SequenceEntry(&'a SequenceEntry),
    Scalar(&'a Scalar),
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Mapping(m) => NodeRef::Mapping(m),
            Node::Sequence(s) => NodeRef::Sequence(s),
            Node::Scalar(s) => NodeRef::Scalar(s),
        }
    }
}

impl<'a> NodeRef<'a> {
    /// Direct children in document order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Document(d) => vec![NodeRef::from(&d.root)],
            NodeRef::Mapping(m) => m.entries.iter().map(NodeRef::MappingEntry).collect(),
            NodeRef::MappingEntry(e) => vec![NodeRef::from(&e.value)],
            NodeRef::Sequence(s) => s.entries.iter().map(NodeRef::SequenceEntry).collect(),
            NodeRef::SequenceEntry(e) => vec![NodeRef::from(&e.value)],
            NodeRef::Scalar(_) => Vec::new(),
        }
    }

    /// The value this element stands for: the root of a document, the value
    /// of an entry, or the node itself.
    pub fn value(self) -> Option<&'a Node> {
        match self {
            NodeRef::Document(d) => Some(&d.root),
            NodeRef::MappingEntry(e) => Some(&e.value),
            NodeRef::SequenceEntry(e) => Some(&e.value),
            NodeRef::Mapping(_) | NodeRef::Sequence(_) | NodeRef::Scalar(_) => None,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            NodeRef::Document(_) => "document",
            NodeRef::Mapping(_) => "mapping",
            NodeRef::MappingEntry(_) => "mapping-entry",
            NodeRef::Sequence(_) => "sequence",
            NodeRef::SequenceEntry(_) => "sequence-entry",
            NodeRef::Scalar(_) => "scalar",
        }
    }
}

impl fmt::Display for Node {
    /// Scalars print their text; containers print a short summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => f.write_str(&s.value),
            Node::Mapping(m) => write!(f, "<mapping of {}>", m.entries.len()),
            Node::Sequence(s) => write!(f, "<sequence of {}>", s.entries.len()),
        }
    }
}
