use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node in the document model.
///
/// Keys survive edits; every position and every registry entry refers to a
/// node through its key rather than through the node itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Mint a fresh random key
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Borrowed view of a live node, as handed out by a [`DocumentModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Text { key: &'a NodeKey, text: &'a str },
    Element { key: &'a NodeKey, children: &'a [NodeKey] },
}

impl<'a> NodeRef<'a> {
    pub fn key(&self) -> &'a NodeKey {
        match self {
            NodeRef::Text { key, .. } | NodeRef::Element { key, .. } => key,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeRef::Text { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeRef::Element { .. })
    }

    /// Text content, `None` for elements
    pub fn text(&self) -> Option<&'a str> {
        match self {
            NodeRef::Text { text, .. } => Some(text),
            NodeRef::Element { .. } => None,
        }
    }

    pub fn children(&self) -> &'a [NodeKey] {
        match self {
            NodeRef::Text { .. } => &[],
            NodeRef::Element { children, .. } => children,
        }
    }

    pub fn children_size(&self) -> usize {
        self.children().len()
    }

    /// Largest valid offset inside this node: character count for text,
    /// child count for elements.
    pub fn len(&self) -> usize {
        match self {
            NodeRef::Text { text, .. } => text.chars().count(),
            NodeRef::Element { children, .. } => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read access to the document model the selection is laid over.
///
/// The selection never caches nodes; every check goes through these
/// queries against the document as it is right now.
pub trait DocumentModel {
    fn node(&self, key: &NodeKey) -> Option<NodeRef<'_>>;

    /// Parent of the node, `None` for root-level or detached nodes
    fn parent(&self, key: &NodeKey) -> Option<NodeKey>;

    /// Keys of the top-level nodes, in document order
    fn root_keys(&self) -> Vec<NodeKey>;

    fn contains(&self, key: &NodeKey) -> bool {
        self.node(key).is_some()
    }
}
