use std::collections::HashMap;

use crate::events::{Emitter, SubscriptionId, Tagged};
use crate::models::{DocumentModel, NodeKey, NodeRef, Op, Update};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeKey),
    #[error("node {0} is not a text node")]
    NotText(NodeKey),
    #[error("node {0} is not an element")]
    NotElement(NodeKey),
    #[error("offset {offset} out of range for node {key} (length {len})")]
    OffsetOutOfRange {
        key: NodeKey,
        offset: usize,
        len: usize,
    },
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeKey),
    #[error("node {0} already exists")]
    DuplicateKey(NodeKey),
    #[error("node {0} cannot be inserted into its own subtree")]
    Cycle(NodeKey),
}

/// Notification published after every mutation batch
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    NodeUpdate(Update),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelEventKind {
    NodeUpdate,
}

impl Tagged for ModelEvent {
    type Kind = ModelEventKind;

    fn kind(&self) -> ModelEventKind {
        match self {
            ModelEvent::NodeUpdate(_) => ModelEventKind::NodeUpdate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NodeContent {
    Text(String),
    Element(Vec<NodeKey>),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    content: NodeContent,
    parent: Option<NodeKey>,
}

/// Arena-backed document tree.
///
/// Nodes live in a map keyed by [`NodeKey`]; structure is expressed through
/// parent links and ordered child key lists. Nodes can exist detached (no
/// parent, not in the root list), which is how fresh nodes start out and
/// where removed nodes end up.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: HashMap<NodeKey, NodeEntry>,
    roots: Vec<NodeKey>,
    events: Emitter<ModelEvent>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document whose root list is one element per paragraph, each
    /// holding a single text node. Returns the text node keys.
    pub fn from_paragraphs<'a>(paragraphs: impl IntoIterator<Item = &'a str>) -> (Self, Vec<NodeKey>) {
        let mut doc = Self::new();
        let mut texts = Vec::new();
        for paragraph in paragraphs {
            let element = doc.create_element();
            let text = doc.create_text(paragraph);
            doc.attach(&element, &text);
            doc.roots.push(element);
            texts.push(text);
        }
        (doc, texts)
    }

    /// Create a detached text node with a generated key
    pub fn create_text(&mut self, text: &str) -> NodeKey {
        let key = NodeKey::generate();
        self.nodes.insert(
            key.clone(),
            NodeEntry {
                content: NodeContent::Text(text.to_string()),
                parent: None,
            },
        );
        key
    }

    /// Create a detached, empty element with a generated key
    pub fn create_element(&mut self) -> NodeKey {
        let key = NodeKey::generate();
        self.nodes.insert(
            key.clone(),
            NodeEntry {
                content: NodeContent::Element(Vec::new()),
                parent: None,
            },
        );
        key
    }

    /// Create a detached text node under a caller-chosen key
    pub fn create_text_with_key(&mut self, key: NodeKey, text: &str) -> Result<(), ModelError> {
        self.insert_entry(key, NodeContent::Text(text.to_string()))
    }

    /// Create a detached, empty element under a caller-chosen key
    pub fn create_element_with_key(&mut self, key: NodeKey) -> Result<(), ModelError> {
        self.insert_entry(key, NodeContent::Element(Vec::new()))
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&ModelEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(ModelEventKind::NodeUpdate, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Full text of a text node
    pub fn text(&self, key: &NodeKey) -> Option<&str> {
        match &self.nodes.get(key)?.content {
            NodeContent::Text(text) => Some(text),
            NodeContent::Element(_) => None,
        }
    }

    /// Insert `text` at char offset `offset` of a text node
    pub fn insert_text(
        &mut self,
        key: &NodeKey,
        offset: usize,
        text: &str,
    ) -> Result<Update, ModelError> {
        let current = self.text_mut(key)?;
        let len = current.chars().count();
        if offset > len {
            return Err(ModelError::OffsetOutOfRange {
                key: key.clone(),
                offset,
                len,
            });
        }
        let at = byte_index(current, offset);
        current.insert_str(at, text);

        Ok(self.publish(
            key.clone(),
            vec![Op::InsertText {
                key: key.clone(),
                offset: Some(offset),
                text: text.to_string(),
            }],
        ))
    }

    /// Delete `count` chars starting at char offset `offset` of a text node
    pub fn delete_text(
        &mut self,
        key: &NodeKey,
        offset: usize,
        count: usize,
    ) -> Result<Update, ModelError> {
        let current = self.text_mut(key)?;
        let len = current.chars().count();
        let end = offset.saturating_add(count);
        if end > len {
            return Err(ModelError::OffsetOutOfRange {
                key: key.clone(),
                offset: end,
                len,
            });
        }
        let start_byte = byte_index(current, offset);
        let end_byte = byte_index(current, end);
        let removed: String = current.drain(start_byte..end_byte).collect();

        Ok(self.publish(
            key.clone(),
            vec![Op::DeleteText {
                key: key.clone(),
                offset: Some(offset),
                text: removed,
            }],
        ))
    }

    /// Attach a detached node as child `index` of `parent`, or at position
    /// `index` of the root list when `parent` is `None`.
    pub fn insert_node(
        &mut self,
        parent: Option<&NodeKey>,
        index: usize,
        node: &NodeKey,
    ) -> Result<Update, ModelError> {
        let entry = self
            .nodes
            .get(node)
            .ok_or_else(|| ModelError::UnknownNode(node.clone()))?;
        if entry.parent.is_some() || self.roots.contains(node) {
            return Err(ModelError::AlreadyAttached(node.clone()));
        }

        if let Some(parent_key) = parent
            && self.is_within(parent_key, node)
        {
            return Err(ModelError::Cycle(node.clone()));
        }

        let op_key = match parent {
            Some(parent_key) => {
                let children = self.children_mut(parent_key)?;
                if index > children.len() {
                    return Err(ModelError::OffsetOutOfRange {
                        key: parent_key.clone(),
                        offset: index,
                        len: children.len(),
                    });
                }
                children.insert(index, node.clone());
                if let Some(entry) = self.nodes.get_mut(node) {
                    entry.parent = Some(parent_key.clone());
                }
                parent_key.clone()
            }
            None => {
                if index > self.roots.len() {
                    return Err(ModelError::OffsetOutOfRange {
                        key: node.clone(),
                        offset: index,
                        len: self.roots.len(),
                    });
                }
                self.roots.insert(index, node.clone());
                node.clone()
            }
        };

        Ok(self.publish(
            node.clone(),
            vec![Op::InsertNode {
                key: op_key,
                offset: Some(index),
                node: node.clone(),
            }],
        ))
    }

    /// Detach a node (and with it its subtree) from the tree. The node stays
    /// in the arena, detached, so it can be inserted again.
    pub fn remove_node(&mut self, node: &NodeKey) -> Result<Update, ModelError> {
        let parent = self
            .nodes
            .get(node)
            .ok_or_else(|| ModelError::UnknownNode(node.clone()))?
            .parent
            .clone();

        let (op_key, index) = match parent {
            Some(parent_key) => {
                let children = self.children_mut(&parent_key)?;
                let index = children.iter().position(|child| child == node);
                if let Some(index) = index {
                    children.remove(index);
                }
                if let Some(entry) = self.nodes.get_mut(node) {
                    entry.parent = None;
                }
                (parent_key, index)
            }
            None => {
                let index = self.roots.iter().position(|root| root == node);
                if let Some(index) = index {
                    self.roots.remove(index);
                }
                (node.clone(), index)
            }
        };

        Ok(self.publish(
            node.clone(),
            vec![Op::RemoveNode {
                key: op_key,
                offset: index,
                node: node.clone(),
            }],
        ))
    }

    /// True when the node can be reached from the root list
    pub fn is_attached(&self, key: &NodeKey) -> bool {
        let mut current = key.clone();
        loop {
            match self.nodes.get(&current) {
                None => return false,
                Some(entry) => match &entry.parent {
                    Some(parent) => current = parent.clone(),
                    None => return self.roots.contains(&current),
                },
            }
        }
    }

    /// True when `key` is `ancestor` or sits somewhere below it
    fn is_within(&self, key: &NodeKey, ancestor: &NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|entry| entry.parent.as_ref());
        }
        false
    }

    fn insert_entry(&mut self, key: NodeKey, content: NodeContent) -> Result<(), ModelError> {
        if self.nodes.contains_key(&key) {
            return Err(ModelError::DuplicateKey(key));
        }
        self.nodes.insert(
            key,
            NodeEntry {
                content,
                parent: None,
            },
        );
        Ok(())
    }

    fn attach(&mut self, parent: &NodeKey, child: &NodeKey) {
        if let Some(NodeEntry {
            content: NodeContent::Element(children),
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.push(child.clone());
        }
        if let Some(entry) = self.nodes.get_mut(child) {
            entry.parent = Some(parent.clone());
        }
    }

    fn text_mut(&mut self, key: &NodeKey) -> Result<&mut String, ModelError> {
        match self.nodes.get_mut(key) {
            None => Err(ModelError::UnknownNode(key.clone())),
            Some(NodeEntry {
                content: NodeContent::Text(text),
                ..
            }) => Ok(text),
            Some(_) => Err(ModelError::NotText(key.clone())),
        }
    }

    fn children_mut(&mut self, key: &NodeKey) -> Result<&mut Vec<NodeKey>, ModelError> {
        match self.nodes.get_mut(key) {
            None => Err(ModelError::UnknownNode(key.clone())),
            Some(NodeEntry {
                content: NodeContent::Element(children),
                ..
            }) => Ok(children),
            Some(_) => Err(ModelError::NotElement(key.clone())),
        }
    }

    fn publish(&mut self, node: NodeKey, ops: Vec<Op>) -> Update {
        let update = Update { node, ops };
        log::debug!("node {} updated with {} op(s)", update.node, update.ops.len());
        self.events.emit(&ModelEvent::NodeUpdate(update.clone()));
        update
    }
}

impl DocumentModel for MemoryDocument {
    /// Only nodes reachable from the root list are live
    fn node(&self, key: &NodeKey) -> Option<NodeRef<'_>> {
        if !self.is_attached(key) {
            return None;
        }
        let (key, entry) = self.nodes.get_key_value(key)?;
        Some(match &entry.content {
            NodeContent::Text(text) => NodeRef::Text { key, text },
            NodeContent::Element(children) => NodeRef::Element { key, children },
        })
    }

    fn parent(&self, key: &NodeKey) -> Option<NodeKey> {
        self.nodes.get(key)?.parent.clone()
    }

    fn root_keys(&self) -> Vec<NodeKey> {
        self.roots.clone()
    }
}

/// Byte index of the `offset`-th char, clamped to the end of the string
fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
