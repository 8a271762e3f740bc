use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{DocumentModel, NodeKey, order};

/// A location inside a node: a char offset for text nodes, a child index
/// for elements. Not validated on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub key: NodeKey,
    pub offset: usize,
}

impl Position {
    pub fn new(key: impl Into<NodeKey>, offset: usize) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }
}

/// A span between where a selection started (`anchor`) and where it
/// currently ends (`focus`). The focus may sit before the anchor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Position,
    pub focus: Position,
}

impl Range {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed range sitting at `position`
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// True when the focus precedes the anchor in document order. Ranges
    /// touching nodes that are no longer reachable are never backward.
    pub fn is_backward(&self, doc: &impl DocumentModel) -> bool {
        order::compare(doc, &self.focus, &self.anchor) == Some(Ordering::Less)
    }

    /// `(start, end)` in document order
    pub fn edges(&self, doc: &impl DocumentModel) -> (&Position, &Position) {
        if self.is_backward(doc) {
            (&self.focus, &self.anchor)
        } else {
            (&self.anchor, &self.focus)
        }
    }

    /// Reduce the range to its start (`to_start`) or its end edge
    pub fn collapse(&mut self, to_start: bool, doc: &impl DocumentModel) {
        let (start, end) = self.edges(doc);
        let edge = if to_start { start.clone() } else { end.clone() };
        self.anchor = edge.clone();
        self.focus = edge;
    }
}

impl From<Position> for Range {
    fn from(position: Position) -> Self {
        Self::caret(position)
    }
}
