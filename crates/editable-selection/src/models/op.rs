use serde::{Deserialize, Serialize};

use crate::models::NodeKey;

/// A single atomic edit recorded by the document model.
///
/// Ops arrive in ordered batches, one batch per logical mutation. `key`
/// names the node the edit happened in; for structural ops that is the
/// parent the child was inserted into or removed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Op {
    InsertText {
        key: NodeKey,
        offset: Option<usize>,
        text: String,
    },
    DeleteText {
        key: NodeKey,
        offset: Option<usize>,
        /// The text that was removed
        text: String,
    },
    InsertNode {
        key: NodeKey,
        offset: Option<usize>,
        node: NodeKey,
    },
    RemoveNode {
        key: NodeKey,
        offset: Option<usize>,
        node: NodeKey,
    },
}

impl Op {
    pub fn key(&self) -> &NodeKey {
        match self {
            Op::InsertText { key, .. }
            | Op::DeleteText { key, .. }
            | Op::InsertNode { key, .. }
            | Op::RemoveNode { key, .. } => key,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Op::InsertText { offset, .. }
            | Op::DeleteText { offset, .. }
            | Op::InsertNode { offset, .. }
            | Op::RemoveNode { offset, .. } => *offset,
        }
    }
}

/// Result of one mutation: the node it touched and the ops it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub node: NodeKey,
    pub ops: Vec<Op>,
}
