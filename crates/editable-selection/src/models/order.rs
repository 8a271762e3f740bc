use std::cmp::Ordering;

use crate::editing::Position;
use crate::models::{DocumentModel, NodeKey};

/// Child-index path from the root list down to `key`.
///
/// The first element is the index in `root_keys()`. `None` when the node
/// is not reachable from a root.
pub fn path_of(doc: &impl DocumentModel, key: &NodeKey) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    let mut current = key.clone();
    while let Some(parent) = doc.parent(&current) {
        let index = doc
            .node(&parent)?
            .children()
            .iter()
            .position(|child| child == &current)?;
        path.push(index);
        current = parent;
    }
    let root_index = doc.root_keys().iter().position(|root| root == &current)?;
    path.push(root_index);
    path.reverse();
    Some(path)
}

/// Compare two positions in document order.
///
/// Positions inside the same node compare by offset. Otherwise the node
/// paths decide; an ancestor's position is compared through the child
/// index it points at, so `(parent, i)` sits before everything inside
/// child `i` and after everything inside child `i - 1`.
pub fn compare(doc: &impl DocumentModel, a: &Position, b: &Position) -> Option<Ordering> {
    if a.key == b.key {
        return Some(a.offset.cmp(&b.offset));
    }
    let path_a = path_of(doc, &a.key)?;
    let path_b = path_of(doc, &b.key)?;

    let common = path_a
        .iter()
        .zip(&path_b)
        .take_while(|(x, y)| x == y)
        .count();

    match (path_a.get(common), path_b.get(common)) {
        (Some(x), Some(y)) => Some(x.cmp(y)),
        // `a` is an ancestor of `b`
        (None, Some(child)) => Some(if a.offset <= *child {
            Ordering::Less
        } else {
            Ordering::Greater
        }),
        // `b` is an ancestor of `a`
        (Some(child), None) => Some(if b.offset <= *child {
            Ordering::Greater
        } else {
            Ordering::Less
        }),
        (None, None) => Some(Ordering::Equal),
    }
}
