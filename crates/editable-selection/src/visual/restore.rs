use std::collections::HashMap;

use crate::models::NodeKey;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RestoreEntry {
    /// Bumped on every restore request; renderers key node content on it
    content_key: u64,
    queued: bool,
}

/// Per-node "restore" bookkeeping for rendered nodes.
///
/// When the host notices a node's rendered content drifted from the model
/// (an IME wrote into it, say) it asks for a restore: the node's content key
/// is bumped and one re-render is queued for the next frame. Further
/// requests before that frame are absorbed by the queued one.
///
/// Nodes must be mounted before they can be restored and are forgotten on
/// unmount.
#[derive(Debug, Default)]
pub struct RestoreRegistry {
    entries: HashMap<NodeKey, RestoreEntry>,
}

impl RestoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, key: NodeKey) {
        self.entries.entry(key).or_default();
    }

    /// Returns false when the node was not mounted
    pub fn unmount(&mut self, key: &NodeKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn is_mounted(&self, key: &NodeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn content_key(&self, key: &NodeKey) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.content_key)
    }

    /// Request a re-render of `key`. Returns false for unmounted nodes.
    pub fn restore(&mut self, key: &NodeKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            log::debug!("restore requested for unmounted node {key}");
            return false;
        };
        if entry.queued {
            return true;
        }
        entry.content_key += 1;
        entry.queued = true;
        true
    }

    /// The node re-rendered on its own; drop its queued request
    pub fn rendered(&mut self, key: &NodeKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.queued = false;
        }
    }

    pub fn is_queued(&self, key: &NodeKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.queued)
    }

    /// Frame tick: keys to re-render, sorted for stable output
    pub fn flush_frame(&mut self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self
            .entries
            .iter_mut()
            .filter(|(_, entry)| entry.queued)
            .map(|(key, entry)| {
                entry.queued = false;
                key.clone()
            })
            .collect();
        keys.sort();
        keys
    }
}
