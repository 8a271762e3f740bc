use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use editable_config::SelectionConfig;
use serde::{Deserialize, Serialize};

use crate::editing::{Range, Selection, SelectionError, SelectionEvent};
use crate::models::{MemoryDocument, ModelError, NodeKey, Update};
use crate::visual::{ClientRects, SelectionLayer};

/// One model mutation, as a host (or a replay file) describes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
pub enum Edit {
    InsertText {
        key: NodeKey,
        offset: usize,
        text: String,
    },
    DeleteText {
        key: NodeKey,
        offset: usize,
        count: usize,
    },
    InsertNode {
        #[serde(default)]
        parent: Option<NodeKey>,
        index: usize,
        node: NodeKey,
    },
    RemoveNode {
        node: NodeKey,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Model rejected edit: {0}")]
    Model(#[from] ModelError),
    #[error("Selection out of sync: {0}")]
    Selection(#[from] SelectionError),
}

/// A document and its selection, kept in step.
///
/// Every edit goes to the model first and the resulting update is handed to
/// the selection straight away, so the selection never observes a document
/// it was not told about. Selection events are queued and can be drained by
/// the host after each step.
#[derive(Debug)]
pub struct Editor {
    doc: MemoryDocument,
    selection: Selection,
    queue: Rc<RefCell<VecDeque<SelectionEvent>>>,
}

impl Editor {
    pub fn new(doc: MemoryDocument, config: SelectionConfig) -> Self {
        let mut selection = Selection::new(config);
        selection.handle_root_update(&doc);

        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&queue);
        selection.subscribe_all(move |event| sink.borrow_mut().push_back(event.clone()));

        Self {
            doc,
            selection,
            queue,
        }
    }

    pub fn doc(&self) -> &MemoryDocument {
        &self.doc
    }

    /// Direct model access. Structural changes made here are not seen by
    /// the selection; use it for creating detached nodes.
    pub fn doc_mut(&mut self) -> &mut MemoryDocument {
        &mut self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Apply an edit and reconcile the selection with validation
    pub fn apply(&mut self, edit: Edit) -> Result<Update, EditorError> {
        let update = self.mutate(edit)?;
        self.selection
            .apply_update(&self.doc, &update.node, &update.ops)?;
        Ok(update)
    }

    /// Apply an edit and move the caret without validation or events
    pub fn apply_silent(&mut self, edit: Edit) -> Result<Update, EditorError> {
        let update = self.mutate(edit)?;
        self.selection.silent_update(&update.ops);
        Ok(update)
    }

    /// Replace the selection with `range`, validated against the document
    pub fn select(&mut self, range: Range) -> Result<(), SelectionError> {
        self.selection.apply_range(&self.doc, range)
    }

    pub fn flush_frame(&mut self, geometry: &impl ClientRects, layer: &mut impl SelectionLayer) {
        self.selection.flush_frame(&self.doc, geometry, layer);
    }

    /// Selection events published since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    fn mutate(&mut self, edit: Edit) -> Result<Update, ModelError> {
        log::debug!("applying {edit:?}");
        match edit {
            Edit::InsertText { key, offset, text } => self.doc.insert_text(&key, offset, &text),
            Edit::DeleteText { key, offset, count } => self.doc.delete_text(&key, offset, count),
            Edit::InsertNode {
                parent,
                index,
                node,
            } => self.doc.insert_node(parent.as_ref(), index, &node),
            Edit::RemoveNode { node } => self.doc.remove_node(&node),
        }
    }
}
