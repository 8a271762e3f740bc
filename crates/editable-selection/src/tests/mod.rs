//! Shared fixtures for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::editing::{Position, Selection, SelectionEvent, SelectionEventKind};
use crate::events::Tagged;
use crate::visual::{DrawRect, SelectionLayer};

pub fn pos(key: &str, offset: usize) -> Position {
    Position::new(key, offset)
}

/// Selection layer that records every call
#[derive(Debug, Default)]
pub struct RecordingLayer {
    pub calls: Vec<String>,
    pub carets: Vec<DrawRect>,
    pub blocks: Vec<Vec<DrawRect>>,
}

impl SelectionLayer for RecordingLayer {
    fn draw_caret(&mut self, rect: DrawRect) {
        self.calls.push("draw_caret".to_string());
        self.carets.push(rect);
    }

    fn draw_blocks(&mut self, rects: Vec<DrawRect>) {
        self.calls.push(format!("draw_blocks({})", rects.len()));
        self.blocks.push(rects);
    }

    fn clear_selection(&mut self) {
        self.calls.push("clear_selection".to_string());
    }

    fn clear_caret(&mut self) {
        self.calls.push("clear_caret".to_string());
    }
}

/// Collects every event a selection publishes
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<SelectionEvent>>>);

impl EventLog {
    pub fn attach(selection: &mut Selection) -> Self {
        let log = Self::default();
        let sink = Rc::clone(&log.0);
        selection.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    pub fn events(&self) -> Vec<SelectionEvent> {
        self.0.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<SelectionEventKind> {
        self.0.borrow().iter().map(Tagged::kind).collect()
    }

    pub fn count(&self, kind: SelectionEventKind) -> usize {
        self.0.borrow().iter().filter(|event| event.kind() == kind).count()
    }
}
