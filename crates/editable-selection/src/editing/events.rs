use crate::editing::{KeyInput, Position, Range};
use crate::events::Tagged;

/// Everything the selection controller publishes
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The full range list after a change (never just the delta)
    SelectionChange(Vec<Range>),
    SelectStart(Position),
    Selecting(Range),
    SelectEnd(Range),
    Focus,
    Blur,
    CompositionStart(String),
    CompositionEnd(String),
    /// Text committed by the input surface
    ValueChange(String),
    KeyDown(KeyInput),
    KeyUp(KeyInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionEventKind {
    SelectionChange,
    SelectStart,
    Selecting,
    SelectEnd,
    Focus,
    Blur,
    CompositionStart,
    CompositionEnd,
    ValueChange,
    KeyDown,
    KeyUp,
}

impl Tagged for SelectionEvent {
    type Kind = SelectionEventKind;

    fn kind(&self) -> SelectionEventKind {
        match self {
            SelectionEvent::SelectionChange(_) => SelectionEventKind::SelectionChange,
            SelectionEvent::SelectStart(_) => SelectionEventKind::SelectStart,
            SelectionEvent::Selecting(_) => SelectionEventKind::Selecting,
            SelectionEvent::SelectEnd(_) => SelectionEventKind::SelectEnd,
            SelectionEvent::Focus => SelectionEventKind::Focus,
            SelectionEvent::Blur => SelectionEventKind::Blur,
            SelectionEvent::CompositionStart(_) => SelectionEventKind::CompositionStart,
            SelectionEvent::CompositionEnd(_) => SelectionEventKind::CompositionEnd,
            SelectionEvent::ValueChange(_) => SelectionEventKind::ValueChange,
            SelectionEvent::KeyDown(_) => SelectionEventKind::KeyDown,
            SelectionEvent::KeyUp(_) => SelectionEventKind::KeyUp,
        }
    }
}
