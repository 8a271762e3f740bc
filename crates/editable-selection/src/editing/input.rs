use serde::{Deserialize, Serialize};

use crate::models::NodeKey;
use crate::visual::DrawRect;

/// Focus and IME lifecycle of the hidden input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused,
    Composing,
}

impl FocusState {
    pub fn is_focused(self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }
}

/// Raw events from the input surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    Focus,
    Blur,
    CompositionStart(String),
    CompositionUpdate(String),
    CompositionEnd(String),
    /// Text committed outside of a composition
    Text(String),
    KeyDown(KeyInput),
    KeyUp(KeyInput),
}

/// What an accepted input event means to the selection controller
#[derive(Debug, Clone, PartialEq)]
pub enum InputSignal {
    Focus,
    Blur,
    CompositionStart(String),
    CompositionEnd(String),
    Commit(String),
    KeyDown(KeyInput),
    KeyUp(KeyInput),
}

/// Tracks focus and composition, and decides which raw input events are
/// meaningful in the current state.
#[derive(Debug, Default)]
pub struct InputSession {
    state: FocusState,
    containers: Vec<NodeKey>,
    rect: Option<DrawRect>,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn containers(&self) -> &[NodeKey] {
        &self.containers
    }

    pub fn bind_containers(&mut self, containers: impl IntoIterator<Item = NodeKey>) {
        self.containers = containers.into_iter().collect();
    }

    /// Where the input surface was last placed
    pub fn rect(&self) -> Option<&DrawRect> {
        self.rect.as_ref()
    }

    /// Move the input surface so IME popups open next to the caret
    pub fn render(&mut self, rect: DrawRect) {
        self.rect = Some(rect);
    }

    /// Returns the signals to forward, in order. A composition finishing
    /// yields both its end and the committed text.
    pub fn handle(&mut self, event: InputEvent) -> Vec<InputSignal> {
        use FocusState::*;

        match (self.state, event) {
            (Unfocused, InputEvent::Focus) => {
                self.state = Focused;
                vec![InputSignal::Focus]
            }
            // Repeated focus keeps the state but still refreshes the visuals
            (Focused | Composing, InputEvent::Focus) => vec![InputSignal::Focus],
            (_, InputEvent::Blur) => {
                if self.state == Composing {
                    log::debug!("blur abandoned an active composition");
                }
                self.state = Unfocused;
                vec![InputSignal::Blur]
            }
            (Focused, InputEvent::CompositionStart(data)) => {
                self.state = Composing;
                vec![InputSignal::CompositionStart(data)]
            }
            (Composing, InputEvent::CompositionUpdate(_)) => Vec::new(),
            (Composing, InputEvent::CompositionEnd(data)) => {
                self.state = Focused;
                let mut signals = vec![InputSignal::CompositionEnd(data.clone())];
                if !data.is_empty() {
                    signals.push(InputSignal::Commit(data));
                }
                signals
            }
            (Focused, InputEvent::Text(text)) => vec![InputSignal::Commit(text)],
            (Focused | Composing, InputEvent::KeyDown(key)) => vec![InputSignal::KeyDown(key)],
            (Focused | Composing, InputEvent::KeyUp(key)) => vec![InputSignal::KeyUp(key)],
            (state, event) => {
                log::debug!("dropping {event:?} while {state:?}");
                Vec::new()
            }
        }
    }

    pub fn destroy(&mut self) {
        self.containers.clear();
        self.state = FocusState::Unfocused;
        self.rect = None;
    }
}
