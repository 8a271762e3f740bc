use serde::{Deserialize, Serialize};

use crate::editing::Position;
use crate::models::NodeKey;

/// Pointer phase, shared by mouse and touch input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A raw pointer sample, already resolved to a document position by the
/// host. `position` is `None` when the pointer is over something that has
/// no position (padding, a non-editable widget).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Root container the event was delivered to
    pub container: NodeKey,
    pub phase: PointerPhase,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    Idle,
    Selecting,
}

/// Gesture events produced by [`Typing`]
#[derive(Debug, Clone, PartialEq)]
pub enum TypingEvent {
    SelectStart(Position),
    Selecting(Position),
    SelectEnd(Position),
}

/// Turns pointer samples into select-start / selecting / select-end.
#[derive(Debug, Default)]
pub struct Typing {
    state: TypingState,
    containers: Vec<NodeKey>,
}

impl Typing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn containers(&self) -> &[NodeKey] {
        &self.containers
    }

    /// Replace the set of containers input is accepted from
    pub fn bind_containers(&mut self, containers: impl IntoIterator<Item = NodeKey>) {
        self.containers = containers.into_iter().collect();
        log::debug!("typing bound to {} container(s)", self.containers.len());
    }

    pub fn handle(&mut self, input: PointerInput) -> Option<TypingEvent> {
        if !self.containers.contains(&input.container) {
            log::debug!("pointer input from unbound container {}", input.container);
            return None;
        }
        let position = input.position?;

        match (self.state, input.phase) {
            (_, PointerPhase::Down) => {
                self.state = TypingState::Selecting;
                Some(TypingEvent::SelectStart(position))
            }
            (TypingState::Selecting, PointerPhase::Move) => Some(TypingEvent::Selecting(position)),
            (TypingState::Selecting, PointerPhase::Up) => {
                self.state = TypingState::Idle;
                Some(TypingEvent::SelectEnd(position))
            }
            (TypingState::Idle, PointerPhase::Move | PointerPhase::Up) => None,
        }
    }

    /// Unbind every container and forget any gesture in progress
    pub fn destroy(&mut self) {
        self.containers.clear();
        self.state = TypingState::Idle;
    }
}
