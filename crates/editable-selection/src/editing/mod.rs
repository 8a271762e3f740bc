pub mod editor;
pub mod events;
pub mod input;
pub mod interpreter;
pub mod range;
pub mod selection;
pub mod typing;

pub use editor::{Edit, Editor, EditorError};
pub use events::{SelectionEvent, SelectionEventKind};
pub use input::{FocusState, InputEvent, InputSession, InputSignal, KeyInput};
pub use interpreter::derive_range;
pub use range::{Position, Range};
pub use selection::{Selection, SelectionError};
pub use typing::{PointerInput, PointerPhase, Typing, TypingEvent, TypingState};
