pub mod memory;
pub mod node;
pub mod op;
pub mod order;

pub use memory::{MemoryDocument, ModelError, ModelEvent, ModelEventKind};
pub use node::{DocumentModel, NodeKey, NodeRef};
pub use op::{Op, Update};
