use crate::editing::{Position, Range};
use crate::models::Op;

/// Derive where the caret should sit after an op batch was applied.
///
/// Only the last op of the batch is consulted; a batch is atomic from the
/// selection's point of view. Returns `None` when the last op carries no
/// positional meaning, including structural node inserts and removals.
pub fn derive_range(ops: &[Op]) -> Option<Range> {
    let last = ops.last()?;
    match last {
        Op::InsertText { key, offset, text } => {
            let offset = (*offset)? + text.chars().count();
            Some(Range::caret(Position::new(key.clone(), offset)))
        }
        Op::DeleteText { key, offset, .. } => {
            Some(Range::caret(Position::new(key.clone(), (*offset)?)))
        }
        // TODO: decide where the caret goes after a structural insert; until
        // then the previous selection is left as is.
        Op::InsertNode { .. } | Op::RemoveNode { .. } => None,
    }
}
