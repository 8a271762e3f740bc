use std::collections::HashMap;

use crate::editing::{Position, Range};
use crate::models::{DocumentModel, NodeKey};
use crate::visual::{ClientRects, Rect};

/// Monospace layout: every root node is one line, every char one cell.
///
/// Useful wherever real text metrics are not available (replays, tests,
/// benches). Measure again after the document changes.
#[derive(Debug, Clone)]
pub struct GridLayout {
    cell_width: f64,
    line_height: f64,
    /// text node -> (line, column of its first char)
    cells: HashMap<NodeKey, (usize, usize)>,
    line_lengths: Vec<usize>,
}

impl GridLayout {
    pub const DEFAULT_CELL_WIDTH: f64 = 8.0;
    pub const DEFAULT_LINE_HEIGHT: f64 = 16.0;

    pub fn measure(doc: &impl DocumentModel) -> Self {
        Self::measure_with(doc, Self::DEFAULT_CELL_WIDTH, Self::DEFAULT_LINE_HEIGHT)
    }

    pub fn measure_with(doc: &impl DocumentModel, cell_width: f64, line_height: f64) -> Self {
        let mut cells = HashMap::new();
        let mut line_lengths = Vec::new();

        for (line, root) in doc.root_keys().iter().enumerate() {
            let mut column = 0;
            let mut stack = vec![root.clone()];
            while let Some(key) = stack.pop() {
                let Some(node) = doc.node(&key) else {
                    continue;
                };
                if node.is_text() {
                    cells.insert(key.clone(), (line, column));
                    column += node.len();
                } else {
                    stack.extend(node.children().iter().rev().cloned());
                }
            }
            line_lengths.push(column);
        }

        Self {
            cell_width,
            line_height,
            cells,
            line_lengths,
        }
    }

    /// `(line, column)` of a text position
    pub fn locate(&self, position: &Position) -> Option<(usize, usize)> {
        let (line, start) = self.cells.get(&position.key)?;
        Some((*line, start + position.offset))
    }

    fn span(&self, line: usize, from: usize, to: usize) -> Rect {
        Rect::new(
            from as f64 * self.cell_width,
            line as f64 * self.line_height,
            to.saturating_sub(from) as f64 * self.cell_width,
            self.line_height,
        )
    }
}

impl ClientRects for GridLayout {
    fn client_rects(&self, range: &Range) -> Vec<Rect> {
        let (Some(a), Some(b)) = (self.locate(&range.anchor), self.locate(&range.focus)) else {
            return Vec::new();
        };
        let (start, end) = if b < a { (b, a) } else { (a, b) };

        if start.0 == end.0 {
            return vec![self.span(start.0, start.1, end.1)];
        }

        let mut rects = vec![self.span(start.0, start.1, self.line_lengths[start.0])];
        for line in start.0 + 1..end.0 {
            rects.push(self.span(line, 0, self.line_lengths[line]));
        }
        rects.push(self.span(end.0, 0, end.1));
        rects
    }
}
