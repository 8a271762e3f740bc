use serde::{Deserialize, Serialize};

use crate::editing::Range;

/// Axis-aligned rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// A rectangle ready to be painted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl DrawRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: color.into(),
        }
    }

    pub fn from_rect(rect: Rect, color: impl Into<String>) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, color)
    }
}

/// Geometry provider supplied by the rendering side.
///
/// Returns the client rectangles covered by `range`, one per line box it
/// crosses. A collapsed range yields a single zero-width rect at the caret.
/// Unknown or unlaid-out nodes yield no rects.
pub trait ClientRects {
    fn client_rects(&self, range: &Range) -> Vec<Rect>;
}

/// Drawing surface for selection visuals
pub trait SelectionLayer {
    fn draw_caret(&mut self, rect: DrawRect);
    fn draw_blocks(&mut self, rects: Vec<DrawRect>);
    fn clear_selection(&mut self);
    fn clear_caret(&mut self);
}
