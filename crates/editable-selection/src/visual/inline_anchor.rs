//! Placement of the floating surface shown next to an expanded selection
//! (formatting toolbars and the like).

use serde::Serialize;

use crate::editing::{Range, SelectionEvent};
use crate::models::DocumentModel;
use crate::visual::{ClientRects, Rect};

/// Which side of the selection the surface opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
    pub side: Side,
}

/// Where the surface should anchor for `range`.
///
/// Forward selections anchor below the bottom-right of their last rect,
/// backward ones above the top-left of their first. Without rects the
/// range is collapsed to its focus edge and the bounding box of that edge
/// is used instead; a zero-sized box means there is nothing to point at.
pub fn placement(
    range: &Range,
    doc: &impl DocumentModel,
    geometry: &impl ClientRects,
) -> Option<AnchorPoint> {
    if range.is_collapsed() {
        return None;
    }
    let backward = range.is_backward(doc);
    let side = if backward { Side::Top } else { Side::Bottom };

    let rects = geometry.client_rects(range);
    let rect = if backward {
        rects.first().copied()
    } else {
        rects.last().copied()
    };

    let rect = match rect {
        Some(rect) => rect,
        None => {
            let mut edge = range.clone();
            edge.collapse(backward, doc);
            let bounds = bounding(&geometry.client_rects(&edge))?;
            if bounds.is_empty() {
                return None;
            }
            bounds
        }
    };

    Some(if backward {
        AnchorPoint {
            x: rect.x,
            y: rect.y,
            side,
        }
    } else {
        AnchorPoint {
            x: rect.right(),
            y: rect.bottom(),
            side,
        }
    })
}

fn bounding(rects: &[Rect]) -> Option<Rect> {
    let first = rects.first()?;
    let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.right(), first.bottom());
    for rect in &rects[1..] {
        left = left.min(rect.x);
        top = top.min(rect.y);
        right = right.max(rect.right());
        bottom = bottom.max(rect.bottom());
    }
    Some(Rect::new(left, top, right - left, bottom - top))
}

/// Open/closed state of the floating surface, driven by selection events.
#[derive(Debug, Default)]
pub struct InlineAnchor {
    point: Option<AnchorPoint>,
    /// Pointer is held down on the surface itself
    surface_pressed: bool,
}

impl InlineAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.point.is_some()
    }

    pub fn point(&self) -> Option<&AnchorPoint> {
        self.point.as_ref()
    }

    pub fn set_surface_pressed(&mut self, pressed: bool) {
        self.surface_pressed = pressed;
    }

    pub fn close(&mut self) {
        self.point = None;
    }

    pub fn handle(
        &mut self,
        event: &SelectionEvent,
        doc: &impl DocumentModel,
        geometry: &impl ClientRects,
    ) {
        match event {
            SelectionEvent::SelectEnd(range) => {
                self.point = placement(range, doc, geometry);
            }
            SelectionEvent::SelectStart(_) | SelectionEvent::Blur => {
                if !self.surface_pressed {
                    self.close();
                }
            }
            SelectionEvent::SelectionChange(ranges) => {
                if ranges.first().is_none_or(Range::is_collapsed) {
                    self.close();
                }
            }
            _ => {}
        }
    }
}
