use editable_config::SelectionConfig;

use crate::editing::Range;
use crate::models::DocumentModel;
use crate::visual::{ClientRects, DrawRect, FrameScheduler, SelectionLayer};

/// What the selection layer should do on the next frame
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPlan {
    /// No selection at all
    ClearSelection,
    /// A caret exists but the editor is blurred, so it is hidden
    ClearCaret,
    Caret(DrawRect),
    Blocks(Vec<DrawRect>),
    /// Geometry unavailable; leave the layer as it is
    Nothing,
}

#[derive(Debug, Clone, PartialEq)]
struct Frame {
    ranges: Vec<Range>,
    focused: bool,
}

/// Projects the range list onto drawable rectangles, one redraw per frame.
#[derive(Debug)]
pub struct VisualProjector {
    config: SelectionConfig,
    frames: FrameScheduler<Frame>,
}

impl VisualProjector {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            frames: FrameScheduler::new(),
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Ask for a redraw on the next frame, replacing any pending request
    pub fn request(&mut self, ranges: &[Range], focused: bool) {
        self.frames.schedule(Frame {
            ranges: ranges.to_vec(),
            focused,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Frame tick. Draws the pending request, if any, and returns the rect
    /// the input surface should follow.
    pub fn flush_frame(
        &mut self,
        doc: &impl DocumentModel,
        geometry: &impl ClientRects,
        layer: &mut impl SelectionLayer,
    ) -> Option<DrawRect> {
        let frame = self.frames.take()?;
        let plan = self.plan(&frame.ranges, frame.focused, doc, geometry);
        log::trace!("drawing {plan:?}");
        self.draw(plan, layer)
    }

    pub fn plan(
        &self,
        ranges: &[Range],
        focused: bool,
        doc: &impl DocumentModel,
        geometry: &impl ClientRects,
    ) -> DrawPlan {
        let Some(last) = ranges.last() else {
            return DrawPlan::ClearSelection;
        };

        if let Some(collapsed) = ranges.iter().find(|range| range.is_collapsed()) {
            if !focused {
                return DrawPlan::ClearCaret;
            }
            return match geometry.client_rects(collapsed).first() {
                Some(rect) => DrawPlan::Caret(DrawRect::new(
                    rect.x,
                    rect.y,
                    self.config.caret_width,
                    rect.height,
                    self.config.caret_color.as_str(),
                )),
                None => DrawPlan::Nothing,
            };
        }

        let color = if focused {
            &self.config.focus_color
        } else {
            &self.config.blur_color
        };

        let mut rects: Vec<DrawRect> = ranges[..ranges.len() - 1]
            .iter()
            .flat_map(|range| geometry.client_rects(range))
            .map(|rect| DrawRect::from_rect(rect, color.as_str()))
            .collect();

        // Only the last range gets a focus edge
        let mut edge = last.clone();
        edge.collapse(false, doc);
        if let Some(rect) = geometry.client_rects(&edge).first() {
            rects.push(DrawRect::from_rect(*rect, color.as_str()));
        }

        DrawPlan::Blocks(rects)
    }

    /// Apply a plan to the layer; returns the last drawn rect with caret width
    pub fn draw(&self, plan: DrawPlan, layer: &mut impl SelectionLayer) -> Option<DrawRect> {
        match plan {
            DrawPlan::ClearSelection => {
                layer.clear_selection();
                None
            }
            DrawPlan::ClearCaret => {
                layer.clear_caret();
                None
            }
            DrawPlan::Caret(rect) => {
                layer.clear_selection();
                layer.draw_caret(rect.clone());
                Some(rect)
            }
            DrawPlan::Blocks(rects) => {
                layer.clear_selection();
                let follow = rects.last().map(|rect| DrawRect {
                    width: self.config.caret_width,
                    ..rect.clone()
                });
                if !rects.is_empty() {
                    layer.draw_blocks(rects);
                }
                follow
            }
            DrawPlan::Nothing => None,
        }
    }

    /// Drop any pending redraw and wipe the layer
    pub fn destroy(&mut self, layer: &mut impl SelectionLayer) {
        self.frames.cancel();
        layer.clear_selection();
    }
}
