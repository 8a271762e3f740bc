use editable_config::{ConsistencyPolicy, SelectionConfig};

use crate::editing::interpreter::derive_range;
use crate::editing::{
    FocusState, InputEvent, InputSession, InputSignal, PointerInput, Position, Range,
    SelectionEvent, SelectionEventKind, Typing, TypingEvent,
};
use crate::events::{Emitter, SubscriptionId};
use crate::models::{DocumentModel, NodeKey, Op};
use crate::visual::{ClientRects, DrawRect, SelectionLayer, VisualProjector};

/// A range that does not fit the live document. Always a desync bug
/// between model and selection, never a user error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("node {0} not found")]
    NodeNotFound(NodeKey),
    #[error("offset {offset} out of range for node {key} (length {len})")]
    OffsetOutOfRange {
        key: NodeKey,
        offset: usize,
        len: usize,
    },
}

/// Authoritative owner of the range list.
///
/// The controller is fed from two sides: the document model reports every
/// mutation batch through [`Selection::apply_update`] (or
/// [`Selection::silent_update`]), and the host forwards raw pointer and
/// input events through [`Selection::handle_pointer`] and
/// [`Selection::handle_input`]. Every change of the list is published as a
/// [`SelectionEvent::SelectionChange`] and schedules a redraw, which the
/// host performs on its next frame via [`Selection::flush_frame`].
///
/// Positions are never cached across calls: validation always runs against
/// the document passed in.
#[derive(Debug)]
pub struct Selection {
    ranges: Vec<Range>,
    /// Where the current drag gesture began
    start: Option<Position>,
    end: Option<Position>,
    consistency: ConsistencyPolicy,
    typing: Typing,
    input: InputSession,
    visual: VisualProjector,
    events: Emitter<SelectionEvent>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl Selection {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            ranges: Vec::new(),
            start: None,
            end: None,
            consistency: config.consistency,
            typing: Typing::new(),
            input: InputSession::new(),
            visual: VisualProjector::new(config),
            events: Emitter::new(),
        }
    }

    // ============ Queries ============

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn range_at(&self, index: usize) -> Option<&Range> {
        self.ranges.get(index)
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Anchor of the first range
    pub fn anchor(&self) -> Option<&Position> {
        self.ranges.first().map(|range| &range.anchor)
    }

    /// Focus of the last range
    pub fn focus(&self) -> Option<&Position> {
        self.ranges.last().map(|range| &range.focus)
    }

    /// Collapsed when the outer bounds coincide: the first and last ranges
    /// share anchor and focus, and the first anchor sits at the last
    /// focus' offset. With a single range this is plain caret detection;
    /// with several, inner ranges are not looked at.
    pub fn is_collapsed(&self) -> bool {
        let (Some(first), Some(last)) = (self.ranges.first(), self.ranges.last()) else {
            return false;
        };
        first.anchor == last.anchor
            && first.focus == last.focus
            && first.anchor.offset == last.focus.offset
    }

    pub fn focus_state(&self) -> FocusState {
        self.input.state()
    }

    pub fn is_focused(&self) -> bool {
        self.input.state().is_focused()
    }

    /// Start and latest position of the drag gesture in progress
    pub fn gesture(&self) -> (Option<&Position>, Option<&Position>) {
        (self.start.as_ref(), self.end.as_ref())
    }

    /// Where the hidden input surface was last moved to
    pub fn input_rect(&self) -> Option<&DrawRect> {
        self.input.rect()
    }

    pub fn typing(&self) -> &Typing {
        &self.typing
    }

    pub fn input(&self) -> &InputSession {
        &self.input
    }

    pub fn visual(&self) -> &VisualProjector {
        &self.visual
    }

    // ============ Subscriptions ============

    pub fn subscribe(
        &mut self,
        kind: SelectionEventKind,
        handler: impl FnMut(&SelectionEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn subscribe_all(&mut self, handler: impl FnMut(&SelectionEvent) + 'static) -> SubscriptionId {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ============ Range list ============

    /// Append a range and publish the whole list
    pub fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
        self.emit_change();
    }

    /// Remove one range; publishes only when something was removed
    pub fn remove_range_at(&mut self, index: usize) -> Option<Range> {
        if index >= self.ranges.len() {
            return None;
        }
        let removed = self.ranges.remove(index);
        self.emit_change();
        Some(removed)
    }

    /// Clear the list; publishes only when it was not already empty
    pub fn remove_all_ranges(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.clear();
        self.emit_change();
    }

    /// Validate `range` against the live document and make it the only
    /// range. On failure the list is left untouched.
    pub fn apply_range(
        &mut self,
        doc: &impl DocumentModel,
        range: Range,
    ) -> Result<(), SelectionError> {
        self.check(doc, &range.anchor)?;
        if !range.is_collapsed() {
            self.check(doc, &range.focus)?;
        }
        self.remove_all_ranges();
        self.add_range(range);
        Ok(())
    }

    /// Reconcile after the model applied `ops` to `node`.
    ///
    /// A node without a parent means the set of roots may have changed, so
    /// input containers are rebound first. The caret implied by the batch
    /// then goes through the validated path. When the batch implies no
    /// caret, the ranges already held are checked against the mutated
    /// document instead and left as they are.
    pub fn apply_update(
        &mut self,
        doc: &impl DocumentModel,
        node: &NodeKey,
        ops: &[Op],
    ) -> Result<(), SelectionError> {
        if doc.parent(node).is_none() {
            self.handle_root_update(doc);
        }
        match derive_range(ops) {
            Some(range) => self.apply_range(doc, range),
            None => self.ranges.iter().try_for_each(|range| {
                self.check(doc, &range.anchor)?;
                self.check(doc, &range.focus)
            }),
        }
    }

    /// Replace the list with the caret implied by `ops`, without validation
    /// and without publishing. Meant for reconciliation while the model is
    /// still mid-mutation; the position comes from the model's own log.
    pub fn silent_update(&mut self, ops: &[Op]) {
        if let Some(range) = derive_range(ops) {
            self.ranges = vec![range];
        }
    }

    /// Rebind pointer and input handling to the current root nodes
    pub fn handle_root_update(&mut self, doc: &impl DocumentModel) {
        let roots = doc.root_keys();
        log::debug!("rebinding selection to {} root(s)", roots.len());
        self.typing.bind_containers(roots.iter().cloned());
        self.input.bind_containers(roots);
    }

    // ============ Raw input ============

    pub fn handle_pointer(&mut self, input: PointerInput) {
        if let Some(event) = self.typing.handle(input) {
            self.on_typing(event);
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        for signal in self.input.handle(event) {
            self.on_input(signal);
        }
    }

    fn on_typing(&mut self, event: TypingEvent) {
        match event {
            TypingEvent::SelectStart(position) => {
                self.remove_all_ranges();
                self.start = Some(position.clone());
                self.end = None;
                self.events.emit(&SelectionEvent::SelectStart(position));
            }
            TypingEvent::Selecting(position) => {
                if let Some(range) = self.extend_gesture(position) {
                    self.events.emit(&SelectionEvent::Selecting(range));
                }
            }
            TypingEvent::SelectEnd(position) => {
                if let Some(range) = self.extend_gesture(position) {
                    self.start = None;
                    self.end = None;
                    self.events.emit(&SelectionEvent::SelectEnd(range));
                }
            }
        }
    }

    /// Replace the list with `start -> position`; `None` without a start
    fn extend_gesture(&mut self, position: Position) -> Option<Range> {
        let Some(start) = self.start.clone() else {
            log::debug!("gesture update without a select start, ignoring");
            return None;
        };
        self.end = Some(position.clone());
        let range = Range::new(start, position);
        self.remove_all_ranges();
        self.add_range(range.clone());
        Some(range)
    }

    fn on_input(&mut self, signal: InputSignal) {
        match signal {
            InputSignal::Focus => {
                self.events.emit(&SelectionEvent::Focus);
                self.emit_change();
            }
            InputSignal::Blur => {
                self.events.emit(&SelectionEvent::Blur);
                self.emit_change();
            }
            InputSignal::CompositionStart(data) => {
                self.events.emit(&SelectionEvent::CompositionStart(data))
            }
            InputSignal::CompositionEnd(data) => {
                self.events.emit(&SelectionEvent::CompositionEnd(data))
            }
            InputSignal::Commit(text) => self.events.emit(&SelectionEvent::ValueChange(text)),
            InputSignal::KeyDown(key) => self.events.emit(&SelectionEvent::KeyDown(key)),
            InputSignal::KeyUp(key) => self.events.emit(&SelectionEvent::KeyUp(key)),
        }
    }

    // ============ Drawing ============

    /// Frame tick: draw the pending selection visuals, if any
    pub fn flush_frame(
        &mut self,
        doc: &impl DocumentModel,
        geometry: &impl ClientRects,
        layer: &mut impl SelectionLayer,
    ) {
        if let Some(rect) = self.visual.flush_frame(doc, geometry, layer) {
            self.input.render(rect);
        }
    }

    /// Tear down typing, input and the visual layer, and drop every
    /// subscription and range
    pub fn destroy(&mut self, layer: &mut impl SelectionLayer) {
        self.typing.destroy();
        self.input.destroy();
        self.visual.destroy(layer);
        self.events.clear();
        self.ranges.clear();
        self.start = None;
        self.end = None;
    }

    fn emit_change(&mut self) {
        let focused = self.is_focused();
        self.visual.request(&self.ranges, focused);
        self.events
            .emit(&SelectionEvent::SelectionChange(self.ranges.clone()));
    }

    fn check(&self, doc: &impl DocumentModel, position: &Position) -> Result<(), SelectionError> {
        let result = match doc.node(&position.key) {
            None => Err(SelectionError::NodeNotFound(position.key.clone())),
            Some(node) if position.offset > node.len() => Err(SelectionError::OffsetOutOfRange {
                key: position.key.clone(),
                offset: position.offset,
                len: node.len(),
            }),
            Some(_) => Ok(()),
        };
        result.inspect_err(|err| self.fault(err))
    }

    fn fault(&self, err: &SelectionError) {
        log::error!("selection out of sync with document: {err}");
        if self.consistency == ConsistencyPolicy::Panic {
            panic!("selection out of sync with document: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{KeyInput, PointerPhase};
    use crate::models::MemoryDocument;
    use crate::tests::{EventLog, RecordingLayer, pos};
    use crate::visual::GridLayout;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn hello() -> (MemoryDocument, NodeKey) {
        let (doc, texts) = MemoryDocument::from_paragraphs(["hello"]);
        (doc, texts[0].clone())
    }

    fn bound(doc: &MemoryDocument) -> Selection {
        let mut selection = Selection::default();
        selection.handle_root_update(doc);
        selection
    }

    fn pointer(doc: &MemoryDocument, phase: PointerPhase, position: Position) -> PointerInput {
        PointerInput {
            container: doc.root_keys()[0].clone(),
            phase,
            position: Some(position),
        }
    }

    // ============ Range list ============

    #[test]
    fn test_accessors_out_of_bounds_return_none() {
        let selection = Selection::default();
        assert_eq!(selection.range_at(0), None);
        assert_eq!(selection.range_count(), 0);
        assert_eq!(selection.anchor(), None);
        assert_eq!(selection.focus(), None);
        assert!(!selection.is_collapsed());
    }

    #[test]
    fn test_add_range_publishes_whole_list() {
        let mut selection = Selection::default();
        let log = EventLog::attach(&mut selection);
        let a = Range::caret(pos("a", 0));
        let b = Range::caret(pos("b", 1));

        selection.add_range(a.clone());
        selection.add_range(b.clone());

        assert_eq!(
            log.events(),
            vec![
                SelectionEvent::SelectionChange(vec![a.clone()]),
                SelectionEvent::SelectionChange(vec![a.clone(), b.clone()]),
            ]
        );
        assert_eq!(selection.anchor(), Some(&a.anchor));
        assert_eq!(selection.focus(), Some(&b.focus));
    }

    #[test]
    fn test_remove_range_at_only_publishes_on_change() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("a", 0)));
        let log = EventLog::attach(&mut selection);

        assert_eq!(selection.remove_range_at(3), None);
        assert!(log.events().is_empty());

        assert_eq!(selection.remove_range_at(0), Some(Range::caret(pos("a", 0))));
        assert_eq!(log.events(), vec![SelectionEvent::SelectionChange(vec![])]);
    }

    #[test]
    fn test_remove_all_ranges_on_empty_list_is_silent() {
        let mut selection = Selection::default();
        let log = EventLog::attach(&mut selection);

        selection.remove_all_ranges();

        assert!(log.events().is_empty());
    }

    #[test]
    fn test_remove_all_ranges_publishes_once() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("a", 0)));
        selection.add_range(Range::caret(pos("b", 0)));
        let log = EventLog::attach(&mut selection);

        selection.remove_all_ranges();

        assert_eq!(log.events(), vec![SelectionEvent::SelectionChange(vec![])]);
        assert_eq!(selection.range_count(), 0);
    }

    // ============ Validation ============

    #[test]
    fn test_apply_range_replaces_list() {
        let (doc, t) = hello();
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos(t.as_str(), 1)));
        selection.add_range(Range::caret(pos(t.as_str(), 2)));

        let range = Range::new(pos(t.as_str(), 0), pos(t.as_str(), 5));
        selection.apply_range(&doc, range.clone()).unwrap();

        assert_eq!(selection.ranges(), &[range]);
    }

    #[test]
    fn test_apply_range_twice_emits_each_time() {
        let (doc, t) = hello();
        let mut selection = Selection::default();
        let log = EventLog::attach(&mut selection);
        let range = Range::new(pos(t.as_str(), 1), pos(t.as_str(), 3));

        selection.apply_range(&doc, range.clone()).unwrap();
        let first = selection.ranges().to_vec();
        selection.apply_range(&doc, range.clone()).unwrap();

        assert_eq!(selection.ranges(), first.as_slice());
        // add; then clear + add
        assert_eq!(log.count(SelectionEventKind::SelectionChange), 3);
        assert_eq!(
            log.events().last(),
            Some(&SelectionEvent::SelectionChange(vec![range]))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(5)]
    fn test_apply_range_accepts_in_bounds_offsets(#[case] offset: usize) {
        let (doc, t) = hello();
        let mut selection = Selection::default();

        assert_eq!(
            selection.apply_range(&doc, Range::caret(pos(t.as_str(), offset))),
            Ok(())
        );
    }

    #[test]
    fn test_apply_range_rejects_offset_past_end() {
        let (doc, t) = hello();
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos(t.as_str(), 1)));
        let before = selection.ranges().to_vec();

        let result = selection.apply_range(&doc, Range::caret(pos(t.as_str(), 6)));

        assert_eq!(
            result,
            Err(SelectionError::OffsetOutOfRange {
                key: t.clone(),
                offset: 6,
                len: 5,
            })
        );
        assert_eq!(selection.ranges(), before.as_slice());
    }

    #[test]
    fn test_apply_range_rejects_bad_focus() {
        let (doc, t) = hello();
        let mut selection = Selection::default();

        let result = selection.apply_range(&doc, Range::new(pos(t.as_str(), 0), pos("ghost", 0)));

        assert_eq!(
            result,
            Err(SelectionError::NodeNotFound(NodeKey::from("ghost")))
        );
        assert_eq!(selection.range_count(), 0);
    }

    #[test]
    fn test_apply_range_checks_element_child_count() {
        let (doc, t) = hello();
        let paragraph = doc.parent(&t).unwrap();
        let mut selection = Selection::default();

        assert!(
            selection
                .apply_range(&doc, Range::caret(Position::new(paragraph.clone(), 1)))
                .is_ok()
        );
        assert!(
            selection
                .apply_range(&doc, Range::caret(Position::new(paragraph, 2)))
                .is_err()
        );
    }

    #[test]
    fn test_apply_range_rejects_detached_node() {
        let (mut doc, t) = hello();
        let paragraph = doc.parent(&t).unwrap();
        doc.remove_node(&paragraph).unwrap();
        let mut selection = Selection::default();

        assert_eq!(
            selection.apply_range(&doc, Range::caret(pos(t.as_str(), 0))),
            Err(SelectionError::NodeNotFound(t))
        );
    }

    #[test]
    #[should_panic(expected = "selection out of sync with document")]
    fn test_panic_policy_aborts_on_fault() {
        let (doc, t) = hello();
        let mut selection = Selection::new(SelectionConfig {
            consistency: ConsistencyPolicy::Panic,
            ..SelectionConfig::default()
        });

        let _ = selection.apply_range(&doc, Range::caret(pos(t.as_str(), 99)));
    }

    // ============ Model updates ============

    #[test]
    fn test_apply_update_moves_caret_after_insert() {
        let (mut doc, t) = hello();
        let mut selection = Selection::default();

        let update = doc.insert_text(&t, 5, "!").unwrap();
        selection.apply_update(&doc, &update.node, &update.ops).unwrap();

        assert_eq!(selection.ranges(), &[Range::caret(pos(t.as_str(), 6))]);
    }

    #[test]
    fn test_apply_update_without_derivation_keeps_ranges() {
        let (mut doc, t) = hello();
        let paragraph = doc.parent(&t).unwrap();
        let mut selection = Selection::default();
        selection.apply_range(&doc, Range::caret(pos(t.as_str(), 2))).unwrap();
        let extra = doc.create_text("x");

        let update = doc.insert_node(Some(&paragraph), 1, &extra).unwrap();
        selection.apply_update(&doc, &update.node, &update.ops).unwrap();

        assert_eq!(selection.ranges(), &[Range::caret(pos(t.as_str(), 2))]);
    }

    #[test]
    fn test_apply_update_reports_ranges_inside_removed_node() {
        let (mut doc, t) = hello();
        let paragraph = doc.parent(&t).unwrap();
        let mut selection = Selection::default();
        selection.apply_range(&doc, Range::caret(pos(t.as_str(), 3))).unwrap();
        let log = EventLog::attach(&mut selection);

        let update = doc.remove_node(&paragraph).unwrap();
        let result = selection.apply_update(&doc, &update.node, &update.ops);

        assert_eq!(result, Err(SelectionError::NodeNotFound(t.clone())));
        // Reported, not repaired
        assert_eq!(selection.ranges(), &[Range::caret(pos(t.as_str(), 3))]);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_apply_update_on_rootless_node_rebinds_containers() {
        let (mut doc, _) = hello();
        let mut selection = bound(&doc);
        let paragraph = doc.create_element();

        let update = doc.insert_node(None, 1, &paragraph).unwrap();
        selection.apply_update(&doc, &update.node, &update.ops).unwrap();

        assert_eq!(selection.typing().containers(), doc.root_keys().as_slice());
        assert_eq!(selection.input().containers(), doc.root_keys().as_slice());
        assert_eq!(selection.typing().containers().len(), 2);
    }

    #[test]
    fn test_apply_update_reports_stale_derivation() {
        let (mut doc, t) = hello();
        let mut selection = Selection::default();
        let update = doc.insert_text(&t, 5, "!").unwrap();
        doc.delete_text(&t, 0, 6).unwrap();

        let result = selection.apply_update(&doc, &update.node, &update.ops);

        assert!(matches!(
            result,
            Err(SelectionError::OffsetOutOfRange { offset: 6, len: 0, .. })
        ));
    }

    #[test]
    fn test_silent_update_skips_validation_and_events() {
        let mut selection = Selection::default();
        let log = EventLog::attach(&mut selection);
        let ops = [Op::InsertText {
            key: NodeKey::from("ghost"),
            offset: Some(10),
            text: "abc".to_string(),
        }];

        selection.silent_update(&ops);

        assert_eq!(selection.ranges(), &[Range::caret(pos("ghost", 13))]);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_silent_update_without_derivation_is_noop() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("a", 1)));

        selection.silent_update(&[]);

        assert_eq!(selection.ranges(), &[Range::caret(pos("a", 1))]);
    }

    // ============ Collapsed detection ============

    #[test]
    fn test_single_caret_is_collapsed() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("k", 2)));
        assert!(selection.is_collapsed());
    }

    #[test]
    fn test_single_expanded_range_is_not_collapsed() {
        let mut selection = Selection::default();
        selection.add_range(Range::new(pos("k", 0), pos("k", 5)));
        assert!(!selection.is_collapsed());
    }

    #[test]
    fn test_multi_range_collapsed_only_by_outer_bounds() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("k", 2)));
        selection.add_range(Range::new(pos("j", 0), pos("j", 4)));
        selection.add_range(Range::caret(pos("k", 2)));

        // The middle range is expanded, the outer ones coincide
        assert!(selection.is_collapsed());

        selection.remove_range_at(2);
        assert!(!selection.is_collapsed());
    }

    /// Keys match and the first anchor offset equals the last focus offset,
    /// so a check limited to keys plus that offset cross-check would call
    /// this collapsed. Full anchor equality is required as well.
    #[test]
    fn test_multi_range_with_distinct_anchors_is_not_collapsed() {
        let mut selection = Selection::default();
        selection.add_range(Range::new(pos("k", 1), pos("k", 1)));
        selection.add_range(Range::new(pos("k", 0), pos("k", 1)));

        assert!(!selection.is_collapsed());
    }

    // ============ Typing ============

    #[test]
    fn test_drag_sequence_yields_one_range() {
        let (doc, t) = hello();
        let mut selection = bound(&doc);
        let log = EventLog::attach(&mut selection);

        selection.handle_pointer(pointer(&doc, PointerPhase::Down, pos(t.as_str(), 0)));
        selection.handle_pointer(pointer(&doc, PointerPhase::Move, pos(t.as_str(), 2)));
        selection.handle_pointer(pointer(&doc, PointerPhase::Up, pos(t.as_str(), 4)));

        let expected = Range::new(pos(t.as_str(), 0), pos(t.as_str(), 4));
        assert_eq!(selection.ranges(), &[expected.clone()]);
        assert_eq!(
            log.kinds(),
            vec![
                SelectionEventKind::SelectStart,
                SelectionEventKind::SelectionChange,
                SelectionEventKind::Selecting,
                SelectionEventKind::SelectionChange,
                SelectionEventKind::SelectionChange,
                SelectionEventKind::SelectEnd,
            ]
        );
        assert_eq!(log.events().last(), Some(&SelectionEvent::SelectEnd(expected)));
        assert_eq!(selection.gesture(), (None, None));
    }

    #[test]
    fn test_select_start_clears_existing_ranges() {
        let (doc, t) = hello();
        let mut selection = bound(&doc);
        selection.add_range(Range::caret(pos(t.as_str(), 3)));
        let log = EventLog::attach(&mut selection);

        selection.handle_pointer(pointer(&doc, PointerPhase::Down, pos(t.as_str(), 1)));

        assert_eq!(selection.range_count(), 0);
        assert_eq!(
            log.events(),
            vec![
                SelectionEvent::SelectionChange(vec![]),
                SelectionEvent::SelectStart(pos(t.as_str(), 1)),
            ]
        );
        assert_eq!(selection.gesture(), (Some(&pos(t.as_str(), 1)), None));
    }

    #[test]
    fn test_selecting_without_start_is_silent() {
        let (doc, t) = hello();
        let mut selection = bound(&doc);
        let log = EventLog::attach(&mut selection);

        selection.on_typing(TypingEvent::Selecting(pos(t.as_str(), 2)));
        selection.on_typing(TypingEvent::SelectEnd(pos(t.as_str(), 3)));

        assert_eq!(selection.range_count(), 0);
        assert!(log.events().is_empty());
    }

    // ============ Input ============

    #[test]
    fn test_focus_and_blur_republish_ranges() {
        let mut selection = Selection::default();
        selection.add_range(Range::caret(pos("k", 1)));
        let log = EventLog::attach(&mut selection);

        selection.handle_input(InputEvent::Focus);
        assert!(selection.is_focused());
        selection.handle_input(InputEvent::Blur);
        assert!(!selection.is_focused());

        let change = SelectionEvent::SelectionChange(vec![Range::caret(pos("k", 1))]);
        assert_eq!(
            log.events(),
            vec![
                SelectionEvent::Focus,
                change.clone(),
                SelectionEvent::Blur,
                change,
            ]
        );
    }

    #[test]
    fn test_repeated_focus_schedules_redraw() {
        let (doc, t) = hello();
        let layout = GridLayout::measure(&doc);
        let mut layer = RecordingLayer::default();
        let mut selection = Selection::default();
        selection.handle_input(InputEvent::Focus);
        selection.apply_range(&doc, Range::caret(pos(t.as_str(), 1))).unwrap();
        selection.flush_frame(&doc, &layout, &mut layer);
        let log = EventLog::attach(&mut selection);

        selection.handle_input(InputEvent::Focus);

        assert_eq!(
            log.kinds(),
            vec![SelectionEventKind::Focus, SelectionEventKind::SelectionChange]
        );
        assert!(selection.visual().is_pending());
    }

    #[test]
    fn test_input_passthrough() {
        let mut selection = Selection::default();
        selection.handle_input(InputEvent::Focus);
        let log = EventLog::attach(&mut selection);

        selection.handle_input(InputEvent::KeyDown(KeyInput::new("a")));
        selection.handle_input(InputEvent::Text("a".to_string()));
        selection.handle_input(InputEvent::KeyUp(KeyInput::new("a")));
        selection.handle_input(InputEvent::CompositionStart(String::new()));
        assert_eq!(selection.focus_state(), FocusState::Composing);
        selection.handle_input(InputEvent::CompositionEnd("é".to_string()));

        assert_eq!(
            log.events(),
            vec![
                SelectionEvent::KeyDown(KeyInput::new("a")),
                SelectionEvent::ValueChange("a".to_string()),
                SelectionEvent::KeyUp(KeyInput::new("a")),
                SelectionEvent::CompositionStart(String::new()),
                SelectionEvent::CompositionEnd("é".to_string()),
                SelectionEvent::ValueChange("é".to_string()),
            ]
        );
    }

    // ============ Drawing & teardown ============

    #[test]
    fn test_flush_frame_draws_caret_and_moves_input() {
        let (doc, t) = hello();
        let layout = GridLayout::measure(&doc);
        let mut layer = RecordingLayer::default();
        let mut selection = Selection::default();

        selection.handle_input(InputEvent::Focus);
        selection.apply_range(&doc, Range::caret(pos(t.as_str(), 2))).unwrap();
        selection.flush_frame(&doc, &layout, &mut layer);

        assert_eq!(
            layer.calls,
            vec!["clear_selection".to_string(), "draw_caret".to_string()]
        );
        let rect = selection.input_rect().unwrap();
        assert_eq!((rect.x, rect.width), (16.0, 2.0));
    }

    #[test]
    fn test_destroy_tears_everything_down() {
        let (doc, t) = hello();
        let mut layer = RecordingLayer::default();
        let mut selection = bound(&doc);
        selection.handle_input(InputEvent::Focus);
        selection.apply_range(&doc, Range::caret(pos(t.as_str(), 2))).unwrap();
        let log = EventLog::attach(&mut selection);

        selection.destroy(&mut layer);
        selection.add_range(Range::caret(pos(t.as_str(), 1)));

        assert!(log.events().is_empty());
        assert!(selection.typing().containers().is_empty());
        assert!(!selection.is_focused());
        assert_eq!(layer.calls, vec!["clear_selection".to_string()]);
    }
}
