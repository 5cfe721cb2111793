//! Deck State Machine
//!
//! Owns the deck's mutable state (`index`, `offset`, `phase`) and moves it
//! through `Idle -> Dragging -> AnimatingExit | AnimatingReset -> Idle` in
//! response to drag events and animation ticks. Items are not stored here;
//! the machine only knows how many there are.

use log::{debug, trace};

use crate::animation::{Animation, Spring, Tween};
use crate::config::DeckConfig;
use crate::geometry::{Offset, Point, Viewport};
use crate::gesture::{DragHandler, GestureTracker, ReleaseDecision, SwipeDirection};
use crate::layout::{layout_stack, StackView};

/// Interaction phase of the top card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Idle,
    Dragging,
    AnimatingExit(SwipeDirection),
    AnimatingReset,
}

/// Snapshot handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckState {
    pub index: usize,
    pub offset: Offset,
    pub phase: DeckPhase,
}

/// A completed swipe: the card at `index` left in `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub direction: SwipeDirection,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct DeckMachine {
    config: DeckConfig,
    viewport: Viewport,
    tracker: GestureTracker,
    state: DeckState,
    len: usize,
    animation: Option<Animation>,
    layout_transition_pending: bool,
}

impl DeckMachine {
    /// The swipe threshold is derived from `viewport` here and never
    /// re-evaluated.
    pub fn new(len: usize, viewport: Viewport, config: DeckConfig) -> Self {
        let threshold = viewport.width * config.swipe_threshold_fraction;
        debug!("[Deck] new: {} cards, viewport {}x{}, threshold {}px", len, viewport.width, viewport.height, threshold);
        Self {
            config,
            viewport,
            tracker: GestureTracker::new(threshold),
            state: DeckState { index: 0, offset: Offset::ZERO, phase: DeckPhase::Idle },
            len,
            animation: None,
            layout_transition_pending: false,
        }
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn offset(&self) -> Offset {
        self.state.offset
    }

    pub fn phase(&self) -> DeckPhase {
        self.state.phase
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// True once every card has been swiped
    pub fn is_exhausted(&self) -> bool {
        self.state.index >= self.len
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Returns true once after each index change, if layout transitions
    /// are enabled
    pub fn take_layout_transition(&mut self) -> bool {
        std::mem::take(&mut self.layout_transition_pending)
    }

    /// Stack layout for the current state
    pub fn layout(&self) -> StackView {
        layout_stack(self.state.index, self.len, self.state.offset, self.viewport, &self.config)
    }

    /// The item list was replaced. Always rewinds to the first card and
    /// drops any running drag or animation.
    pub fn replace_items(&mut self, len: usize) {
        debug!("[Deck] data replaced: {} -> {} cards, index {} -> 0", self.len, len, self.state.index);
        if self.state.index != 0 {
            self.request_layout_transition();
        }
        self.len = len;
        self.tracker.abort();
        self.animation = None;
        self.state = DeckState { index: 0, offset: Offset::ZERO, phase: DeckPhase::Idle };
    }

    /// Pointer capture was lost mid-drag; spring back as if cancelled
    pub fn cancel_drag(&mut self) {
        if self.state.phase != DeckPhase::Dragging {
            return;
        }
        self.tracker.abort();
        self.start_reset();
    }

    /// Advance the running animation. Returns the swipe that completed on
    /// this tick, if any.
    pub fn tick(&mut self, dt_ms: f64) -> Option<SwipeOutcome> {
        let animation = self.animation.as_mut()?;
        let (offset, finished) = animation.step(dt_ms);
        self.state.offset = offset;
        if !finished {
            return None;
        }

        self.animation = None;
        self.state.offset = Offset::ZERO;
        match self.state.phase {
            DeckPhase::AnimatingExit(direction) => {
                let outcome = SwipeOutcome { direction, index: self.state.index };
                self.state.index += 1;
                self.state.phase = DeckPhase::Idle;
                self.request_layout_transition();
                debug!("[Deck] swiped {:?}: card {} -> index {}", direction, outcome.index, self.state.index);
                Some(outcome)
            }
            _ => {
                trace!("[Deck] reset settled");
                self.state.phase = DeckPhase::Idle;
                None
            }
        }
    }

    fn request_layout_transition(&mut self) {
        if self.config.layout_animation {
            self.layout_transition_pending = true;
        }
    }

    fn start_exit(&mut self, direction: SwipeDirection) {
        let target = Offset::new(self.viewport.width * direction.sign(), 0.0);
        self.animation = Some(Animation::Tween(Tween::new(self.state.offset, target, self.config.exit_duration_ms)));
        self.state.phase = DeckPhase::AnimatingExit(direction);
    }

    fn start_reset(&mut self) {
        let spring = Spring::new(self.config.spring, self.state.offset, Offset::ZERO);
        if spring.is_finished() {
            self.animation = None;
            self.state.offset = Offset::ZERO;
            self.state.phase = DeckPhase::Idle;
        } else {
            self.animation = Some(Animation::Spring(spring));
            self.state.phase = DeckPhase::AnimatingReset;
        }
    }
}

impl DragHandler for DeckMachine {
    fn on_drag_start(&mut self, at: Point) -> bool {
        if self.is_exhausted() {
            return false;
        }
        match self.state.phase {
            DeckPhase::Idle | DeckPhase::AnimatingReset => {
                // The offset follows this gesture's own displacement from here on
                self.tracker.begin(at);
                self.animation = None;
                self.state.phase = DeckPhase::Dragging;
                trace!("[Deck] drag start on card {} at ({}, {})", self.state.index, at.x, at.y);
                true
            }
            DeckPhase::Dragging | DeckPhase::AnimatingExit(_) => false,
        }
    }

    fn on_drag_move(&mut self, at: Point) {
        if self.state.phase != DeckPhase::Dragging {
            return;
        }
        if let Some(offset) = self.tracker.displacement(at) {
            self.state.offset = offset;
        }
    }

    fn on_drag_end(&mut self, at: Point) {
        if self.state.phase != DeckPhase::Dragging {
            return;
        }
        let Some((offset, decision)) = self.tracker.release(at) else {
            return;
        };
        self.state.offset = offset;
        debug!("[Deck] release dx={} -> {:?}", offset.x, decision);
        match decision {
            ReleaseDecision::Swipe(direction) => self.start_exit(direction),
            ReleaseDecision::Cancel => self.start_reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn machine(len: usize) -> DeckMachine {
        DeckMachine::new(len, Viewport::new(400.0, 800.0), DeckConfig::default())
    }

    fn drag(m: &mut DeckMachine, dx: f64, dy: f64) {
        assert!(m.on_drag_start(Point::new(200.0, 400.0)));
        m.on_drag_move(Point::new(200.0 + dx / 2.0, 400.0 + dy / 2.0));
        m.on_drag_move(Point::new(200.0 + dx, 400.0 + dy));
        m.on_drag_end(Point::new(200.0 + dx, 400.0 + dy));
    }

    fn run_until_idle(m: &mut DeckMachine) -> Vec<SwipeOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..2_000 {
            if !m.is_animating() {
                break;
            }
            outcomes.extend(m.tick(16.0));
        }
        outcomes
    }

    #[test]
    fn test_move_writes_live_offset() {
        let mut m = machine(3);
        assert!(m.on_drag_start(Point::new(10.0, 10.0)));
        assert_eq!(m.phase(), DeckPhase::Dragging);
        m.on_drag_move(Point::new(60.0, 30.0));
        assert_eq!(m.offset(), Offset::new(50.0, 20.0));
    }

    #[test]
    fn test_right_release_runs_exit_then_advances() {
        let mut m = machine(3);
        drag(&mut m, 150.0, 20.0);
        assert_eq!(m.phase(), DeckPhase::AnimatingExit(SwipeDirection::Right));
        assert_eq!(m.index(), 0);

        assert_eq!(m.tick(125.0), None);
        assert_eq!(m.offset(), Offset::new(275.0, 10.0));

        let outcome = m.tick(125.0).expect("exit finished");
        assert_eq!(outcome, SwipeOutcome { direction: SwipeDirection::Right, index: 0 });
        assert_eq!(m.index(), 1);
        assert_eq!(m.offset(), Offset::ZERO);
        assert_eq!(m.phase(), DeckPhase::Idle);
        assert!(m.take_layout_transition());
        assert!(!m.take_layout_transition());
    }

    #[test]
    fn test_left_release_exits_left() {
        let mut m = machine(3);
        drag(&mut m, -150.0, 0.0);
        let outcomes = run_until_idle(&mut m);
        assert_eq!(outcomes, vec![SwipeOutcome { direction: SwipeDirection::Left, index: 0 }]);
        assert_eq!(m.index(), 1);
    }

    #[test]
    fn test_short_release_springs_back() {
        let mut m = machine(3);
        drag(&mut m, 40.0, 25.0);
        assert_eq!(m.phase(), DeckPhase::AnimatingReset);
        let outcomes = run_until_idle(&mut m);
        assert!(outcomes.is_empty());
        assert_eq!(m.offset(), Offset::ZERO);
        assert_eq!(m.index(), 0);
        assert_eq!(m.phase(), DeckPhase::Idle);
        assert!(!m.take_layout_transition());
    }

    #[test]
    fn test_release_at_origin_is_idle_immediately() {
        let mut m = machine(3);
        drag(&mut m, 0.0, 0.0);
        assert_eq!(m.phase(), DeckPhase::Idle);
        assert!(!m.is_animating());
    }

    #[test]
    fn test_no_drag_during_exit() {
        let mut m = machine(3);
        drag(&mut m, 300.0, 0.0);
        m.tick(100.0);
        assert!(!m.on_drag_start(Point::new(0.0, 0.0)));
        assert!(matches!(m.phase(), DeckPhase::AnimatingExit(_)));
    }

    #[test]
    fn test_drag_interrupts_reset_spring() {
        let mut m = machine(3);
        drag(&mut m, 99.0, 0.0);
        m.tick(16.0);
        let mid = m.offset();
        assert!(mid.x > 90.0 && mid.x < 99.0);

        assert!(m.on_drag_start(Point::new(100.0, 100.0)));
        assert!(!m.is_animating());
        m.on_drag_move(Point::new(120.0, 100.0));
        assert_eq!(m.offset(), Offset::new(20.0, 0.0));

        // Only the new gesture's dx counts, not where the spring had the card
        m.on_drag_end(Point::new(120.0, 100.0));
        assert_eq!(m.phase(), DeckPhase::AnimatingReset);
        assert!(run_until_idle(&mut m).is_empty());
        assert_eq!(m.index(), 0);
    }

    #[test]
    fn test_no_drag_when_exhausted() {
        let mut m = machine(0);
        assert!(m.is_exhausted());
        assert!(!m.on_drag_start(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_replace_items_rewinds() {
        let mut m = machine(2);
        drag(&mut m, 200.0, 0.0);
        run_until_idle(&mut m);
        drag(&mut m, 200.0, 0.0);
        run_until_idle(&mut m);
        assert!(m.is_exhausted());
        m.take_layout_transition();

        m.replace_items(5);
        assert_eq!(m.index(), 0);
        assert!(!m.is_exhausted());
        assert!(matches!(m.layout(), StackView::Cards(cards) if cards.len() == 5));
        assert!(m.take_layout_transition());

        // Replacing again at index 0 still leaves index 0
        m.replace_items(5);
        assert_eq!(m.index(), 0);
    }

    #[test]
    fn test_replace_items_mid_exit_drops_animation() {
        let mut m = machine(3);
        drag(&mut m, 200.0, 0.0);
        m.tick(50.0);
        m.replace_items(3);
        assert!(!m.is_animating());
        assert_eq!(m.phase(), DeckPhase::Idle);
        assert_eq!(m.offset(), Offset::ZERO);
        assert_eq!(m.tick(500.0), None);
        assert_eq!(m.index(), 0);
    }

    #[test]
    fn test_cancel_drag_springs_back() {
        let mut m = machine(3);
        assert!(m.on_drag_start(Point::new(0.0, 0.0)));
        m.on_drag_move(Point::new(300.0, 0.0));
        m.cancel_drag();
        assert_eq!(m.phase(), DeckPhase::AnimatingReset);
        assert!(run_until_idle(&mut m).is_empty());
        assert_eq!(m.index(), 0);
    }

    #[test]
    fn test_layout_transition_disabled_by_config() {
        let config = DeckConfig { layout_animation: false, ..DeckConfig::default() };
        let mut m = DeckMachine::new(3, Viewport::new(400.0, 800.0), config);
        drag(&mut m, 200.0, 0.0);
        run_until_idle(&mut m);
        assert_eq!(m.index(), 1);
        assert!(!m.take_layout_transition());
    }

    proptest! {
        #[test]
        fn prop_release_within_threshold_never_swipes(
            width in 100.0f64..2000.0,
            first in -1.0f64..=1.0,
            settle_ticks in 0usize..40,
            second in -1.0f64..=1.0,
            dy in -300.0f64..300.0,
        ) {
            let threshold = width * 0.25;
            let mut m = DeckMachine::new(3, Viewport::new(width, 800.0), DeckConfig::default());

            // Leave the card somewhere along its reset spring
            prop_assert!(m.on_drag_start(Point::new(0.0, 0.0)));
            m.on_drag_move(Point::new(threshold * first, dy));
            m.on_drag_end(Point::new(threshold * first, dy));
            for _ in 0..settle_ticks {
                prop_assert_eq!(m.tick(16.0), None);
            }

            prop_assert!(m.on_drag_start(Point::new(500.0, 500.0)));
            m.on_drag_move(Point::new(500.0 + threshold * second, 500.0 + dy));
            m.on_drag_end(Point::new(500.0 + threshold * second, 500.0 + dy));
            prop_assert!(!matches!(m.phase(), DeckPhase::AnimatingExit(_)));

            prop_assert!(run_until_idle(&mut m).is_empty());
            prop_assert_eq!(m.phase(), DeckPhase::Idle);
            prop_assert_eq!(m.offset(), Offset::ZERO);
            prop_assert_eq!(m.index(), 0);
        }
    }
}
