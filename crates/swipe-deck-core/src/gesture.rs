//! Gesture Tracker
//!
//! Turns raw pointer positions into a cumulative drag offset and, on
//! release, a swipe/cancel decision. Classification is positional only.

use crate::geometry::{Offset, Point};

/// Direction a card leaves the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// -1.0 for left, +1.0 for right
    pub fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Outcome of a drag release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    Swipe(SwipeDirection),
    Cancel,
}

/// Classify a release by horizontal displacement.
///
/// Strict comparison: a release exactly on the threshold cancels.
pub fn classify_release(dx: f64, threshold: f64) -> ReleaseDecision {
    if dx > threshold {
        ReleaseDecision::Swipe(SwipeDirection::Right)
    } else if dx < -threshold {
        ReleaseDecision::Swipe(SwipeDirection::Left)
    } else {
        ReleaseDecision::Cancel
    }
}

/// Drag capability implemented by the deck and injected into the
/// platform input layer
pub trait DragHandler {
    /// Returns false if the drag was refused (no interactive card, or an
    /// exit animation is running)
    fn on_drag_start(&mut self, at: Point) -> bool;
    fn on_drag_move(&mut self, at: Point);
    fn on_drag_end(&mut self, at: Point);
}

/// Tracks one drag at a time
#[derive(Debug, Clone, Copy)]
pub struct GestureTracker {
    start: Option<Point>,
    threshold: f64,
}

impl GestureTracker {
    /// `threshold` is in pixels and fixed for the tracker's lifetime
    pub fn new(threshold: f64) -> Self {
        Self { start: None, threshold }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Cumulative displacement since `begin`, or None when idle
    pub fn displacement(&self, at: Point) -> Option<Offset> {
        self.start.map(|start| at - start)
    }

    /// Ends the drag and classifies it
    pub fn release(&mut self, at: Point) -> Option<(Offset, ReleaseDecision)> {
        let offset = self.displacement(at)?;
        self.start = None;
        Some((offset, classify_release(offset.x, self.threshold)))
    }

    pub fn abort(&mut self) {
        self.start = None;
    }
}
