//! Swipe Deck Core
//!
//! Platform-free logic for a stack of swipeable cards:
//! - gesture: drag tracking and release classification
//! - animation: exit tween and reset spring
//! - machine: deck state machine (index, offset, phase)
//! - layout: pure stacking layout for the renderer
//! - deck: item-owning wrapper with swipe callbacks

mod config;
mod geometry;
mod gesture;
mod animation;
mod machine;
mod layout;
mod deck;

#[cfg(test)]
mod scenarios;

pub use config::{ConfigError, DeckConfig, SpringConfig};
pub use geometry::{Offset, Point, Viewport};
pub use gesture::{classify_release, DragHandler, GestureTracker, ReleaseDecision, SwipeDirection};
pub use animation::{Animation, Spring, Tween};
pub use machine::{DeckMachine, DeckPhase, DeckState, SwipeOutcome};
pub use layout::{layout_stack, rotation_for, CardLayout, CardRole, StackView};
pub use deck::{dispatch_swipe, Deck, DeckItem};
