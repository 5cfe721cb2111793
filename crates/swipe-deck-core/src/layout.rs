//! Card Stack Layout
//!
//! Pure function from deck state to per-card placement. The renderer turns
//! each `CardLayout` into a positioned card; it never decides anything
//! itself.

use crate::config::DeckConfig;
use crate::geometry::{Offset, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRole {
    /// The interactive card carrying the drag transform
    Top,
    /// A static card waiting behind the top card
    Background,
}

/// Placement of one card; `position` indexes the item list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub position: usize,
    pub role: CardRole,
    pub translate: Offset,
    pub rotation_deg: f64,
    pub z_index: i32,
}

impl CardLayout {
    pub fn is_interactive(&self) -> bool {
        self.role == CardRole::Top
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StackView {
    /// Every card was swiped
    Empty,
    /// Cards in composition order, farthest back first
    Cards(Vec<CardLayout>),
}

impl StackView {
    pub fn is_empty(&self) -> bool {
        matches!(self, StackView::Empty)
    }

    /// Layout of the card at `position`, if it is on screen
    pub fn card(&self, position: usize) -> Option<CardLayout> {
        match self {
            StackView::Empty => None,
            StackView::Cards(cards) => cards.iter().find(|c| c.position == position).copied(),
        }
    }
}

/// Rotation for a horizontal offset: `[-r*w, 0, r*w]` maps linearly onto
/// `[-max, 0, max]` degrees and clamps outside that range
pub fn rotation_for(dx: f64, viewport: Viewport, config: &DeckConfig) -> f64 {
    let range = viewport.width * config.rotation_range_fraction;
    if range <= 0.0 {
        return 0.0;
    }
    (dx / range).clamp(-1.0, 1.0) * config.max_rotation_deg
}

pub fn layout_stack(
    index: usize,
    len: usize,
    offset: Offset,
    viewport: Viewport,
    config: &DeckConfig,
) -> StackView {
    if index >= len {
        return StackView::Empty;
    }

    let mut cards: Vec<CardLayout> = (index..len)
        .map(|position| {
            if position == index {
                CardLayout {
                    position,
                    role: CardRole::Top,
                    translate: offset,
                    rotation_deg: rotation_for(offset.x, viewport, config),
                    z_index: config.top_z_index,
                }
            } else {
                let depth = (position - index) as f64;
                CardLayout {
                    position,
                    role: CardRole::Background,
                    translate: Offset::new(0.0, config.stack_offset_px * depth),
                    rotation_deg: 0.0,
                    z_index: config.background_z_index,
                }
            }
        })
        .collect();
    cards.reverse();
    StackView::Cards(cards)
}
