//! Item-owning Deck
//!
//! Couples a `DeckMachine` with the item list and the swipe callbacks so a
//! host only has to forward drag events, tick animations and render.

use std::hash::Hash;

use crate::config::DeckConfig;
use crate::geometry::{Point, Viewport};
use crate::gesture::{DragHandler, SwipeDirection};
use crate::layout::{CardLayout, StackView};
use crate::machine::{DeckMachine, SwipeOutcome};

/// A card record; `id` is the stable rendering key
pub trait DeckItem {
    type Id: Clone + Eq + Hash;

    fn id(&self) -> Self::Id;
}

type SwipeCallback<T> = Box<dyn FnMut(&T)>;

/// Hand the card that just left to the callback for its direction.
///
/// Returns the card, or None if `outcome.index` no longer names an item.
pub fn dispatch_swipe<'a, T>(
    items: &'a [T],
    outcome: SwipeOutcome,
    on_swipe_right: impl FnOnce(&'a T),
    on_swipe_left: impl FnOnce(&'a T),
) -> Option<&'a T> {
    let item = items.get(outcome.index)?;
    match outcome.direction {
        SwipeDirection::Right => on_swipe_right(item),
        SwipeDirection::Left => on_swipe_left(item),
    }
    Some(item)
}

pub struct Deck<T> {
    items: Vec<T>,
    machine: DeckMachine,
    on_swipe_right: SwipeCallback<T>,
    on_swipe_left: SwipeCallback<T>,
}

impl<T: DeckItem> Deck<T> {
    /// Callbacks default to no-ops
    pub fn new(items: Vec<T>, viewport: Viewport, config: DeckConfig) -> Self {
        let machine = DeckMachine::new(items.len(), viewport, config);
        Self {
            items,
            machine,
            on_swipe_right: Box::new(|_| {}),
            on_swipe_left: Box::new(|_| {}),
        }
    }

    pub fn on_swipe_right(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_right = Box::new(f);
        self
    }

    pub fn on_swipe_left(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_left = Box::new(f);
        self
    }

    pub fn machine(&self) -> &DeckMachine {
        &self.machine
    }

    /// Replace the item list; always rewinds to the first card
    pub fn set_data(&mut self, items: Vec<T>) {
        self.machine.replace_items(items.len());
        self.items = items;
    }

    /// Advance animations and fire the swipe callback if a card left
    pub fn tick(&mut self, dt_ms: f64) -> Option<SwipeOutcome> {
        let outcome = self.machine.tick(dt_ms)?;
        let Self { items, on_swipe_right, on_swipe_left, .. } = self;
        dispatch_swipe(items, outcome, |item| on_swipe_right(item), |item| on_swipe_left(item));
        Some(outcome)
    }

    /// One render pass: either the cards in composition order or only the
    /// "no more cards" view
    pub fn render<V>(
        &self,
        mut render_card: impl FnMut(&T, &CardLayout) -> V,
        render_no_more_cards: impl FnOnce() -> V,
    ) -> Vec<V> {
        match self.machine.layout() {
            StackView::Empty => vec![render_no_more_cards()],
            StackView::Cards(cards) => cards
                .iter()
                .filter_map(|card| self.items.get(card.position).map(|item| render_card(item, card)))
                .collect(),
        }
    }
}

impl<T: DeckItem> DragHandler for Deck<T> {
    fn on_drag_start(&mut self, at: Point) -> bool {
        self.machine.on_drag_start(at)
    }

    fn on_drag_move(&mut self, at: Point) {
        self.machine.on_drag_move(at)
    }

    fn on_drag_end(&mut self, at: Point) {
        self.machine.on_drag_end(at)
    }
}
