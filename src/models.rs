//! Demo Models
//!
//! Card records shown by the demo deck.

use leptos_swipe_deck::DeckItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub text: String,
    pub uri: String,
}

impl DeckItem for Card {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

const SAMPLE_CARDS: &str = include_str!("../assets/cards.json");

/// Sample cards bundled with the demo
pub fn sample_cards() -> Vec<Card> {
    match serde_json::from_str(SAMPLE_CARDS) {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("[Models] bad sample cards: {}", e);
            Vec::new()
        }
    }
}
