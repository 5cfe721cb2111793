//! Swipe Deck Demo App
//!
//! One deck of sample cards with like/pass counters and a refill button.

use leptos::prelude::*;
use leptos_swipe_deck::{Deck, DeckConfig};

use crate::models::{sample_cards, Card};

const DECK_CONFIG: &str = include_str!("../assets/deck.config.json");

fn load_config() -> DeckConfig {
    match DeckConfig::from_json(DECK_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[APP] {}, using defaults", e);
            DeckConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (cards, set_cards) = signal(sample_cards());
    let (liked, set_liked) = signal(Vec::<u32>::new());
    let (passed, set_passed) = signal(Vec::<u32>::new());

    log::info!("[APP] Loaded {} cards", cards.get_untracked().len());

    let on_swipe_right = move |card: Card| {
        log::info!("[APP] Liked card {}", card.id);
        set_liked.update(|ids| ids.push(card.id));
    };
    let on_swipe_left = move |card: Card| {
        log::info!("[APP] Passed card {}", card.id);
        set_passed.update(|ids| ids.push(card.id));
    };

    // Replacing the list rewinds the deck
    let refill = move |_| {
        log::info!("[APP] Refilling deck");
        set_cards.set(sample_cards());
    };

    view! {
        <main class="deck-app">
            <h1>"Swipe Deck"</h1>
            <p class="deck-stats">
                {move || format!("{} liked, {} passed", liked.get().len(), passed.get().len())}
            </p>

            <Deck
                data=cards
                config=load_config()
                render_card=|card: Card| view! {
                    <div class="card">
                        <img class="card-image" src=card.uri.clone() draggable="false" />
                        <h2 class="card-title">{card.text.clone()}</h2>
                        <p class="card-body">"Swipe right to like, left to pass."</p>
                    </div>
                }
                render_no_more_cards=move || view! {
                    <div class="card card-empty">
                        <h2 class="card-title">"All done!"</h2>
                        <p class="card-body">"There are no more cards."</p>
                        <button class="refill-btn" on:click=refill>"Get more!"</button>
                    </div>
                }
                on_swipe_right=on_swipe_right
                on_swipe_left=on_swipe_left
            />
        </main>
    }
}
