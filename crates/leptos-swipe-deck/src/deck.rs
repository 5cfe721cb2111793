//! Deck Component
//!
//! Renders the card stack from the deck signals. Every card on screen is a
//! keyed DOM node whose style follows the stack layout, so moving the top
//! card never re-renders card content.

use leptos::prelude::*;
use swipe_deck_core::{dispatch_swipe, layout_stack, DeckPhase, StackView};

use crate::platform;
use crate::{
    bind_global_pointer_handlers, create_deck_signals, make_on_pointerdown, CardLayout, DeckConfig, DeckItem,
    SwipeOutcome,
};

/// Inline style for one positioned card.
/// `transition_ms` animates transform changes (layout transition).
pub fn card_style(card: &CardLayout, width: f64, transition_ms: Option<f64>) -> String {
    let mut style = format!(
        "position: absolute; left: 0; top: 0; width: {}px; transform: translate({}px, {}px) rotate({}deg); z-index: {};",
        width, card.translate.x, card.translate.y, card.rotation_deg, card.z_index
    );
    if card.is_interactive() {
        style.push_str(" touch-action: none; cursor: grab;");
    } else {
        style.push_str(" pointer-events: none;");
    }
    if let Some(ms) = transition_ms {
        style.push_str(&format!(" transition: transform {}ms ease-out;", ms));
    }
    style
}

/// Routes a finished swipe to the caller's callback with the card that left
fn swipe_dispatcher<T>(
    data: Signal<Vec<T>>,
    on_swipe_right: Option<Callback<T>>,
    on_swipe_left: Option<Callback<T>>,
) -> Callback<SwipeOutcome>
where
    T: Clone + Send + Sync + 'static,
{
    Callback::new(move |outcome: SwipeOutcome| {
        let run = |callback: Option<Callback<T>>, item: &T| {
            if let Some(callback) = callback {
                callback.run(item.clone());
            }
        };
        data.with_untracked(|items| {
            dispatch_swipe(items, outcome, |item| run(on_swipe_right, item), |item| run(on_swipe_left, item));
        });
    })
}

/// Swipeable card deck
///
/// Props:
/// - data: cards, front first; setting the signal rewinds to the first card
/// - render_card: content of one card
/// - render_no_more_cards: shown once every card was swiped
/// - on_swipe_right / on_swipe_left: called once per completed swipe
/// - config: thresholds and animation tuning
#[component]
pub fn Deck<T, RC, IV>(
    #[prop(into)] data: Signal<Vec<T>>,
    render_card: RC,
    #[prop(optional, into)] render_no_more_cards: ViewFn,
    #[prop(optional, into)] on_swipe_right: Option<Callback<T>>,
    #[prop(optional, into)] on_swipe_left: Option<Callback<T>>,
    #[prop(optional)] config: Option<DeckConfig>,
) -> impl IntoView
where
    T: DeckItem + Clone + Send + Sync + 'static,
    T::Id: Send + Sync + 'static,
    RC: Fn(T) -> IV + Clone + Send + Sync + 'static,
    IV: IntoView + 'static,
{
    let config = platform::resolve_config(config.unwrap_or_default());
    let viewport = platform::viewport();
    let transition_ms = config.exit_duration_ms;

    let on_swipe = swipe_dispatcher(data, on_swipe_right, on_swipe_left);

    let deck = create_deck_signals(data.with_untracked(Vec::len), viewport, config.clone(), on_swipe);
    bind_global_pointer_handlers(deck, move || deck.cancel_drag());

    // New data always rewinds, skip the initial run
    Effect::new(move |prev: Option<()>| {
        let len = data.with(Vec::len);
        if prev.is_some() {
            deck.replace_items(len);
        }
    });

    let stack = Memo::new(move |_| {
        let state = deck.state_read.get();
        data.with(|items| layout_stack(state.index, items.len(), state.offset, viewport, &config))
    });
    let exhausted = Memo::new(move |_| stack.with(StackView::is_empty));
    let index = Memo::new(move |_| deck.state_read.with(|state| state.index));

    // Remaining cards, farthest back first
    let visible = move || {
        let index = index.get();
        data.with(|items| items.iter().cloned().enumerate().skip(index).rev().collect::<Vec<_>>())
    };

    view! {
        <div class="swipe-deck" style="position: relative;">
            {move || {
                if exhausted.get() {
                    return render_no_more_cards.run();
                }
                let render_card = render_card.clone();
                view! {
                    <For
                        each=visible
                        key=|(_, item)| item.id()
                        children=move |(position, item)| {
                            let on_pointerdown = make_on_pointerdown(deck);
                            let style = move || {
                                stack
                                    .with(|view| view.card(position))
                                    .map(|card| {
                                        let settled = deck.state_read.with(|s| s.phase == DeckPhase::Idle);
                                        let transition = (settled && deck.transitioning_read.get()).then_some(transition_ms);
                                        card_style(&card, viewport.width, transition)
                                    })
                                    .unwrap_or_default()
                            };
                            view! {
                                <div
                                    class="swipe-card"
                                    style=style
                                    on:pointerdown=move |ev| {
                                        let interactive = stack.with_untracked(|view| {
                                            view.card(position).is_some_and(|card| card.is_interactive())
                                        });
                                        if interactive {
                                            on_pointerdown(ev);
                                        }
                                    }
                                >
                                    {render_card(item)}
                                </div>
                            }
                        }
                    />
                }
                .into_any()
            }}
        </div>
    }
}
