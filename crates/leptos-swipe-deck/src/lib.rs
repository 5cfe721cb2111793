//! Leptos Swipe Deck
//!
//! Binds `swipe-deck-core` to the browser: pointer events feed the deck
//! machine, `requestAnimationFrame` drives its animations, and signals
//! publish its state to the `Deck` component.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use swipe_deck_core::{DeckMachine, DeckPhase, DeckState};

pub use swipe_deck_core::{
    CardLayout, DeckConfig, DeckItem, DragHandler, Point, SpringConfig, SwipeDirection, SwipeOutcome, Viewport,
};

mod deck;
pub mod platform;

pub use deck::{card_style, Deck, DeckProps};

/// Deck state signals
#[derive(Clone, Copy)]
pub struct DeckSignals {
    machine: StoredValue<DeckMachine>,
    pub(crate) state_read: ReadSignal<DeckState>,
    state_write: WriteSignal<DeckState>,
    /// True while a layout transition is running after the top card changed
    pub(crate) transitioning_read: ReadSignal<bool>,
    transitioning_write: WriteSignal<bool>,
    transition_gate: StoredValue<TransitionGate>,
    /// Set while an animation frame is requested
    frame_pending: StoredValue<bool>,
    last_frame_ms: StoredValue<Option<f64>>,
    on_swipe: Callback<SwipeOutcome>,
}

pub fn create_deck_signals(
    len: usize,
    viewport: Viewport,
    config: DeckConfig,
    on_swipe: Callback<SwipeOutcome>,
) -> DeckSignals {
    let machine = DeckMachine::new(len, viewport, config);
    let (state_read, state_write) = signal(machine.state());
    let (transitioning_read, transitioning_write) = signal(false);
    DeckSignals {
        machine: StoredValue::new(machine),
        state_read,
        state_write,
        transitioning_read,
        transitioning_write,
        transition_gate: StoredValue::new(TransitionGate::default()),
        frame_pending: StoredValue::new(false),
        last_frame_ms: StoredValue::new(None),
        on_swipe,
    }
}

impl DeckSignals {
    /// The item list was replaced
    pub fn replace_items(&self, len: usize) {
        self.machine.update_value(|m| m.replace_items(len));
        self.sync();
    }

    /// Pointer was cancelled by the browser mid-drag
    pub fn cancel_drag(&self) {
        self.machine.update_value(DeckMachine::cancel_drag);
        self.sync();
        ensure_frame_loop(*self);
    }

    /// Publish machine state to signals
    fn sync(&self) {
        let Some((state, transition, duration_ms)) = self
            .machine
            .try_update_value(|m| (m.state(), m.take_layout_transition(), m.config().exit_duration_ms))
        else {
            return;
        };
        self.state_write.set(state);
        if transition {
            start_layout_transition(*self, duration_ms);
        }
    }
}

impl DragHandler for DeckSignals {
    fn on_drag_start(&mut self, at: Point) -> bool {
        let started = self.machine.try_update_value(|m| m.on_drag_start(at)).unwrap_or(false);
        if started {
            self.sync();
        }
        started
    }

    fn on_drag_move(&mut self, at: Point) {
        if self.state_read.get_untracked().phase != DeckPhase::Dragging {
            return;
        }
        self.machine.update_value(|m| m.on_drag_move(at));
        self.sync();
    }

    fn on_drag_end(&mut self, at: Point) {
        if self.state_read.get_untracked().phase != DeckPhase::Dragging {
            return;
        }
        self.machine.update_value(|m| m.on_drag_end(at));
        self.sync();
        ensure_frame_loop(*self);
    }
}

/// Counts layout transitions so a timer only clears the flag it raised
#[derive(Debug, Default, Clone, Copy)]
struct TransitionGate {
    generation: u64,
}

impl TransitionGate {
    /// Start a new transition, superseding any earlier one
    fn open(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// True if no transition started after `generation`
    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Flag a layout transition and clear it once it has had time to play
fn start_layout_transition(deck: DeckSignals, duration_ms: f64) {
    let Some(generation) = deck.transition_gate.try_update_value(TransitionGate::open) else {
        return;
    };
    deck.transitioning_write.set(true);

    if let Some(win) = web_sys::window() {
        let cb = Closure::<dyn FnMut()>::new(move || {
            // Deck may be gone by now, or a later transition owns the flag
            let current = deck.transition_gate.try_with_value(|gate| gate.is_current(generation));
            if current == Some(true) {
                let _ = deck.transitioning_write.try_set(false);
            }
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            duration_ms.ceil() as i32,
        );
        cb.forget();
    }
}

fn now_ms() -> Option<f64> {
    web_sys::window()?.performance().map(|p| p.now())
}

/// Start the frame loop if an animation is running and no frame is pending
fn ensure_frame_loop(deck: DeckSignals) {
    let animating = deck.machine.try_with_value(DeckMachine::is_animating).unwrap_or(false);
    if !animating || deck.frame_pending.get_value() {
        return;
    }
    deck.frame_pending.set_value(true);
    deck.last_frame_ms.set_value(now_ms());
    request_frame(deck);
}

fn request_frame(deck: DeckSignals) {
    let Some(win) = web_sys::window() else {
        deck.frame_pending.set_value(false);
        return;
    };
    let cb = Closure::once_into_js(move |now: f64| on_frame(deck, now));
    if win.request_animation_frame(cb.unchecked_ref()).is_err() {
        log::warn!("[Deck] requestAnimationFrame failed, animation stalled");
        deck.frame_pending.set_value(false);
    }
}

fn on_frame(deck: DeckSignals, now: f64) {
    // Deck was unmounted while a frame was in flight
    let Some(last) = deck.last_frame_ms.try_get_value() else {
        return;
    };
    let dt = last.map_or(0.0, |prev| (now - prev).max(0.0));
    deck.last_frame_ms.set_value(Some(now));

    let outcome = deck.machine.try_update_value(|m| m.tick(dt)).flatten();
    deck.sync();
    if let Some(outcome) = outcome {
        deck.on_swipe.run(outcome);
    }

    if deck.machine.try_with_value(DeckMachine::is_animating).unwrap_or(false) {
        request_frame(deck);
    } else {
        deck.frame_pending.set_value(false);
    }
}

fn point_of(ev: &web_sys::PointerEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Create pointerdown handler for the top card.
/// Only the primary pointer's primary button starts a drag.
pub fn make_on_pointerdown<H>(handler: H) -> impl Fn(web_sys::PointerEvent) + Copy + 'static
where
    H: DragHandler + Copy + 'static,
{
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 || !ev.is_primary() {
            return;
        }
        let mut handler = handler;
        if handler.on_drag_start(point_of(&ev)) {
            ev.prevent_default();
        }
    }
}

/// Bind window pointermove/pointerup/pointercancel for the lifetime of the
/// calling component, so a drag keeps tracking outside the card
pub fn bind_global_pointer_handlers<H, C>(handler: H, on_cancel: C)
where
    H: DragHandler + Copy + 'static,
    C: Fn() + 'static,
{
    let move_handle = window_event_listener(leptos::ev::pointermove, move |ev| {
        if ev.is_primary() {
            let mut handler = handler;
            handler.on_drag_move(point_of(&ev));
        }
    });
    let up_handle = window_event_listener(leptos::ev::pointerup, move |ev| {
        if ev.is_primary() {
            let mut handler = handler;
            handler.on_drag_end(point_of(&ev));
        }
    });
    let cancel_handle = window_event_listener(leptos::ev::pointercancel, move |ev| {
        if ev.is_primary() {
            on_cancel();
        }
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
        cancel_handle.remove();
    });
}
