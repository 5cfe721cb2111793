//! Platform Flags
//!
//! Browser facts the deck needs, each resolved once at startup.

use std::sync::OnceLock;

use swipe_deck_core::{DeckConfig, Viewport};

/// Used when the window size cannot be read (e.g. no `window`)
const FALLBACK_VIEWPORT: Viewport = Viewport { width: 375.0, height: 667.0 };

static VIEWPORT: OnceLock<Viewport> = OnceLock::new();
static REDUCED_MOTION: OnceLock<bool> = OnceLock::new();

fn read_window_size() -> Option<Viewport> {
    let win = web_sys::window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

/// Window size at first call. Later resizes are not observed.
pub fn viewport() -> Viewport {
    *VIEWPORT.get_or_init(|| {
        read_window_size().unwrap_or_else(|| {
            log::warn!(
                "[Platform] window size unavailable, using {}x{}",
                FALLBACK_VIEWPORT.width,
                FALLBACK_VIEWPORT.height
            );
            FALLBACK_VIEWPORT
        })
    })
}

/// Whether the user asked the OS for reduced motion
pub fn prefers_reduced_motion() -> bool {
    *REDUCED_MOTION.get_or_init(|| {
        let reduced = web_sys::window()
            .and_then(|win| win.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false);
        log::debug!("[Platform] prefers-reduced-motion: {}", reduced);
        reduced
    })
}

/// Apply platform flags to a configuration
pub fn resolve_config(config: DeckConfig) -> DeckConfig {
    DeckConfig {
        layout_animation: config.layout_animation && !prefers_reduced_motion(),
        ..config
    }
}
