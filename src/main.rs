//! Swipe Deck Demo Entry Point

mod models;
mod logger;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);
    mount_to_body(App);
}
