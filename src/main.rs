//! Study Tracker Frontend Entry Point

mod app;
mod backend;
mod components;
mod context;
mod models;
mod realtime;
mod store;
mod timers;

use app::App;
use leptos::prelude::*;

/// Lines kept in the in-memory log buffer
const LOG_CAPACITY: usize = 500;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init_logger("StudyTracker", LOG_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already initialised: {}", err).into());
    }
    mount_to_body(App);
}
