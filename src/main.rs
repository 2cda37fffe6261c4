//! StudySwap Frontend Entry Point

mod api;
mod app;
mod checkout;
mod components;
mod config;
mod context;
mod error;
mod markdown;
mod models;
mod pages;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init(log::LevelFilter::Info, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::error_1(&format!("logger init failed: {}", err).into());
    }
    log::info!("[app] starting StudySwap");
    mount_to_body(App);
}
