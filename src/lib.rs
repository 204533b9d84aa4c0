//! # lunch-order
//!
//! Leptos + WASM browser client for the workplace lunch ordering and meal
//! donation service.
//!
//! This crate contains the session store, the navigation guard and route
//! table, typed API calls and DTOs, browser persistence helpers, and the
//! route-level pages. Everything outside `app`, `components` and `pages` is
//! free of Leptos and runs in native unit tests.

pub mod app;
pub mod components;
pub mod config;
pub mod nav;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    leptos::mount::mount_to_body(app::App);
}
