//! # client
//!
//! Leptos + WASM frontend for SimplifiED, a lecture accessibility app.
//!
//! This crate contains the routing shell, session and theme providers, the
//! email/password and Google sign-in flows backed by a pluggable credential
//! gateway, and the lecture recorder placeholder. The `simplified` host crate
//! renders it on the server; the `hydrate` feature builds the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point called by the generated hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("hydrating SimplifiED client");
    leptos::mount::hydrate_body(app::App);
}
