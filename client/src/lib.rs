//! # luma-client
//!
//! Leptos + WASM frontend for the LUMA room redesign studio.
//!
//! This crate contains the root app, the UI components (style selector,
//! compare slider, design consultant chat, upload controls), and the glue that
//! binds the `luma` session to a reactive signal. Browser-only code is gated
//! behind the `csr` feature so the crate still builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: install console hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("console logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
