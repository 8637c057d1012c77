//! Folio UI entry point for WASM.

#![no_main]

use folio_ui::App;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Some(window) = web_sys::window()
        && let Some(document) = window.document()
        && let Some(loading) = document.get_element_by_id("loading")
    {
        loading.remove();
    }

    mount_to_body(App);
}
