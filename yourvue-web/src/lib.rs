#![forbid(unsafe_code)]
//! Browser host for the YourVue wizard.
//!
//! Wires the core session to `localStorage` and the page clock, and exposes
//! it to a JavaScript UI as JSON commands in, JSON snapshots out.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bridge;
pub mod dom;
pub mod storage;

pub use bridge::{BridgeError, WizardBridge};
pub use storage::LocalStorage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    log::info!("yourvue-web loaded");
}
