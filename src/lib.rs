//! Score to MIDI track encoder
//!
//! Translates a score model (notes, chords, metered bars, tracks) into the
//! bytes of a MIDI track chunk. Usable as a Rust library or as a WASM module.

pub mod models;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use renderers::midi::{render_track, render_track_with, MidiError, RenderConfig, TrackAssembler};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // a second init (module re-instantiated) keeps the existing logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("score-midi WASM module initialized");
}
