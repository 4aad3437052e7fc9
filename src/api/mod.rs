//! WASM API
//!
//! JavaScript-facing entry points. `helpers` holds the JsValue conversions,
//! `export` the render calls.

pub mod helpers;
pub mod export;

pub use export::{render_track_js, render_track_json, render_track_json_js, ExportError};
