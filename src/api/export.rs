//! Export operations for the WASM API
//!
//! Tracks arrive either as JavaScript objects or as JSON text and leave as a
//! `Uint8Array` holding one `MTrk` chunk.

use thiserror::Error;
use wasm_bindgen::prelude::*;

use super::helpers::{config_from_js, deserialize, js_error, to_uint8_array};
use crate::models::Track;
use crate::renderers::midi::{render_track_with, MidiError, RenderConfig};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid track JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MIDI encoding failed: {0}")]
    Midi(#[from] MidiError),
}

/// Parse a JSON track and render it to a track chunk
///
/// # Arguments
/// * `json` - Track as JSON (see `models::Track`)
/// * `config` - Render settings
pub fn render_track_json(json: &str, config: &RenderConfig) -> Result<Vec<u8>, ExportError> {
    let track: Track = serde_json::from_str(json)?;
    log::debug!("parsed track JSON: {} bars", track.bars.len());
    Ok(render_track_with(&track, config)?)
}

// ============================================================================
// MIDI Export
// ============================================================================

/// Render a track object to a MIDI track chunk
///
/// # Parameters
/// - `track`: Track object (name, instrument, bars)
/// - `config`: Optional render settings, `undefined` for defaults
///
/// # Returns
/// `MTrk` chunk as Uint8Array
#[wasm_bindgen(js_name = renderTrack)]
pub fn render_track_js(track: JsValue, config: JsValue) -> Result<js_sys::Uint8Array, JsValue> {
    let track: Track = deserialize(track, "Invalid track")?;
    let config = config_from_js(config)?;
    log::info!("renderTrack called: {} bars", track.bars.len());

    let chunk = render_track_with(&track, &config)
        .map_err(|e| js_error("MIDI encoding error", e))?;

    log::info!("renderTrack completed: {} bytes", chunk.len());
    Ok(to_uint8_array(&chunk))
}

/// Render a JSON track to a MIDI track chunk
#[wasm_bindgen(js_name = renderTrackJson)]
pub fn render_track_json_js(json: &str, config: JsValue) -> Result<js_sys::Uint8Array, JsValue> {
    let config = config_from_js(config)?;
    let chunk = render_track_json(json, &config).map_err(|e| js_error("renderTrackJson", e))?;
    Ok(to_uint8_array(&chunk))
}
