//! Score-to-MIDI track encoding
//!
//! Converts a `Track` into a single `MTrk` chunk: delta-time prefixed
//! channel and meta events, closed by the end-of-track marker.
//!
//! # Usage
//! ```rust,ignore
//! use score_midi::renderers::midi::{render_track, render_track_with, RenderConfig};
//!
//! let chunk = render_track(&track)?;
//! let chunk = render_track_with(&track, &RenderConfig { initial_tempo: Some(90), ..Default::default() })?;
//! ```

pub mod assembler;
pub mod chunk;
pub mod defaults;
pub mod error;
pub mod events;
pub mod meta;
pub mod state;
pub mod vlq;

pub use assembler::{render_track, render_track_with, TrackAssembler};
pub use defaults::{
    RenderConfig, DEFAULT_BANK, DEFAULT_CHANNEL, DEFAULT_TEMPO_BPM, DEFAULT_VELOCITY,
    PITCH_OFFSET, TICKS_PER_WHOLE_NOTE,
};
pub use error::{MidiError, Result};
pub use state::EncoderState;
