//! Renderers module
//!
//! Output formats the score model can be encoded into.

pub mod midi;

pub use midi::{render_track, render_track_with, MidiError, RenderConfig};
