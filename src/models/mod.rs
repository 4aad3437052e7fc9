//! Score model
//!
//! Plain data describing what to play. All types (de)serialize with serde so
//! a score can be handed over as JSON.

pub mod key;
pub mod note;
pub mod score;

// Re-export commonly used types
pub use key::{Key, Mode, MAJOR_KEYS, MINOR_KEYS};
pub use note::{Dynamics, Note, NoteGroup};
pub use score::{Bar, Duration, Instrument, Meter, Slot, Track};
