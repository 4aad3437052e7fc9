//! Error types for MIDI track encoding
//!
//! Every variant describes malformed input from the score model. Rendering
//! stops at the first error and no partial output is returned.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MidiError {
    #[error("invalid MIDI channel {0} (must be 0-15)")]
    InvalidChannel(u8),

    /// Event type codes are the high status nibble, 0x8 through 0xE
    #[error("invalid channel event type 0x{0:x}")]
    InvalidEventType(u8),

    #[error("event type 0x{kind:x} takes {expected} data bytes, got {count}")]
    InvalidParameterCount { kind: u8, expected: usize, count: usize },

    #[error("data byte {0} out of range (must be 0-127)")]
    InvalidDataByte(i64),

    #[error("meter denominator {0} is not a power of two")]
    InvalidDenominator(u32),

    #[error("invalid tempo {0} bpm")]
    InvalidTempo(u32),

    /// Delta-times are limited to four VLQ bytes (28 bits)
    #[error("duration of {0} ticks is too long for a delta-time")]
    DurationTooLong(u64),

    #[error("cannot encode negative quantity {0}")]
    NegativeQuantity(i64),

    #[error("variable-length quantity is truncated")]
    TruncatedQuantity,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("track data too long for a chunk: {0} bytes")]
    TrackTooLong(usize),
}

pub type Result<T> = std::result::Result<T, MidiError>;
