//! Meta events
//!
//! Layout: delta-time, `FF`, type byte, VLQ payload length, payload.

use super::error::{MidiError, Result};
use super::vlq;
use crate::models::{Key, Meter};

pub const META_EVENT: u8 = 0xFF;
pub const TRACK_NAME: u8 = 0x03;
pub const END_OF_TRACK: u8 = 0x2F;
pub const SET_TEMPO: u8 = 0x51;
pub const TIME_SIGNATURE: u8 = 0x58;
pub const KEY_SIGNATURE: u8 = 0x59;

const MICROSECONDS_PER_MINUTE: u32 = 60_000_000;

// MIDI clocks per metronome click, notated 32nd notes per quarter
const CLOCKS_PER_CLICK: u8 = 0x18;
const THIRTY_SECONDS_PER_QUARTER: u8 = 0x08;

/// Assemble a meta event from its parts
pub fn meta_event(delta: &[u8], meta_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut event = Vec::with_capacity(delta.len() + payload.len() + 4);
    event.extend_from_slice(delta);
    event.push(META_EVENT);
    event.push(meta_type);
    vlq::write(payload.len() as u64, &mut event);
    event.extend_from_slice(payload);
    event
}

/// Microseconds per quarter note for a tempo, as a 24-bit value
pub fn microseconds_per_quarter(bpm: u32) -> Result<u32> {
    if bpm == 0 {
        return Err(MidiError::InvalidTempo(bpm));
    }
    let mpqn = MICROSECONDS_PER_MINUTE / bpm;
    if mpqn > 0x00FF_FFFF {
        return Err(MidiError::InvalidTempo(bpm));
    }
    Ok(mpqn)
}

pub fn tempo_event(delta: &[u8], bpm: u32) -> Result<Vec<u8>> {
    let mpqn = microseconds_per_quarter(bpm)?.to_be_bytes();
    Ok(meta_event(delta, SET_TEMPO, &mpqn[1..]))
}

pub fn time_signature_event(delta: &[u8], meter: &Meter) -> Result<Vec<u8>> {
    let payload = [
        meter.numerator,
        meter.denominator_power()?,
        CLOCKS_PER_CLICK,
        THIRTY_SECONDS_PER_QUARTER,
    ];
    Ok(meta_event(delta, TIME_SIGNATURE, &payload))
}

pub fn key_signature_event(delta: &[u8], key: &Key) -> Result<Vec<u8>> {
    // two's complement: -3 is stored as 0xFD
    let payload = [key.fifths()? as u8, key.mode.as_byte()];
    Ok(meta_event(delta, KEY_SIGNATURE, &payload))
}

/// Track name event; always at delta-time zero
pub fn track_name_event(name: &str) -> Vec<u8> {
    meta_event(&[0x00], TRACK_NAME, name.as_bytes())
}

pub fn end_of_track() -> [u8; 4] {
    [0x00, META_EVENT, END_OF_TRACK, 0x00]
}
