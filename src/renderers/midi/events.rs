//! Channel voice events
//!
//! Pure encoders: each takes the delta-time bytes to prefix and returns the
//! complete event. Status byte is the event type in the high nibble and the
//! channel in the low nibble, followed by one or two data bytes.

use super::error::{MidiError, Result};

/// Controller number of the bank select (MSB) controller
pub const BANK_SELECT: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    NoteOff = 0x8,
    NoteOn = 0x9,
    Aftertouch = 0xA,
    Controller = 0xB,
    ProgramChange = 0xC,
    ChannelPressure = 0xD,
    PitchBend = 0xE,
}

impl EventKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0x8 => Ok(EventKind::NoteOff),
            0x9 => Ok(EventKind::NoteOn),
            0xA => Ok(EventKind::Aftertouch),
            0xB => Ok(EventKind::Controller),
            0xC => Ok(EventKind::ProgramChange),
            0xD => Ok(EventKind::ChannelPressure),
            0xE => Ok(EventKind::PitchBend),
            _ => Err(MidiError::InvalidEventType(code)),
        }
    }

    /// Number of data bytes following the status byte
    pub fn data_len(self) -> usize {
        match self {
            EventKind::ProgramChange | EventKind::ChannelPressure => 1,
            _ => 2,
        }
    }
}

fn data_byte(value: u8) -> Result<u8> {
    if value < 0x80 {
        Ok(value)
    } else {
        Err(MidiError::InvalidDataByte(value as i64))
    }
}

/// Build a channel event from a raw type code
///
/// # Arguments
/// * `delta` - Encoded delta-time to prefix
/// * `event_type` - Status nibble (0x8-0xE)
/// * `channel` - MIDI channel 0-15
/// * `param1` - First data byte
/// * `param2` - Second data byte, absent for one-byte events
pub fn midi_event(
    delta: &[u8],
    event_type: u8,
    channel: u8,
    param1: u8,
    param2: Option<u8>,
) -> Result<Vec<u8>> {
    let kind = EventKind::from_code(event_type)?;
    let count = if param2.is_some() { 2 } else { 1 };
    if count != kind.data_len() {
        return Err(MidiError::InvalidParameterCount {
            kind: kind.code(),
            expected: kind.data_len(),
            count,
        });
    }
    if channel >= 16 {
        return Err(MidiError::InvalidChannel(channel));
    }

    let mut event = Vec::with_capacity(delta.len() + 3);
    event.extend_from_slice(delta);
    event.push(kind.code() << 4 | channel);
    event.push(data_byte(param1)?);
    if let Some(param2) = param2 {
        event.push(data_byte(param2)?);
    }
    Ok(event)
}

pub fn note_on(delta: &[u8], channel: u8, key: u8, velocity: u8) -> Result<Vec<u8>> {
    midi_event(delta, EventKind::NoteOn.code(), channel, key, Some(velocity))
}

pub fn note_off(delta: &[u8], channel: u8, key: u8, velocity: u8) -> Result<Vec<u8>> {
    midi_event(delta, EventKind::NoteOff.code(), channel, key, Some(velocity))
}

pub fn controller_event(delta: &[u8], channel: u8, controller: u8, value: u8) -> Result<Vec<u8>> {
    midi_event(delta, EventKind::Controller.code(), channel, controller, Some(value))
}

pub fn program_change(delta: &[u8], channel: u8, program: u8) -> Result<Vec<u8>> {
    midi_event(delta, EventKind::ProgramChange.code(), channel, program, None)
}

pub fn select_bank(delta: &[u8], channel: u8, bank: u8) -> Result<Vec<u8>> {
    controller_event(delta, channel, BANK_SELECT, bank)
}
