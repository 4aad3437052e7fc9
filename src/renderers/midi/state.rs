//! Encoder state for a single track
//!
//! The delta-time register always holds the time since the previous emitted
//! event, VLQ-encoded. Emitting an event takes the register and leaves it at
//! zero. Silent slots accumulate in `pending_delay` instead, and reach the
//! register only when the next sounding slot flushes them.

use log::trace;

use super::error::{MidiError, Result};
use super::vlq;
use crate::models::Instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderState {
    buffer: Vec<u8>,
    delta_time: Vec<u8>,
    pending_delay: u32,
    current_tempo: u32,
    pending_instrument: Option<Instrument>,
}

impl EncoderState {
    pub fn new(tempo: u32) -> Self {
        EncoderState {
            buffer: Vec::new(),
            delta_time: vec![0x00],
            pending_delay: 0,
            current_tempo: tempo,
            pending_instrument: None,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn delta_time(&self) -> &[u8] {
        &self.delta_time
    }

    pub fn pending_delay(&self) -> u32 {
        self.pending_delay
    }

    pub fn current_tempo(&self) -> u32 {
        self.current_tempo
    }

    pub fn pending_instrument(&self) -> Option<Instrument> {
        self.pending_instrument
    }

    pub fn set_delta_time(&mut self, ticks: u32) {
        self.delta_time = vlq::encode_u32(ticks);
    }

    /// Hand out the register for the next event and reset it to zero
    pub fn take_delta_time(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.delta_time, vec![0x00])
    }

    /// Accumulate silence until the next sounding slot
    pub fn delay(&mut self, ticks: u32) -> Result<()> {
        let total = self.pending_delay as u64 + ticks as u64;
        if total > vlq::MAX_QUANTITY as u64 {
            return Err(MidiError::DurationTooLong(total));
        }
        self.pending_delay = total as u32;
        Ok(())
    }

    /// Move the accumulated silence into the delta-time register
    pub fn flush_delay(&mut self) {
        let delay = std::mem::take(&mut self.pending_delay);
        self.set_delta_time(delay);
    }

    pub fn clear_delay(&mut self) {
        self.pending_delay = 0;
    }

    pub fn set_tempo(&mut self, bpm: u32) {
        self.current_tempo = bpm;
    }

    pub fn request_instrument(&mut self, instrument: Instrument) {
        self.pending_instrument = Some(instrument);
    }

    pub fn take_instrument(&mut self) -> Option<Instrument> {
        self.pending_instrument.take()
    }

    pub fn push(&mut self, event: &[u8]) {
        trace!("emit {:02X?}", event);
        self.buffer.extend_from_slice(event);
    }

    /// Clear the buffer and the delta-time register
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.delta_time = vec![0x00];
    }
}
