//! Track assembly
//!
//! Walks a `Track` bar by bar and slot by slot, driving the event encoders
//! and threading a single `EncoderState` through every step.
//!
//! Order of events for a track:
//! 1. track name (delta 0), when the track has one
//! 2. initial tempo from the config (delta 0)
//! 3. per bar: time signature carrying the silence left over from the
//!    previous bar, then the key signature at delta 0
//! 4. per sounding slot: optional tempo change, pending instrument change,
//!    note-ons, then note-offs one slot length later
//!
//! Rests produce no events. Their length is added to the delay carried by
//! the next event.

use log::debug;

use super::chunk;
use super::defaults::{RenderConfig, DEFAULT_TEMPO_BPM};
use super::error::{MidiError, Result};
use super::events;
use super::meta;
use super::state::EncoderState;
use crate::models::{Bar, Instrument, Key, Meter, Note, NoteGroup, Slot, Track};

/// Render a track with the default configuration
///
/// # Returns
/// The complete `MTrk` chunk, ready to be concatenated into a MIDI file
pub fn render_track(track: &Track) -> Result<Vec<u8>> {
    render_track_with(track, &RenderConfig::default())
}

pub fn render_track_with(track: &Track, config: &RenderConfig) -> Result<Vec<u8>> {
    let mut assembler = TrackAssembler::new(*config);
    assembler.play_track(track)?;
    assembler.midi_data()
}

#[derive(Debug, Clone)]
pub struct TrackAssembler {
    config: RenderConfig,
    state: EncoderState,
}

impl TrackAssembler {
    pub fn new(config: RenderConfig) -> Self {
        let tempo = config.initial_tempo.unwrap_or(DEFAULT_TEMPO_BPM);
        TrackAssembler {
            config,
            state: EncoderState::new(tempo),
        }
    }

    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Events assembled so far, without chunk framing
    pub fn track_data(&self) -> &[u8] {
        self.state.buffer()
    }

    pub fn header(&self) -> Result<[u8; 8]> {
        chunk::header(self.state.buffer().len())
    }

    /// Framed chunk: header, events and end-of-track marker
    pub fn midi_data(&self) -> Result<Vec<u8>> {
        chunk::frame_track(self.state.buffer())
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn set_delta_time(&mut self, ticks: u32) {
        self.state.set_delta_time(ticks);
    }

    // ========================================================================
    // Meta events
    // ========================================================================

    /// Track name at delta 0; the delta-time register is left untouched
    pub fn set_track_name(&mut self, name: &str) {
        let event = meta::track_name_event(name);
        self.state.push(&event);
    }

    pub fn set_tempo(&mut self, bpm: u32) -> Result<()> {
        let delta = self.state.take_delta_time();
        let event = meta::tempo_event(&delta, bpm)?;
        self.state.set_tempo(bpm);
        self.state.push(&event);
        Ok(())
    }

    pub fn set_meter(&mut self, meter: &Meter) -> Result<()> {
        let delta = self.state.take_delta_time();
        let event = meta::time_signature_event(&delta, meter)?;
        self.state.push(&event);
        Ok(())
    }

    pub fn set_key(&mut self, key: &Key) -> Result<()> {
        let delta = self.state.take_delta_time();
        let event = meta::key_signature_event(&delta, key)?;
        self.state.push(&event);
        Ok(())
    }

    // ========================================================================
    // Channel events
    // ========================================================================

    /// Bank select followed by program change
    pub fn set_instrument(&mut self, channel: u8, program: u8, bank: u8) -> Result<()> {
        let delta = self.state.take_delta_time();
        let select = events::select_bank(&delta, channel, bank)?;
        let delta = self.state.take_delta_time();
        let change = events::program_change(&delta, channel, program)?;
        self.state.push(&select);
        self.state.push(&change);
        Ok(())
    }

    fn midi_key(&self, note: &Note) -> Result<u8> {
        let key = note.pitch as i64 + self.config.pitch_offset as i64;
        u8::try_from(key)
            .ok()
            .filter(|k| *k < 0x80)
            .ok_or(MidiError::InvalidDataByte(key))
    }

    pub fn play_note(&mut self, note: &Note) -> Result<()> {
        let channel = note.resolve_channel(self.config.default_channel);
        let velocity = note.resolve_velocity(self.config.default_velocity);
        let key = self.midi_key(note)?;

        if let Some(instrument) = self.state.take_instrument() {
            let bank = instrument.bank.unwrap_or(self.config.default_bank);
            self.set_instrument(channel, instrument.program, bank)?;
        }

        let delta = self.state.take_delta_time();
        let event = events::note_on(&delta, channel, key, velocity)?;
        self.state.push(&event);
        Ok(())
    }

    pub fn stop_note(&mut self, note: &Note) -> Result<()> {
        let channel = note.resolve_channel(self.config.default_channel);
        let velocity = note.resolve_velocity(self.config.default_velocity);
        let key = self.midi_key(note)?;

        let delta = self.state.take_delta_time();
        let event = events::note_off(&delta, channel, key, velocity)?;
        self.state.push(&event);
        Ok(())
    }

    /// Note-ons for a group; only the first carries elapsed time
    pub fn play_note_group(&mut self, group: &NoteGroup) -> Result<()> {
        for (i, note) in group.iter().enumerate() {
            if i > 0 {
                self.state.set_delta_time(0);
            }
            self.play_note(note)?;
        }
        Ok(())
    }

    /// Note-offs for a group; only the first carries elapsed time
    pub fn stop_note_group(&mut self, group: &NoteGroup) -> Result<()> {
        for (i, note) in group.iter().enumerate() {
            if i > 0 {
                self.state.set_delta_time(0);
            }
            self.stop_note(note)?;
        }
        Ok(())
    }

    // ========================================================================
    // Score traversal
    // ========================================================================

    /// Sound one slot, or add its length to the pending delay if it is a rest
    ///
    /// A slot tempo change is written at delta 0, ahead of the silence
    /// flushed from preceding rests, so the new tempo already governs those
    /// rests. The flushed delay is carried by the first note-on.
    pub fn play_slot(&mut self, slot: &Slot) -> Result<()> {
        let ticks = self.config.ticks_for(slot.duration)?;
        let Some(group) = slot.sounding() else {
            return self.state.delay(ticks);
        };

        self.state.flush_delay();
        if let Some(bpm) = slot.tempo {
            let event = meta::tempo_event(&[0x00], bpm)?;
            self.state.set_tempo(bpm);
            self.state.push(&event);
        }

        self.play_note_group(group)?;
        self.state.set_delta_time(ticks);
        self.stop_note_group(group)
    }

    pub fn play_bar(&mut self, bar: &Bar) -> Result<()> {
        debug!(
            "bar {}/{} in {}: {} slots",
            bar.meter.numerator,
            bar.meter.denominator,
            bar.key,
            bar.slots.len()
        );
        self.state.flush_delay();
        self.set_meter(&bar.meter)?;
        self.state.set_delta_time(0);
        self.set_key(&bar.key)?;

        for slot in &bar.slots {
            self.play_slot(slot)?;
        }
        Ok(())
    }

    pub fn play_track(&mut self, track: &Track) -> Result<()> {
        debug!(
            "rendering track {:?}: {} bars",
            track.name.as_deref().unwrap_or(""),
            track.bars.len()
        );
        if let Some(name) = &track.name {
            self.set_track_name(name);
        }
        if let Some(bpm) = self.config.initial_tempo {
            self.state.set_delta_time(0);
            self.set_tempo(bpm)?;
        }

        self.state.clear_delay();
        if let Some(instrument) = track.instrument {
            self.state.request_instrument(instrument);
        }

        for bar in &track.bars {
            self.play_bar(bar)?;
        }
        debug!("track assembled: {} bytes", self.state.buffer().len());
        Ok(())
    }

    /// Queue an instrument change for the next sounding note
    pub fn change_instrument(&mut self, instrument: Instrument) {
        self.state.request_instrument(instrument);
    }
}
