//! Slots, bars and tracks
//!
//! The hierarchy the track assembler walks: a `Track` is a list of `Bar`s,
//! each `Bar` a list of `Slot`s, each `Slot` a duration plus an optional
//! `NoteGroup`.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use super::key::Key;
use super::note::{Note, NoteGroup};
use crate::renderers::midi::error::{MidiError, Result};

/// Fraction of a whole note (1/4 = quarter note)
pub type Duration = Ratio<u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub duration: Duration,
    #[serde(default)]
    pub notes: Option<NoteGroup>,
    /// Tempo change (beats per minute) taking effect at this slot
    #[serde(default)]
    pub tempo: Option<u32>,
}

impl Slot {
    pub fn new(duration: Duration, notes: Option<NoteGroup>) -> Self {
        Slot {
            duration,
            notes,
            tempo: None,
        }
    }

    pub fn rest(duration: Duration) -> Self {
        Slot::new(duration, None)
    }

    pub fn note(duration: Duration, note: Note) -> Self {
        Slot::new(duration, Some(NoteGroup::from(note)))
    }

    pub fn chord(duration: Duration, notes: Vec<Note>) -> Self {
        Slot::new(duration, Some(NoteGroup::from(notes)))
    }

    pub fn with_tempo(mut self, bpm: u32) -> Self {
        self.tempo = Some(bpm);
        self
    }

    /// Notes to sound, or `None` for a rest
    ///
    /// A slot with no group, or an empty one, only contributes silence.
    pub fn sounding(&self) -> Option<&NoteGroup> {
        self.notes.as_ref().filter(|group| !group.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    pub numerator: u8,
    pub denominator: u32,
}

impl Meter {
    pub fn new(numerator: u8, denominator: u32) -> Self {
        Meter {
            numerator,
            denominator,
        }
    }

    /// log2 of the denominator, as stored in a time signature event
    pub fn denominator_power(&self) -> Result<u8> {
        if self.denominator.is_power_of_two() {
            Ok(self.denominator.trailing_zeros() as u8)
        } else {
            Err(MidiError::InvalidDenominator(self.denominator))
        }
    }
}

impl Default for Meter {
    fn default() -> Self {
        Meter::new(4, 4)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bar {
    pub meter: Meter,
    pub key: Key,
    pub slots: Vec<Slot>,
}

impl Bar {
    pub fn new(meter: Meter, key: Key) -> Self {
        Bar {
            meter,
            key,
            slots: Vec::new(),
        }
    }

    pub fn push(&mut self, slot: Slot) -> &mut Self {
        self.slots.push(slot);
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// General MIDI program number
    pub program: u8,
    #[serde(default)]
    pub bank: Option<u8>,
}

impl Instrument {
    pub fn new(program: u8) -> Self {
        Instrument {
            program,
            bank: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub name: Option<String>,
    pub instrument: Option<Instrument>,
    pub bars: Vec<Bar>,
}

impl Track {
    pub fn new() -> Self {
        Track::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    pub fn with_bar(mut self, bar: Bar) -> Self {
        self.bars.push(bar);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denominator_power() {
        assert_eq!(Meter::new(4, 4).denominator_power().unwrap(), 2);
        assert_eq!(Meter::new(6, 8).denominator_power().unwrap(), 3);
        assert_eq!(Meter::new(2, 1).denominator_power().unwrap(), 0);
        assert_eq!(
            Meter::new(3, 6).denominator_power(),
            Err(MidiError::InvalidDenominator(6))
        );
        assert!(Meter::new(3, 0).denominator_power().is_err());
    }

    #[test]
    fn test_rest_detection() {
        assert_eq!(Slot::rest(Ratio::new(1, 4)).sounding(), None);
        assert_eq!(Slot::new(Ratio::new(1, 4), Some(NoteGroup::new())).sounding(), None);
        let slot = Slot::chord(Ratio::new(1, 4), vec![Note::new(48), Note::new(52)]);
        assert_eq!(slot.sounding().map(NoteGroup::len), Some(2));
    }

    #[test]
    fn test_track_from_json() {
        let json = r#"{
            "name": "Lead",
            "instrument": {"program": 40},
            "bars": [{
                "meter": {"numerator": 3, "denominator": 4},
                "key": "e",
                "slots": [
                    {"duration": [1, 4], "notes": [{"pitch": 52}]},
                    {"duration": [1, 2]}
                ]
            }]
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.name.as_deref(), Some("Lead"));
        assert_eq!(track.instrument, Some(Instrument::new(40)));
        assert_eq!(track.bars[0].key, Key::minor("E"));
        assert_eq!(track.bars[0].slots[0].duration, Ratio::new(1, 4));
        assert!(track.bars[0].slots[1].sounding().is_none());
    }
}
