//! Notes and simultaneous note groups
//!
//! Notes carry their own optional velocity/channel plus an optional dynamics
//! mapping that acts as a fallback. Resolution against the render defaults
//! happens in the track assembler, not here.

use serde::{Deserialize, Serialize};

/// Fallback performance attributes attached to a note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dynamics {
    pub velocity: Option<u8>,
    pub channel: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Integer semitone value of the score model (C-4 = 48)
    pub pitch: i32,
    #[serde(default)]
    pub velocity: Option<u8>,
    #[serde(default)]
    pub channel: Option<u8>,
    #[serde(default)]
    pub dynamics: Dynamics,
}

impl Note {
    pub fn new(pitch: i32) -> Self {
        Note {
            pitch,
            velocity: None,
            channel: None,
            dynamics: Dynamics::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    /// Velocity: explicit attribute, then dynamics, then `default`
    pub fn resolve_velocity(&self, default: u8) -> u8 {
        self.velocity.or(self.dynamics.velocity).unwrap_or(default)
    }

    /// Channel: explicit attribute, then dynamics, then `default`
    pub fn resolve_channel(&self, default: u8) -> u8 {
        self.channel.or(self.dynamics.channel).unwrap_or(default)
    }
}

/// Notes sounding at the same time: empty (rest), single note or chord
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteGroup {
    pub notes: Vec<Note>,
}

impl NoteGroup {
    pub fn new() -> Self {
        NoteGroup { notes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl From<Vec<Note>> for NoteGroup {
    fn from(notes: Vec<Note>) -> Self {
        NoteGroup { notes }
    }
}

impl From<Note> for NoteGroup {
    fn from(note: Note) -> Self {
        NoteGroup { notes: vec![note] }
    }
}

impl FromIterator<Note> for NoteGroup {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        NoteGroup {
            notes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NoteGroup {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
