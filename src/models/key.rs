//! Key signature of a bar
//!
//! A key is a tonic name plus a mode. Names follow the case convention used
//! by the score model: an uppercase first letter is a major key ("D", "Bb"),
//! a lowercase first letter is a minor key ("a", "f#").
//!
//! The fifteen keys representable in a MIDI key signature are listed in
//! circle-of-fifths order, seven flats first, so a key's index minus 7 is its
//! signed sharp/flat count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::renderers::midi::error::{MidiError, Result};

/// Major keys from seven flats to seven sharps
pub const MAJOR_KEYS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

/// Minor keys from seven flats to seven sharps
pub const MINOR_KEYS: [&str; 15] = [
    "ab", "eb", "bb", "f", "c", "g", "d", "a", "e", "b", "f#", "c#", "g#", "d#", "a#",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    /// Mode byte of the key signature meta event
    pub fn as_byte(&self) -> u8 {
        match self {
            Mode::Major => 0x00,
            Mode::Minor => 0x01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    /// Tonic spelled with an uppercase letter ("C", "F#", "Bb")
    pub tonic: String,
    pub mode: Mode,
}

impl Key {
    pub fn major(tonic: &str) -> Self {
        Key {
            tonic: capitalize(tonic),
            mode: Mode::Major,
        }
    }

    pub fn minor(tonic: &str) -> Self {
        Key {
            tonic: capitalize(tonic),
            mode: Mode::Minor,
        }
    }

    /// Name in the case convention ("D" for D major, "a" for A minor)
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Major => self.tonic.clone(),
            Mode::Minor => self.tonic.to_lowercase(),
        }
    }

    /// Signed number of sharps (positive) or flats (negative), -7..=7
    pub fn fifths(&self) -> Result<i8> {
        let name = self.name();
        let table = match self.mode {
            Mode::Major => &MAJOR_KEYS,
            Mode::Minor => &MINOR_KEYS,
        };
        table
            .iter()
            .position(|k| *k == name)
            .map(|index| index as i8 - 7)
            .ok_or(MidiError::UnknownKey(name))
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::major("C")
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = MidiError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.chars().next() {
            Some(first) if first.is_lowercase() => Ok(Key::minor(s)),
            Some(_) => Ok(Key::major(s)),
            None => Err(MidiError::UnknownKey(String::new())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = MidiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_convention() {
        let d: Key = "D".parse().unwrap();
        assert_eq!(d.mode, Mode::Major);
        assert_eq!(d.tonic, "D");

        let a: Key = "a".parse().unwrap();
        assert_eq!(a.mode, Mode::Minor);
        assert_eq!(a.tonic, "A");
        assert_eq!(a.name(), "a");
    }

    #[test]
    fn test_fifths_major() {
        assert_eq!(Key::major("C").fifths().unwrap(), 0);
        assert_eq!(Key::major("D").fifths().unwrap(), 2);
        assert_eq!(Key::major("F").fifths().unwrap(), -1);
        assert_eq!(Key::major("Cb").fifths().unwrap(), -7);
        assert_eq!(Key::major("C#").fifths().unwrap(), 7);
    }

    #[test]
    fn test_fifths_minor() {
        assert_eq!(Key::minor("a").fifths().unwrap(), 0);
        assert_eq!(Key::minor("A").fifths().unwrap(), 0);
        assert_eq!(Key::minor("e").fifths().unwrap(), 1);
        assert_eq!(Key::minor("Bb").fifths().unwrap(), -5);
        assert_eq!(Key::minor("a#").fifths().unwrap(), 7);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            Key::major("H").fifths(),
            Err(MidiError::UnknownKey("H".to_string()))
        );
        // D# major is spelled Eb in the table
        assert!(Key::major("D#").fifths().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_serde_uses_name() {
        let json = serde_json::to_string(&Key::minor("F#")).unwrap();
        assert_eq!(json, "\"f#\"");

        let parsed: Key = serde_json::from_str("\"Eb\"").unwrap();
        assert_eq!(parsed, Key::major("Eb"));
    }
}
