//! Default values for MIDI track rendering
//!
//! `RenderConfig` carries every value the encoder would otherwise take from
//! hidden defaults. It is immutable for the duration of a render.

use serde::{Deserialize, Serialize};

use super::error::{MidiError, Result};
use super::vlq::MAX_QUANTITY;
use crate::models::Duration;

/// Ticks in a whole note; a quarter note is 72 ticks
pub const TICKS_PER_WHOLE_NOTE: u32 = 288;

/// Added to a note's pitch to get the MIDI key number (C-4 = 48 becomes 60)
pub const PITCH_OFFSET: i32 = 12;

/// Default MIDI velocity (1-127, where 64 is "normal")
pub const DEFAULT_VELOCITY: u8 = 64;

pub const DEFAULT_CHANNEL: u8 = 1;

/// Default tempo in beats per minute
pub const DEFAULT_TEMPO_BPM: u32 = 120;

/// Bank selected alongside a program change when the instrument names none
pub const DEFAULT_BANK: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub ticks_per_whole: u32,
    pub pitch_offset: i32,
    pub default_velocity: u8,
    pub default_channel: u8,
    /// Tempo event written at the start of every track
    pub initial_tempo: Option<u32>,
    pub default_bank: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            ticks_per_whole: TICKS_PER_WHOLE_NOTE,
            pitch_offset: PITCH_OFFSET,
            default_velocity: DEFAULT_VELOCITY,
            default_channel: DEFAULT_CHANNEL,
            initial_tempo: Some(DEFAULT_TEMPO_BPM),
            default_bank: DEFAULT_BANK,
        }
    }
}

impl RenderConfig {
    /// Tick length of a slot, rounded to the nearest tick
    ///
    /// For unit fractions this is `ticks_per_whole / denominator`. Halves
    /// round up. Lengths beyond a four-byte delta-time are rejected.
    pub fn ticks_for(&self, duration: Duration) -> Result<u32> {
        // both factors are u32, so the product fits in u64
        let scaled = *duration.numer() as u64 * self.ticks_per_whole as u64;
        let denom = *duration.denom() as u64;
        let whole = scaled
            .checked_div(denom)
            .ok_or(MidiError::DurationTooLong(scaled))?;
        let ticks = if 2 * (scaled % denom) >= denom {
            whole + 1
        } else {
            whole
        };
        if ticks > MAX_QUANTITY as u64 {
            return Err(MidiError::DurationTooLong(ticks));
        }
        Ok(ticks as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.ticks_per_whole, 288);
        assert_eq!(config.pitch_offset, 12);
        assert_eq!(config.default_velocity, 64);
        assert_eq!(config.default_channel, 1);
        assert_eq!(config.initial_tempo, Some(120));
        assert_eq!(config.default_bank, 1);
    }

    #[test]
    fn test_ticks_for() {
        let config = RenderConfig::default();
        assert_eq!(config.ticks_for(Duration::new(1, 1)), Ok(288));
        assert_eq!(config.ticks_for(Duration::new(1, 4)), Ok(72));
        assert_eq!(config.ticks_for(Duration::new(1, 8)), Ok(36));
        assert_eq!(config.ticks_for(Duration::new(1, 64)), Ok(5)); // 4.5 rounds up
        assert_eq!(config.ticks_for(Duration::new(3, 8)), Ok(108)); // dotted quarter
        assert_eq!(config.ticks_for(Duration::new(1, 12)), Ok(24)); // triplet eighth
        assert_eq!(config.ticks_for(Duration::new(0, 1)), Ok(0));
    }

    #[test]
    fn test_ticks_for_long_durations() {
        let config = RenderConfig::default();
        // 20_000_000 whole notes overflow u32 once scaled by 288
        assert_eq!(
            config.ticks_for(Duration::new(20_000_000, 1)),
            Err(MidiError::DurationTooLong(5_760_000_000))
        );
        // 932_067 * 288 = 268_435_296, just under the four-byte limit
        assert_eq!(config.ticks_for(Duration::new(932_067, 1)), Ok(268_435_296));
        assert!(config.ticks_for(Duration::new(932_068, 1)).is_err());
        assert!(config.ticks_for(Duration::new(u32::MAX, 1)).is_err());
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"default_velocity": 100, "initial_tempo": null}"#).unwrap();
        assert_eq!(config.default_velocity, 100);
        assert_eq!(config.initial_tempo, None);
        assert_eq!(config.ticks_per_whole, 288);
    }
}
