//! Track chunk framing
//!
//! A track chunk is `MTrk`, a big-endian u32 length, the event bytes and the
//! end-of-track meta event. The length counts the end-of-track marker.

use super::error::{MidiError, Result};
use super::meta::end_of_track;

pub const TRACK_HEADER: &[u8; 4] = b"MTrk";

/// Chunk header for `body_len` bytes of events
pub fn header(body_len: usize) -> Result<[u8; 8]> {
    let total = body_len + end_of_track().len();
    let len = u32::try_from(total).map_err(|_| MidiError::TrackTooLong(body_len))?;

    let mut header = [0u8; 8];
    header[..4].copy_from_slice(TRACK_HEADER);
    header[4..].copy_from_slice(&len.to_be_bytes());
    Ok(header)
}

/// Wrap assembled events into a complete chunk
pub fn frame_track(body: &[u8]) -> Result<Vec<u8>> {
    let header = header(body.len())?;
    let mut chunk = Vec::with_capacity(header.len() + body.len() + 4);
    chunk.extend_from_slice(&header);
    chunk.extend_from_slice(body);
    chunk.extend_from_slice(&end_of_track());
    Ok(chunk)
}
