//! Variable-length quantities
//!
//! MIDI stores delta-times and meta event lengths big-endian in 7-bit groups.
//! Every byte except the last has its high bit (0x80) set.

use super::error::{MidiError, Result};

/// Largest value a four-byte quantity can hold, the MIDI limit for delta-times
pub const MAX_QUANTITY: u32 = 0x0FFF_FFFF;

/// Append the encoding of `value` to `out`
pub fn write(value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }

    for i in (0..len).rev() {
        if i > 0 {
            out.push(groups[i] | 0x80);
        } else {
            out.push(groups[i]);
        }
    }
}

/// Encode a quantity, rejecting negative values
pub fn encode(value: i64) -> Result<Vec<u8>> {
    if value < 0 {
        return Err(MidiError::NegativeQuantity(value));
    }
    let mut out = Vec::with_capacity(4);
    write(value as u64, &mut out);
    Ok(out)
}

pub fn encode_u32(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    write(value as u64, &mut out);
    out
}

/// Decode one quantity from the start of `bytes`
///
/// # Returns
/// The value and the number of bytes it occupied
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        value = (value << 7) | (byte & 0x7F) as u64;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(MidiError::TruncatedQuantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0).unwrap(), vec![0x00]);
        assert_eq!(encode(0x40).unwrap(), vec![0x40]);
        assert_eq!(encode(0x7F).unwrap(), vec![0x7F]);
        assert_eq!(encode(0x80).unwrap(), vec![0x81, 0x00]);
        assert_eq!(encode(144).unwrap(), vec![0x81, 0x10]);
        assert_eq!(encode(0x2000).unwrap(), vec![0xC0, 0x00]);
        assert_eq!(encode(0x3FFF).unwrap(), vec![0xFF, 0x7F]);
        assert_eq!(encode(0x4000).unwrap(), vec![0x81, 0x80, 0x00]);
        assert_eq!(encode(0x0FFF_FFFF).unwrap(), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(encode(-1), Err(MidiError::NegativeQuantity(-1)));
    }

    #[test]
    fn test_byte_count_boundaries() {
        assert_eq!(encode_u32(0).len(), 1);
        assert_eq!(encode_u32(127).len(), 1);
        assert_eq!(encode_u32(128).len(), 2);
        assert_eq!(encode_u32(16_383).len(), 2);
        assert_eq!(encode_u32(16_384).len(), 3);
        assert_eq!(encode_u32(2_097_151).len(), 3);
        assert_eq!(encode_u32(2_097_152).len(), 4);
    }

    #[test]
    fn test_round_trip() {
        let mut bytes = Vec::with_capacity(5);
        for value in 0..=(1u64 << 21) {
            bytes.clear();
            write(value, &mut bytes);
            assert_eq!(decode(&bytes).unwrap(), (value, bytes.len()));
        }

        let mut value: u64 = 1 << 21;
        while value <= 1 << 28 {
            bytes.clear();
            write(value, &mut bytes);
            assert_eq!(decode(&bytes).unwrap(), (value, bytes.len()));
            value += 997;
        }

        for value in [127u64, 128, 16_383, 16_384, 2_097_151, 2_097_152, 1 << 28, u32::MAX as u64] {
            let bytes = encode(value as i64).unwrap();
            assert_eq!(decode(&bytes).unwrap(), (value, bytes.len()));
        }
    }

    #[test]
    fn test_decode_stops_at_last_byte() {
        assert_eq!(decode(&[0x81, 0x10, 0x90]).unwrap(), (144, 2));
        assert_eq!(decode(&[0x81, 0x80]), Err(MidiError::TruncatedQuantity));
        assert_eq!(decode(&[]), Err(MidiError::TruncatedQuantity));
    }
}
