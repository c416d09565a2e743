//! Utility functions for binary reading and channel layout conversion.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Binary reader wrapper for little-endian data (used in packed raw palettes).
pub struct LittleEndianReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> LittleEndianReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        self.cursor.read_u16::<LittleEndian>().ok()
    }
}

/// Rearrange `channels`-wide records (RGBRGB...) into channel planes (RR..GG..BB..).
pub fn interleaved_to_planar(data: &[u8], channels: usize) -> Vec<u8> {
    let entries = data.len() / channels;
    let mut planar = vec![0u8; entries * channels];
    for (index, record) in data.chunks_exact(channels).enumerate() {
        for (channel, &value) in record.iter().enumerate() {
            planar[channel * entries + index] = value;
        }
    }
    planar
}

/// Round to the nearest byte value, halves rounding up, saturating at 0 and 255.
#[inline]
pub fn round_half_up(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Expand a `bits`-wide channel value to the full 0..=255 range.
#[inline]
pub fn scale_to_u8(value: u16, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    (value as u32 * 255 / max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_to_planar() {
        let data = [1, 2, 3, 4, 5, 6];
        assert_eq!(interleaved_to_planar(&data, 3), vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(interleaved_to_planar(&data, 1), data.to_vec());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(1.49), 1);
        assert_eq!(round_half_up(-3.0), 0);
        assert_eq!(round_half_up(300.0), 255);
    }

    #[test]
    fn test_little_endian_reader() {
        let data = [0x34, 0x12, 0xAA, 0xBB, 0xCC];
        let mut reader = LittleEndianReader::new(&data);
        assert_eq!(reader.read_u16(), Some(0x1234));
        assert_eq!(reader.read_u16(), Some(0xBBAA));
        // A trailing odd byte is not a word
        assert_eq!(reader.read_u16(), None);
    }

    #[test]
    fn test_scale_to_u8() {
        assert_eq!(scale_to_u8(31, 5), 255);
        assert_eq!(scale_to_u8(63, 6), 255);
        assert_eq!(scale_to_u8(0, 5), 0);
        assert_eq!(scale_to_u8(16, 5), 131);
    }
}
