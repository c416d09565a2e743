//! Structured palettes: a channel-planar byte buffer plus the color index
//! derived from it.

use std::collections::HashMap;

use super::Mode;
use crate::error::{PaletteError, Result};

/// Maximum number of entries a palette can hold.
pub const PALETTE_ENTRIES: usize = 256;

/// Palette whose bytes are laid out channel-planar: every value of channel 0,
/// then every value of channel 1, and so on.
///
/// `colors` maps each color record found in the buffer to the lowest index
/// holding it and is kept in step with every mutation.
#[derive(Debug, Clone)]
pub struct ChannelPalette {
    mode: Mode,
    buffer: Vec<u8>,
    /// Number of entries per channel plane (the plane stride)
    entries: usize,
    colors: HashMap<Vec<u8>, u8>,
    dirty: bool,
}

impl ChannelPalette {
    /// Create a palette holding the identity ramp 0..=255 in every channel.
    pub fn new(mode: Mode) -> Self {
        let buffer = identity_ramp(mode.channels());
        Self::from_parts(mode, buffer, PALETTE_ENTRIES)
    }

    /// Create a palette from a full-size buffer of exactly `256 * channels` bytes.
    pub fn with_buffer(mode: Mode, buffer: Vec<u8>) -> Result<Self> {
        Self::with_size(mode, buffer, 0)
    }

    /// Create a palette from `buffer`.
    ///
    /// A `size` of zero requires a full-size buffer. A nonzero `size` must
    /// equal the buffer length and describe whole entries, at most 256 of them.
    pub fn with_size(mode: Mode, buffer: Vec<u8>, size: usize) -> Result<Self> {
        let channels = mode.channels();
        let full = PALETTE_ENTRIES * channels;

        if size == 0 {
            if buffer.len() != full {
                return Err(PaletteError::WrongSize {
                    expected: full,
                    actual: buffer.len(),
                });
            }
        } else if size != buffer.len() {
            return Err(PaletteError::WrongSize {
                expected: size,
                actual: buffer.len(),
            });
        }

        let entries = entry_count(channels, buffer.len())?;
        Ok(Self::from_parts(mode, buffer, entries))
    }

    fn from_parts(mode: Mode, buffer: Vec<u8>, entries: usize) -> Self {
        let mut palette = Self {
            mode,
            buffer,
            entries,
            colors: HashMap::new(),
            dirty: false,
        };
        palette.colors = palette.index_colors();
        palette
    }

    /// Replace the whole buffer and re-derive the color index.
    ///
    /// The buffer must hold between 1 and 256 whole entries for the current mode.
    pub fn set_buffer(&mut self, buffer: Vec<u8>) -> Result<()> {
        self.entries = entry_count(self.mode.channels(), buffer.len())?;
        self.buffer = buffer;
        self.colors = self.index_colors();
        Ok(())
    }

    fn index_colors(&self) -> HashMap<Vec<u8>, u8> {
        let mut colors = HashMap::with_capacity(self.entries);
        for index in 0..self.entries {
            colors.entry(self.record(index)).or_insert(index as u8);
        }
        colors
    }

    #[inline]
    fn record(&self, index: usize) -> Vec<u8> {
        (0..self.mode.channels())
            .map(|channel| self.buffer[channel * self.entries + index])
            .collect()
    }

    #[inline]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Number of entries stored per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of distinct colors in the index.
    #[inline]
    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Iterate over `(color, index)` pairs of the color index, in no particular order.
    pub fn colors(&self) -> impl Iterator<Item = (&[u8], u8)> + '_ {
        self.colors.iter().map(|(color, &index)| (color.as_slice(), index))
    }

    /// Channel values of the entry at `index`.
    pub fn entry(&self, index: usize) -> Option<Vec<u8>> {
        (index < self.entries).then(|| self.record(index))
    }

    /// Value of one channel at `index`, or `None` past the stored entries.
    #[inline]
    pub fn channel_value(&self, channel: usize, index: usize) -> Option<u8> {
        if channel >= self.mode.channels() || index >= self.entries {
            return None;
        }
        self.buffer.get(channel * self.entries + index).copied()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Tag and bytes in the form expected by palette consumers
    /// (`<mode>;L`, the channel-planar encoding).
    pub fn get_data(&self) -> (String, Vec<u8>) {
        (format!("{};L", self.mode), self.to_bytes())
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag once the palette has been flushed to its consumer.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Index of `color`, allocating the next free entry when it is not in the
    /// palette yet.
    ///
    /// Lookups of known colors never mutate. A failed allocation leaves the
    /// buffer and color index untouched.
    pub fn get_color(&mut self, color: &[u8]) -> Result<u8> {
        if color.len() != self.mode.channels() {
            return Err(PaletteError::UnknownColorSpecifier(color.to_vec()));
        }
        if let Some(&index) = self.colors.get(color) {
            return Ok(index);
        }

        let index = self.next_free_index().ok_or(PaletteError::CapacityExceeded)?;
        if index >= self.entries {
            self.grow(index + 1);
        }
        for (channel, &value) in color.iter().enumerate() {
            self.buffer[channel * self.entries + index] = value;
        }

        let index = index as u8;
        self.colors.insert(color.to_vec(), index);
        self.dirty = true;
        Ok(index)
    }

    /// Lowest index not referenced by the color index.
    ///
    /// Equals the number of indexed colors whenever the referenced entries
    /// form a prefix, which allocation preserves.
    fn next_free_index(&self) -> Option<usize> {
        let mut used = [false; PALETTE_ENTRIES];
        for &index in self.colors.values() {
            used[index as usize] = true;
        }
        used.iter().position(|&taken| !taken)
    }

    /// Widen every channel plane to `entries`, zero-filling new slots.
    fn grow(&mut self, entries: usize) {
        let channels = self.mode.channels();
        let mut buffer = vec![0u8; channels * entries];
        for channel in 0..channels {
            let src = &self.buffer[channel * self.entries..(channel + 1) * self.entries];
            buffer[channel * entries..channel * entries + self.entries].copy_from_slice(src);
        }
        self.buffer = buffer;
        self.entries = entries;
    }
}

/// The 0..=255 ramp repeated once per channel plane.
pub(crate) fn identity_ramp(channels: usize) -> Vec<u8> {
    (0..channels).flat_map(|_| 0..=u8::MAX).collect()
}

/// Entries described by `len` bytes of `channels`-wide records.
fn entry_count(channels: usize, len: usize) -> Result<usize> {
    let full = PALETTE_ENTRIES * channels;
    if len == 0 || len > full || len % channels != 0 {
        return Err(PaletteError::WrongSize {
            expected: full,
            actual: len,
        });
    }
    Ok(len / channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb() -> Mode {
        Mode::rgb()
    }

    fn black(mode: Mode) -> ChannelPalette {
        let len = PALETTE_ENTRIES * mode.channels();
        ChannelPalette::with_buffer(mode, vec![0; len]).unwrap()
    }

    #[test]
    fn test_identity_buffer_is_channel_planar() {
        let palette = ChannelPalette::new(rgb());
        let bytes = palette.as_bytes();
        assert_eq!(bytes.len(), 768);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[255], 255);
        assert_eq!(bytes[256], 0);
        assert_eq!(bytes[767], 255);
        assert_eq!(palette.entry(7), Some(vec![7, 7, 7]));
        assert_eq!(palette.color_count(), 256);
        assert!(!palette.is_dirty());
    }

    #[test]
    fn test_wrong_size_rejected() {
        assert!(matches!(
            ChannelPalette::with_buffer(rgb(), vec![0; 767]),
            Err(PaletteError::WrongSize { expected: 768, actual: 767 })
        ));
        assert!(ChannelPalette::with_size(rgb(), vec![0; 12], 9).is_err());
        assert!(ChannelPalette::with_size(rgb(), vec![0; 10], 10).is_err());
        assert!(ChannelPalette::with_size(rgb(), vec![0; 771], 771).is_err());
        assert!(ChannelPalette::with_size(rgb(), Vec::new(), 0).is_err());
    }

    #[test]
    fn test_explicit_size() {
        let buffer = vec![1, 2, 10, 20, 100, 200];
        let palette = ChannelPalette::with_size(rgb(), buffer, 6).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entry(0), Some(vec![1, 10, 100]));
        assert_eq!(palette.entry(1), Some(vec![2, 20, 200]));
        assert_eq!(palette.entry(2), None);
    }

    #[test]
    fn test_get_color_is_idempotent() {
        let mut palette = black(rgb());
        let first = palette.get_color(&[255, 0, 0]).unwrap();
        let count = palette.color_count();
        let second = palette.get_color(&[255, 0, 0]).unwrap();
        assert_eq!(first, second);
        assert_eq!(palette.color_count(), count);
    }

    #[test]
    fn test_existing_color_lookup_does_not_dirty() {
        let mut palette = ChannelPalette::new(rgb());
        assert_eq!(palette.get_color(&[42, 42, 42]).unwrap(), 42);
        assert!(!palette.is_dirty());
    }

    #[test]
    fn test_allocation_order() {
        let mut palette = black(rgb());
        let before = palette.color_count();
        assert_eq!(before, 1);

        let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]];
        for (offset, color) in colors.iter().enumerate() {
            assert_eq!(palette.get_color(color).unwrap() as usize, before + offset);
        }
        assert!(palette.is_dirty());

        // Channel-planar write path
        let bytes = palette.as_bytes();
        assert_eq!((bytes[1], bytes[257], bytes[513]), (255, 0, 0));
        assert_eq!((bytes[3], bytes[259], bytes[515]), (0, 0, 255));
    }

    #[test]
    fn test_capacity_exceeded_is_atomic() {
        let mut palette = ChannelPalette::new(rgb());
        assert_eq!(palette.color_count(), 256);
        let bytes = palette.to_bytes();

        assert!(matches!(
            palette.get_color(&[1, 2, 3]),
            Err(PaletteError::CapacityExceeded)
        ));
        assert_eq!(palette.color_count(), 256);
        assert_eq!(palette.as_bytes(), &bytes[..]);
        assert!(!palette.is_dirty());
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut palette = black(rgb());
        for value in 1..=255u8 {
            assert_eq!(palette.get_color(&[value, 0, 0]).unwrap(), value);
        }
        assert_eq!(palette.color_count(), 256);
        let bytes = palette.to_bytes();

        assert!(matches!(
            palette.get_color(&[0, 0, 1]),
            Err(PaletteError::CapacityExceeded)
        ));
        assert_eq!(palette.color_count(), 256);
        assert_eq!(palette.as_bytes(), &bytes[..]);
        assert_eq!(palette.get_color(&[255, 0, 0]).unwrap(), 255);
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut palette = black(rgb());
        assert!(matches!(
            palette.get_color(&[1, 2]),
            Err(PaletteError::UnknownColorSpecifier(_))
        ));
        assert_eq!(palette.color_count(), 1);
        assert!(!palette.is_dirty());
    }

    #[test]
    fn test_incremental_index_matches_rebuild() {
        let mut palette = black(rgb());
        for i in 0..40u8 {
            palette.get_color(&[i, 255 - i, i / 2]).unwrap();
            palette.get_color(&[i, 255 - i, i / 2]).unwrap();
        }
        assert_eq!(palette.index_colors(), palette.colors);

        let mut palette = ChannelPalette::with_size(rgb(), vec![5, 6, 7], 3).unwrap();
        palette.get_color(&[1, 2, 3]).unwrap();
        palette.get_color(&[4, 5, 6]).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.index_colors(), palette.colors);
    }

    #[test]
    fn test_allocation_grows_sized_palette() {
        let mut palette = ChannelPalette::with_size(rgb(), vec![1, 2, 3], 3).unwrap();
        assert_eq!(palette.get_color(&[4, 5, 6]).unwrap(), 1);
        assert_eq!(palette.as_bytes(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(palette.entry(0), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_duplicates_keep_lowest_index() {
        let mut buffer = vec![0u8; 768];
        buffer[1] = 200;
        buffer[2] = 200;
        let mut palette = ChannelPalette::with_buffer(rgb(), buffer).unwrap();
        assert_eq!(palette.get_color(&[200, 0, 0]).unwrap(), 1);
        assert_eq!(palette.color_count(), 2);
        // Index 2 duplicates index 1 and is reused first
        assert_eq!(palette.get_color(&[7, 7, 7]).unwrap(), 2);
        assert_eq!(palette.index_colors(), palette.colors);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = black(rgb());
        let mut copy = original.clone();
        copy.get_color(&[10, 20, 30]).unwrap();
        assert_eq!(original.color_count(), 1);
        assert_eq!(copy.color_count(), 2);
        assert_ne!(original.as_bytes(), copy.as_bytes());
    }

    #[test]
    fn test_set_buffer_rebuilds_index() {
        let mut palette = ChannelPalette::new(rgb());
        palette.set_buffer(vec![0; 768]).unwrap();
        assert_eq!(palette.color_count(), 1);
        assert!(palette.set_buffer(vec![0; 5]).is_err());
    }

    #[test]
    fn test_get_data_tag() {
        let palette = ChannelPalette::new(Mode::new("RGBA").unwrap());
        let (tag, bytes) = palette.get_data();
        assert_eq!(tag, "RGBA;L");
        assert_eq!(bytes.len(), 1024);
    }
}
