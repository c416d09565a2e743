//! Palettes holding bytes in a foreign encoding, named by a raw mode tag.
//!
//! Raw palettes are exempt from the size rules of structured palettes and
//! support no channel-level operations until decoded.
//!
//! Decodable tags:
//! - `<mode>`: interleaved records (`RGB`, `RGBA`, `L`, ...)
//! - `<mode>;L`: channel-planar
//! - `RGBX`: four-byte records, padding dropped
//! - `BGR;15`, `BGR;16`: little-endian 16-bit words, red in the low bits
//! - `BGR;24`: three-byte records stored blue first

use super::{ChannelPalette, Mode};
use crate::error::{PaletteError, Result};
use crate::utils::{interleaved_to_planar, scale_to_u8, LittleEndianReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPalette {
    mode: Mode,
    rawmode: String,
    data: Vec<u8>,
    dirty: bool,
}

impl RawPalette {
    /// Wrap `data` encoded as `rawmode`. New raw palettes start dirty.
    pub fn new(rawmode: &str, data: Vec<u8>) -> Self {
        Self {
            mode: Mode::rgb(),
            rawmode: rawmode.to_string(),
            data,
            dirty: true,
        }
    }

    #[inline]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[inline]
    pub fn rawmode(&self) -> &str {
        &self.rawmode
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Decode into a structured palette.
    pub fn decode(&self) -> Result<ChannelPalette> {
        let (mode, planar) = match self.rawmode.as_str() {
            "RGBX" => (Mode::rgb(), self.records(4, |r| [r[0], r[1], r[2]])?),
            "BGR;24" => (Mode::rgb(), self.records(3, |r| [r[2], r[1], r[0]])?),
            "BGR;15" => (Mode::rgb(), self.packed(|v| [(v, 5), (v >> 5, 5), (v >> 10, 5)])?),
            "BGR;16" => (Mode::rgb(), self.packed(|v| [(v, 5), (v >> 5, 6), (v >> 11, 5)])?),
            tag => match tag.strip_suffix(";L") {
                Some(name) => (self.plain_mode(name)?, self.data.clone()),
                None => {
                    let mode = self.plain_mode(tag)?;
                    let planar = interleaved_to_planar(&self.data, mode.channels());
                    (mode, planar)
                }
            },
        };

        let size = planar.len();
        let mut palette = ChannelPalette::with_size(mode, planar, size)?;
        if !self.dirty {
            palette.mark_clean();
        }
        Ok(palette)
    }

    fn plain_mode(&self, name: &str) -> Result<Mode> {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(PaletteError::UnsupportedRawMode(self.rawmode.clone()));
        }
        let mode = Mode::new(name).map_err(|_| PaletteError::UnsupportedRawMode(self.rawmode.clone()))?;
        if self.data.len() % mode.channels() != 0 {
            return Err(PaletteError::WrongSize {
                expected: self.data.len() - self.data.len() % mode.channels(),
                actual: self.data.len(),
            });
        }
        Ok(mode)
    }

    /// Decode fixed-width byte records to planar RGB.
    fn records(&self, width: usize, to_rgb: impl Fn(&[u8]) -> [u8; 3]) -> Result<Vec<u8>> {
        if self.data.len() % width != 0 {
            return Err(PaletteError::WrongSize {
                expected: self.data.len() - self.data.len() % width,
                actual: self.data.len(),
            });
        }
        let rgb: Vec<u8> = self.data.chunks_exact(width).flat_map(to_rgb).collect();
        Ok(interleaved_to_planar(&rgb, 3))
    }

    /// Decode little-endian 16-bit words to planar RGB. `fields` returns
    /// each channel's shifted value and bit width.
    fn packed(&self, fields: impl Fn(u16) -> [(u16, u32); 3]) -> Result<Vec<u8>> {
        if self.data.len() % 2 != 0 {
            return Err(PaletteError::WrongSize {
                expected: self.data.len() - 1,
                actual: self.data.len(),
            });
        }

        let mut reader = LittleEndianReader::new(&self.data);
        let mut rgb = Vec::with_capacity(self.data.len() / 2 * 3);
        while let Some(word) = reader.read_u16() {
            for (value, bits) in fields(word) {
                rgb.push(scale_to_u8(value & ((1 << bits) - 1), bits));
            }
        }
        Ok(interleaved_to_planar(&rgb, 3))
    }
}
