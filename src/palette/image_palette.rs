//! Color palette for palette-mapped images.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{identity_ramp, write_dump, ChannelPalette, Mode, RawPalette};
use crate::error::{PaletteError, Result};
use crate::loader::LoadedPalette;

/// A palette is either structured (channel buffer plus color index) or raw
/// (opaque bytes tagged with their encoding).
///
/// Channel-level operations on a raw palette fail with
/// [`PaletteError::RawData`]; match on the variant to work with the
/// structured palette directly.
#[derive(Debug, Clone)]
pub enum ImagePalette {
    Channels(ChannelPalette),
    Raw(RawPalette),
}

impl Default for ImagePalette {
    fn default() -> Self {
        Self::Channels(ChannelPalette::new(Mode::rgb()))
    }
}

impl ImagePalette {
    /// Construct a structured palette.
    ///
    /// Without a buffer the palette holds the identity ramp in every channel.
    /// A `size` of zero requires `256 * channels` bytes and a nonzero `size`
    /// must equal the buffer length, the default ramp included.
    pub fn new(mode: &str, buffer: Option<Vec<u8>>, size: usize) -> Result<Self> {
        let mode = Mode::new(mode)?;
        let buffer = buffer.unwrap_or_else(|| identity_ramp(mode.channels()));
        let palette = ChannelPalette::with_size(mode, buffer, size)?;
        Ok(Self::Channels(palette))
    }

    /// Wrap raw palette data. The result is marked dirty.
    pub fn raw(rawmode: &str, data: Vec<u8>) -> Self {
        Self::Raw(RawPalette::new(rawmode, data))
    }

    /// Build a structured palette from a loader result.
    pub fn from_loaded(loaded: LoadedPalette) -> Result<Self> {
        let rawmode = loaded.rawmode.as_deref().unwrap_or("RGB");
        RawPalette::new(rawmode, loaded.data)
            .decode()
            .map(Self::Channels)
    }

    pub fn mode(&self) -> &Mode {
        match self {
            Self::Channels(palette) => palette.mode(),
            Self::Raw(raw) => raw.mode(),
        }
    }

    pub fn rawmode(&self) -> Option<&str> {
        match self {
            Self::Channels(_) => None,
            Self::Raw(raw) => Some(raw.rawmode()),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Self::Channels(palette) => palette.is_dirty(),
            Self::Raw(raw) => raw.is_dirty(),
        }
    }

    pub fn mark_clean(&mut self) {
        match self {
            Self::Channels(palette) => palette.mark_clean(),
            Self::Raw(raw) => raw.mark_clean(),
        }
    }

    /// The structured palette, or [`PaletteError::RawData`].
    pub fn channels(&self) -> Result<&ChannelPalette> {
        match self {
            Self::Channels(palette) => Ok(palette),
            Self::Raw(_) => Err(PaletteError::RawData),
        }
    }

    pub fn channels_mut(&mut self) -> Result<&mut ChannelPalette> {
        match self {
            Self::Channels(palette) => Ok(palette),
            Self::Raw(_) => Err(PaletteError::RawData),
        }
    }

    /// Independent copy; mutating either palette never affects the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Palette contents for the low-level image code: the raw tag and bytes
    /// unchanged, or `<mode>;L` with the channel-planar buffer.
    pub fn get_data(&self) -> (String, Vec<u8>) {
        match self {
            Self::Channels(palette) => palette.get_data(),
            Self::Raw(raw) => (raw.rawmode().to_string(), raw.data().to_vec()),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.channels().map(ChannelPalette::to_bytes)
    }

    /// Index of `color`, allocating a palette entry for it if needed.
    ///
    /// New colors take the lowest entry no indexed color refers to, which is
    /// the color count unless the buffer held duplicate colors.
    pub fn get_color(&mut self, color: &[u8]) -> Result<u8> {
        self.channels_mut()?.get_color(color)
    }

    /// Write the text dump to `out`.
    pub fn save<W: Write>(&self, out: W) -> Result<()> {
        let palette = self.channels()?;
        write_dump(palette, out)?;
        Ok(())
    }

    /// Write the text dump to a file, creating or truncating it.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let palette = self.channels()?;
        let file = File::create(path)?;
        write_dump(palette, BufWriter::new(file))?;
        Ok(())
    }

    /// The text dump as a string.
    pub fn dump(&self) -> Result<String> {
        let mut out = Vec::new();
        self.save(&mut out)?;
        String::from_utf8(out).map_err(|e| PaletteError::Value(e.to_string()))
    }
}

impl From<ChannelPalette> for ImagePalette {
    fn from(palette: ChannelPalette) -> Self {
        Self::Channels(palette)
    }
}

impl From<RawPalette> for ImagePalette {
    fn from(raw: RawPalette) -> Self {
        Self::Raw(raw)
    }
}
