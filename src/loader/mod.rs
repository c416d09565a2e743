//! Palette file loaders.
//!
//! Each format implements [`PaletteLoader`]; [`load`] tries them in a fixed
//! order and returns the first non-empty result.

mod gimp_gradient;
mod gimp_palette;
mod palette_file;

pub use gimp_gradient::*;
pub use gimp_palette::*;
pub use palette_file::*;

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{PaletteError, Result};

/// Lines longer than this (in bytes, terminator included) are a syntax error.
pub const MAX_LINE_LENGTH: usize = 100;

/// Palette bytes as produced by a loader, plus the raw mode describing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPalette {
    pub data: Vec<u8>,
    pub rawmode: Option<String>,
}

/// A palette text format.
pub trait PaletteLoader {
    /// Short format name used in diagnostics.
    const NAME: &'static str;

    /// Parse a whole palette from `reader`, positioned at the start of the file.
    ///
    /// Fails with [`PaletteError::Syntax`] or [`PaletteError::Value`] when the
    /// contents are not in this format.
    fn read_palette<R: BufRead>(reader: R) -> Result<LoadedPalette>;
}

/// Registered formats, in the order [`load`] tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    GimpPalette,
    GimpGradient,
    PaletteFile,
}

impl PaletteFormat {
    pub const LOAD_ORDER: [PaletteFormat; 3] = [
        PaletteFormat::GimpPalette,
        PaletteFormat::GimpGradient,
        PaletteFormat::PaletteFile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteFormat::GimpPalette => GimpPaletteFile::NAME,
            PaletteFormat::GimpGradient => GimpGradientFile::NAME,
            PaletteFormat::PaletteFile => PaletteFile::NAME,
        }
    }

    pub fn read_palette<R: BufRead>(self, reader: R) -> Result<LoadedPalette> {
        match self {
            PaletteFormat::GimpPalette => GimpPaletteFile::read_palette(reader),
            PaletteFormat::GimpGradient => GimpGradientFile::read_palette(reader),
            PaletteFormat::PaletteFile => PaletteFile::read_palette(reader),
        }
    }
}

/// Load a palette file, trying every registered format.
pub fn load(path: impl AsRef<Path>) -> Result<LoadedPalette> {
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Load a palette from a seekable stream, trying every registered format
/// from the start of the stream.
///
/// Syntax and value errors move on to the next format; I/O errors abort.
pub fn load_from_reader<R: Read + Seek>(mut reader: R) -> Result<LoadedPalette> {
    let mut attempts = Vec::new();

    for format in PaletteFormat::LOAD_ORDER {
        reader.seek(SeekFrom::Start(0))?;
        match format.read_palette(BufReader::new(&mut reader)) {
            Ok(loaded) if !loaded.data.is_empty() => return Ok(loaded),
            Ok(_) => attempts.push(format!("{}: empty palette", format.name())),
            Err(err) if err.is_parse_failure() => {
                attempts.push(format!("{}: {}", format.name(), err))
            }
            Err(err) => return Err(err),
        }
    }

    Err(PaletteError::CannotLoad { attempts })
}

/// Read one line without its terminator. `None` at end of input.
///
/// Lines over [`MAX_LINE_LENGTH`] are returned too; callers decide when
/// to reject them. Non-UTF-8 content is a syntax error.
pub(crate) fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = std::str::from_utf8(buf)
        .map_err(|_| PaletteError::Syntax("palette file is not text".to_string()))?;
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Parse a channel value in 0..=255.
pub(crate) fn parse_channel(token: &str) -> Result<u8> {
    token
        .parse::<u8>()
        .map_err(|_| PaletteError::Value(format!("bad channel value {token:?}")))
}

/// 256 grey entries (i, i, i), interleaved.
pub(crate) fn grey_ramp() -> Vec<u8> {
    (0..=u8::MAX).flat_map(|i| [i, i, i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{wedge, ImagePalette};
    use std::io::Cursor;

    #[test]
    fn test_load_order_picks_gimp_palette() {
        let text = "GIMP Palette\nName: test\n255 0 0 red\n";
        let loaded = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(loaded.rawmode.as_deref(), Some("RGB"));
        assert_eq!(&loaded.data[..6], &[255, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_falls_through_to_gradient() {
        let text = "GIMP Gradient\nName: ramp\n1\n0 0.5 1 0 0 0 1 1 1 1 1 0 0\n";
        let loaded = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(loaded.rawmode.as_deref(), Some("RGBA"));
        assert_eq!(loaded.data.len(), 1024);
    }

    #[test]
    fn test_falls_through_to_palette_file() {
        let text = "# comment\n0 10 20 30\n1 40\n";
        let loaded = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(&loaded.data[..6], &[10, 20, 30, 40, 40, 40]);
    }

    #[test]
    fn test_cannot_load() {
        let err = load_from_reader(Cursor::new("hello world\n")).unwrap_err();
        match err {
            PaletteError::CannotLoad { attempts } => assert_eq!(attempts.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_binary_input_cannot_load() {
        let bytes = vec![0xff, 0xfe, 0x00, 0x80];
        assert!(matches!(
            load_from_reader(Cursor::new(bytes)),
            Err(PaletteError::CannotLoad { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load("/nonexistent/palette.gpl"),
            Err(PaletteError::Io(_))
        ));
    }

    #[test]
    fn test_saved_dump_loads_back() {
        let original = wedge("RGB").unwrap();
        let text = original.dump().unwrap();

        let loaded = load_from_reader(Cursor::new(text)).unwrap();
        let restored = ImagePalette::from_loaded(loaded).unwrap();
        assert_eq!(restored.to_bytes().unwrap(), original.to_bytes().unwrap());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("libpalette-{}.gpl", std::process::id()));
        std::fs::write(&path, "GIMP Palette\n#\n0 0 255\n").unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(&loaded.data[..3], &[0, 0, 255]);
    }
}
