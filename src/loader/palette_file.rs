//! Generic indexed palette text reader.
//!
//! One entry per line, either `index r g b` or `index value` (grey).
//! Lines starting with `#` are comments, so the text dump written by
//! `ImagePalette::save` for RGB and L palettes loads back unchanged.

use std::io::BufRead;

use super::{grey_ramp, next_line, parse_channel, LoadedPalette, PaletteLoader, MAX_LINE_LENGTH};
use crate::error::{PaletteError, Result};

pub struct PaletteFile;

impl PaletteLoader for PaletteFile {
    const NAME: &'static str = "palette file";

    fn read_palette<R: BufRead>(mut reader: R) -> Result<LoadedPalette> {
        let mut buf = Vec::new();
        let mut data = grey_ramp();

        while let Some(line) = next_line(&mut reader, &mut buf)? {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if buf.len() > MAX_LINE_LENGTH {
                return Err(PaletteError::Syntax("bad palette file".to_string()));
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let index = tokens[0]
                .parse::<i64>()
                .map_err(|_| PaletteError::Value(format!("bad palette index {:?}", tokens[0])))?;
            let rgb = match tokens[1..] {
                [r, g, b] => [parse_channel(r)?, parse_channel(g)?, parse_channel(b)?],
                [v] => [parse_channel(v)?; 3],
                _ => return Err(PaletteError::Value(format!("bad palette entry {line:?}"))),
            };

            if let Ok(index @ 0..=255) = usize::try_from(index) {
                data[index * 3..index * 3 + 3].copy_from_slice(&rgb);
            }
        }

        Ok(LoadedPalette {
            data,
            rawmode: Some("RGB".to_string()),
        })
    }
}
