//! GIMP palette (`.gpl`) reader.
//!
//! ```text
//! GIMP Palette
//! Name: Example
//! Columns: 4
//! #
//! 255   0   0	Red
//!   0 255   0	Green
//! ```

use std::io::BufRead;

use super::{grey_ramp, next_line, parse_channel, LoadedPalette, PaletteLoader, MAX_LINE_LENGTH};
use crate::error::{PaletteError, Result};

pub struct GimpPaletteFile;

/// `Name:`, `Columns:` and similar header keywords.
fn is_keyword(line: &str) -> bool {
    let word_len = line
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    word_len > 0 && line[word_len..].starts_with(':')
}

impl PaletteLoader for GimpPaletteFile {
    const NAME: &'static str = "GIMP palette";

    fn read_palette<R: BufRead>(mut reader: R) -> Result<LoadedPalette> {
        let mut buf = Vec::new();

        let header = next_line(&mut reader, &mut buf)?.unwrap_or_default();
        if !header.starts_with("GIMP Palette") {
            return Err(PaletteError::Syntax("not a GIMP palette file".to_string()));
        }

        // Entries without a color line keep their grey default
        let mut data = grey_ramp();
        let mut index = 0;
        while index < 256 {
            let Some(line) = next_line(&mut reader, &mut buf)? else {
                break;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || is_keyword(trimmed) {
                continue;
            }
            if buf.len() > MAX_LINE_LENGTH {
                return Err(PaletteError::Syntax("bad palette file".to_string()));
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().take(3).collect();
            if tokens.len() != 3 {
                return Err(PaletteError::Value(format!("bad palette entry {trimmed:?}")));
            }
            for (channel, token) in tokens.iter().enumerate() {
                data[index * 3 + channel] = parse_channel(token)?;
            }
            index += 1;
        }

        Ok(LoadedPalette {
            data,
            rawmode: Some("RGB".to_string()),
        })
    }
}
