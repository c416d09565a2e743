//! Plain-text palette dump.
//!
//! ```text
//! # Palette
//! # Mode: RGB
//! 0 0 0 0
//! 1 1 1 1
//! ...
//! 255 255 255 255
//! ```
//!
//! Always 256 entry lines; channels missing from the buffer are written as 0.

use std::io::Write;

use super::{ChannelPalette, PALETTE_ENTRIES};

pub fn write_dump<W: Write>(palette: &ChannelPalette, mut out: W) -> std::io::Result<()> {
    writeln!(out, "# Palette")?;
    writeln!(out, "# Mode: {}", palette.mode())?;

    let channels = palette.mode().channels();
    for index in 0..PALETTE_ENTRIES {
        write!(out, "{index}")?;
        for channel in 0..channels {
            write!(out, " {}", palette.channel_value(channel, index).unwrap_or(0))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Mode;

    #[test]
    fn test_dump_short_palette_pads_with_zero() {
        let palette = ChannelPalette::with_size(Mode::new("LA").unwrap(), vec![9, 8], 2).unwrap();
        let mut out = Vec::new();
        write_dump(&palette, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 258);
        assert_eq!(lines[1], "# Mode: LA");
        assert_eq!(lines[2], "0 9 8");
        assert_eq!(lines[3], "1 0 0");
    }
}
