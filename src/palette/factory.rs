//! Preset palettes built from ramps and lookup tables.

use rand::Rng;

use super::{linear_lut, ChannelPalette, ImagePalette, Mode};
use crate::color::getrgb;
use crate::error::Result;

/// White point used by [`sepia`] when none is given.
pub const DEFAULT_SEPIA_WHITE: &str = "#fff0c0";

/// Repeat one 256-entry channel plane for every channel of `mode`.
fn repeat_plane(mode: Mode, plane: impl Iterator<Item = u8> + Clone) -> Result<ImagePalette> {
    let buffer = (0..mode.channels())
        .flat_map(|_| plane.clone())
        .collect::<Vec<u8>>();
    Ok(ChannelPalette::with_buffer(mode, buffer)?.into())
}

/// Identity ramp 0..=255 in every channel.
pub fn wedge(mode: &str) -> Result<ImagePalette> {
    repeat_plane(Mode::new(mode)?, 0..=u8::MAX)
}

/// Inverted ramp 255..=0 in every channel.
pub fn negative(mode: &str) -> Result<ImagePalette> {
    repeat_plane(Mode::new(mode)?, (0..=u8::MAX).rev())
}

/// Uniformly random channel values drawn from `rng`.
pub fn random_with<R: Rng>(mode: &str, rng: &mut R) -> Result<ImagePalette> {
    let mode = Mode::new(mode)?;
    let mut buffer = vec![0u8; 256 * mode.channels()];
    rng.fill(&mut buffer[..]);
    Ok(ChannelPalette::with_buffer(mode, buffer)?.into())
}

/// Uniformly random channel values from the thread RNG.
#[cfg(not(target_arch = "wasm32"))]
pub fn random(mode: &str) -> Result<ImagePalette> {
    random_with(mode, &mut rand::rng())
}

/// RGB palette ramping linearly from black to `white`, resolved through
/// [`getrgb`] (hex, `rgb()`, `hsl()`, `hsv()` or a color name).
pub fn sepia(white: &str) -> Result<ImagePalette> {
    let (r, g, b) = getrgb(white)?;

    let mut buffer = Vec::with_capacity(768);
    for level in [r, g, b] {
        buffer.extend_from_slice(&linear_lut(0, level)?);
    }
    Ok(ChannelPalette::with_buffer(Mode::rgb(), buffer)?.into())
}

/// Wrap foreign-encoded palette bytes without size validation.
pub fn raw(rawmode: &str, data: Vec<u8>) -> ImagePalette {
    ImagePalette::raw(rawmode, data)
}
