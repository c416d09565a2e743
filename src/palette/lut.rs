//! Channel lookup tables mapping input intensity to output intensity.

use crate::error::{PaletteError, Result};
use crate::utils::round_half_up;

pub type Lut = [u8; 256];

/// Linear ramp from `black` to `white`: entry `i` is `white * i / 255`.
///
/// Only a zero black point is supported.
pub fn linear_lut(black: u8, white: u8) -> Result<Lut> {
    if black != 0 {
        return Err(PaletteError::NotImplemented("linear LUT with nonzero black point"));
    }

    let mut lut = [0u8; 256];
    for (i, item) in lut.iter_mut().enumerate() {
        *item = (white as usize * i / 255) as u8;
    }
    Ok(lut)
}

/// Gamma curve: entry `i` is `(i / 255) ^ exponent * 255`, rounded half up.
pub fn gamma_lut(exponent: f64) -> Lut {
    let mut lut = [0u8; 256];
    for (i, item) in lut.iter_mut().enumerate() {
        *item = round_half_up((i as f64 / 255.0).powf(exponent) * 255.0);
    }
    lut
}
