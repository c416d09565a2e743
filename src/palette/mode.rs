//! Palette channel layout names.

use std::fmt;
use std::str::FromStr;

use crate::error::{PaletteError, Result};

/// Most channels a palette mode may carry (e.g. "RGBA", "CMYK").
pub const MAX_CHANNELS: usize = 4;

/// Channel layout of a palette, named one letter per channel ("RGB", "L").
///
/// The number of channels is the length of the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mode(String);

impl Mode {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() || name.len() > MAX_CHANNELS || !name.is_ascii() {
            return Err(PaletteError::InvalidMode(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn rgb() -> Self {
        Self("RGB".to_string())
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::rgb()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
