//! GIMP gradient (`.ggr`) reader.
//!
//! A gradient is a list of segments covering 0..1, each blending between two
//! RGBA colors with one of five curves. Loading samples the gradient into
//! 256 RGBA palette entries.

use std::f64::consts::PI;
use std::io::BufRead;

use super::{next_line, LoadedPalette, PaletteLoader};
use crate::error::{PaletteError, Result};
use crate::utils::round_half_up;

const EPSILON: f64 = 1e-10;

/// Number of palette entries sampled from a gradient.
pub const GRADIENT_ENTRIES: usize = 256;

/// Blend curve of a gradient segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendType {
    Linear,
    Curved,
    Sine,
    SphereIncreasing,
    SphereDecreasing,
}

impl BlendType {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Linear),
            1 => Some(Self::Curved),
            2 => Some(Self::Sine),
            3 => Some(Self::SphereIncreasing),
            4 => Some(Self::SphereDecreasing),
            _ => None,
        }
    }

    /// Blend factor at `pos` (0..1 within the segment) for a segment whose
    /// midpoint sits at `middle`.
    pub fn factor(self, middle: f64, pos: f64) -> f64 {
        match self {
            Self::Linear => linear(middle, pos),
            Self::Curved => pos.powf(0.5f64.ln() / middle.max(EPSILON).ln()),
            Self::Sine => ((-PI / 2.0 + PI * linear(middle, pos)).sin() + 1.0) / 2.0,
            Self::SphereIncreasing => (1.0 - (linear(middle, pos) - 1.0).powi(2)).sqrt(),
            Self::SphereDecreasing => 1.0 - (1.0 - linear(middle, pos).powi(2)).sqrt(),
        }
    }
}

fn linear(middle: f64, pos: f64) -> f64 {
    if pos <= middle {
        if middle < EPSILON {
            0.0
        } else {
            0.5 * pos / middle
        }
    } else {
        let pos = pos - middle;
        let middle = 1.0 - middle;
        if middle < EPSILON {
            1.0
        } else {
            0.5 + 0.5 * pos / middle
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientSegment {
    pub left: f64,
    pub middle: f64,
    pub right: f64,
    pub left_color: [f64; 4],
    pub right_color: [f64; 4],
    pub blend: BlendType,
}

impl GradientSegment {
    fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 13 {
            return Err(PaletteError::Syntax(format!("bad gradient segment {line:?}")));
        }

        let mut w = [0f64; 11];
        for (value, token) in w.iter_mut().zip(&tokens) {
            *value = token
                .parse()
                .map_err(|_| PaletteError::Value(format!("bad gradient value {token:?}")))?;
        }
        let code = |token: &str| {
            token
                .parse::<i64>()
                .map_err(|_| PaletteError::Value(format!("bad gradient code {token:?}")))
        };

        let blend_code = code(tokens[11])?;
        let blend = BlendType::from_code(blend_code)
            .ok_or_else(|| PaletteError::Value(format!("unknown blend type {blend_code}")))?;
        if code(tokens[12])? != 0 {
            return Err(PaletteError::Value("cannot handle HSV colour space".to_string()));
        }

        Ok(Self {
            left: w[0],
            middle: w[1],
            right: w[2],
            left_color: [w[3], w[4], w[5], w[6]],
            right_color: [w[7], w[8], w[9], w[10]],
            blend,
        })
    }

    fn color_at(&self, x: f64) -> [u8; 4] {
        let width = self.right - self.left;
        let scale = if width < EPSILON {
            self.blend.factor(0.5, 0.5)
        } else {
            self.blend
                .factor((self.middle - self.left) / width, (x - self.left) / width)
        };

        let mut rgba = [0u8; 4];
        for (channel, out) in rgba.iter_mut().enumerate() {
            let (from, to) = (self.left_color[channel], self.right_color[channel]);
            *out = round_half_up(255.0 * ((to - from) * scale + from));
        }
        rgba
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub segments: Vec<GradientSegment>,
}

impl Gradient {
    /// Sample `entries` evenly spaced colors as interleaved RGBA bytes.
    pub fn sample(&self, entries: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(entries * 4);
        let Some(last) = self.segments.len().checked_sub(1) else {
            return data;
        };
        let denominator = entries.saturating_sub(1).max(1) as f64;

        let mut ix = 0;
        for i in 0..entries {
            let x = i as f64 / denominator;
            while ix < last && self.segments[ix].right < x {
                ix += 1;
            }
            data.extend_from_slice(&self.segments[ix].color_at(x));
        }
        data
    }
}

pub struct GimpGradientFile;

impl GimpGradientFile {
    pub fn read_gradient<R: BufRead>(mut reader: R) -> Result<Gradient> {
        let mut buf = Vec::new();

        let header = next_line(&mut reader, &mut buf)?.unwrap_or_default();
        if !header.starts_with("GIMP Gradient") {
            return Err(PaletteError::Syntax("not a GIMP gradient file".to_string()));
        }

        let truncated = || PaletteError::Syntax("truncated gradient file".to_string());

        // Older files have no name line
        let mut line = next_line(&mut reader, &mut buf)?.ok_or_else(truncated)?;
        if line.starts_with("Name: ") {
            line = next_line(&mut reader, &mut buf)?.ok_or_else(truncated)?;
        }
        let count = line
            .trim()
            .parse::<usize>()
            .map_err(|_| PaletteError::Value(format!("bad segment count {:?}", line.trim())))?;
        if count == 0 {
            return Err(PaletteError::Value("gradient has no segments".to_string()));
        }

        let mut segments = Vec::new();
        for _ in 0..count {
            let line = next_line(&mut reader, &mut buf)?.ok_or_else(truncated)?;
            segments.push(GradientSegment::parse(&line)?);
        }
        Ok(Gradient { segments })
    }
}

impl PaletteLoader for GimpGradientFile {
    const NAME: &'static str = "GIMP gradient";

    fn read_palette<R: BufRead>(reader: R) -> Result<LoadedPalette> {
        let gradient = Self::read_gradient(reader)?;
        Ok(LoadedPalette {
            data: gradient.sample(GRADIENT_ENTRIES),
            rawmode: Some("RGBA".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BLACK_TO_WHITE: &str = "GIMP Gradient\nName: ramp\n1\n0.000000 0.500000 1.000000 0.000000 0.000000 0.000000 1.000000 1.000000 1.000000 1.000000 1.000000 0 0\n";

    #[test]
    fn test_linear_ramp() {
        let loaded = GimpGradientFile::read_palette(Cursor::new(BLACK_TO_WHITE)).unwrap();
        assert_eq!(loaded.data.len(), 1024);
        assert_eq!(&loaded.data[..4], &[0, 0, 0, 255]);
        assert_eq!(&loaded.data[1020..], &[255, 255, 255, 255]);
        // Linear blend with a centered midpoint is the identity
        assert_eq!(&loaded.data[128 * 4..128 * 4 + 4], &[128, 128, 128, 255]);
    }

    #[test]
    fn test_no_name_line_and_two_segments() {
        let text = "GIMP Gradient\n2\n\
            0 0.25 0.5 1 0 0 1 1 0 0 1 0 0\n\
            0.5 0.75 1 0 0 1 1 0 0 1 1 0 0\n";
        let gradient = GimpGradientFile::read_gradient(Cursor::new(text)).unwrap();
        assert_eq!(gradient.segments.len(), 2);

        let data = gradient.sample(256);
        assert_eq!(&data[..4], &[255, 0, 0, 255]);
        assert_eq!(&data[255 * 4..], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_blend_factors() {
        assert_eq!(BlendType::Linear.factor(0.5, 0.25), 0.25);
        assert_eq!(BlendType::Linear.factor(0.0, 0.0), 0.0);
        assert!((BlendType::Curved.factor(0.5, 0.25) - 0.25).abs() < 1e-12);
        assert!((BlendType::Sine.factor(0.5, 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(BlendType::SphereIncreasing.factor(0.5, 1.0), 1.0);
        assert_eq!(BlendType::SphereDecreasing.factor(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_rejects_bad_files() {
        let read = |text: &str| GimpGradientFile::read_palette(Cursor::new(text.to_string()));

        assert!(matches!(read("GIMP Palette\n"), Err(PaletteError::Syntax(_))));
        assert!(matches!(read("GIMP Gradient\nx\n"), Err(PaletteError::Value(_))));
        assert!(matches!(read("GIMP Gradient\n0\n"), Err(PaletteError::Value(_))));
        assert!(matches!(read("GIMP Gradient\n2\n0 0.5 1 0 0 0 1 1 1 1 1 0 0\n"), Err(PaletteError::Syntax(_))));
        assert!(matches!(read("GIMP Gradient\n1\n0 0.5 1 0 0 0 1 1 1 1 1 0 1\n"), Err(PaletteError::Value(_))));
        assert!(matches!(read("GIMP Gradient\n1\n0 0.5 1 0 0 0 1 1 1 1 1 9 0\n"), Err(PaletteError::Value(_))));
        assert!(matches!(read("GIMP Gradient\n1\n0 0.5 1\n"), Err(PaletteError::Syntax(_))));
    }
}
