//! Color specifier parsing.
//!
//! Accepted forms (case-insensitive, surrounding whitespace ignored):
//! * `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! * `rgb(r, g, b)` and `rgba(r, g, b, a)` with 0-255 integers
//! * `rgb(r%, g%, b%)`
//! * `hsl(h, s%, l%)`, `hsv(h, s%, v%)` (also spelled `hsb`)
//! * CSS color names
//!
//! Alpha is parsed but dropped; palettes built from these are RGB.

use super::named_color;
use crate::error::{PaletteError, Result};
use crate::utils::round_half_up;

pub type Rgb = (u8, u8, u8);

fn unknown(spec: &str) -> PaletteError {
    PaletteError::UnknownColor(spec.to_string())
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let nibble = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    let byte = |hi: u8, lo: u8| -> Option<u8> { Some(nibble(hi)? << 4 | nibble(lo)?) };

    let b = hex.as_bytes();
    match b.len() {
        // #rgb, #rgba
        3 | 4 => Some((nibble(b[0])? * 17, nibble(b[1])? * 17, nibble(b[2])? * 17))
            .filter(|_| b.len() == 3 || nibble(b[3]).is_some()),
        // #rrggbb, #rrggbbaa
        6 | 8 => Some((byte(b[0], b[1])?, byte(b[2], b[3])?, byte(b[4], b[5])?))
            .filter(|_| b.len() == 6 || byte(b[6], b[7]).is_some()),
        _ => None,
    }
}

/// Split `name(a, b, c)` arguments when `spec` starts with one of `names`.
fn function_args<'a>(spec: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    let open = spec.find('(')?;
    if !names.contains(&spec[..open].trim_end()) {
        return None;
    }
    let inner = spec[open + 1..].strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn parse_byte(arg: &str) -> Option<u8> {
    arg.parse::<u8>().ok()
}

fn parse_number(arg: &str) -> Option<f64> {
    let value = arg.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn parse_percent(arg: &str) -> Option<f64> {
    parse_number(arg.strip_suffix('%')?.trim_end())
        .filter(|&v| v <= 100.0)
        .map(|v| v / 100.0)
}

fn parse_rgb(args: &[&str]) -> Option<Rgb> {
    if !(args.len() == 3 || args.len() == 4) {
        return None;
    }
    if args[..3].iter().all(|a| a.ends_with('%')) {
        let channel = |a: &str| parse_percent(a).map(|v| round_half_up(v * 255.0));
        return Some((channel(args[0])?, channel(args[1])?, channel(args[2])?));
    }
    Some((parse_byte(args[0])?, parse_byte(args[1])?, parse_byte(args[2])?))
}

/// Hue in degrees plus two percentages.
fn parse_hue_args(args: &[&str]) -> Option<(f64, f64, f64)> {
    if args.len() != 3 {
        return None;
    }
    let hue = parse_number(args[0])? / 360.0;
    Some((hue, parse_percent(args[1])?, parse_percent(args[2])?))
}

fn to_rgb((r, g, b): (f64, f64, f64)) -> Rgb {
    (
        round_half_up(r * 255.0),
        round_half_up(g * 255.0),
        round_half_up(b * 255.0),
    )
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    let channel = |hue: f64| {
        let hue = hue.rem_euclid(1.0);
        if hue < 1.0 / 6.0 {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
        } else {
            m1
        }
    };
    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Resolve a color specifier to an RGB triple.
pub fn getrgb(spec: &str) -> Result<Rgb> {
    let lower = spec.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return Err(unknown(spec));
    }

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| unknown(spec));
    }
    if let Some(args) = function_args(&lower, &["rgb", "rgba"]) {
        return parse_rgb(&args).ok_or_else(|| unknown(spec));
    }
    if let Some(args) = function_args(&lower, &["hsl"]) {
        let (h, s, l) = parse_hue_args(&args).ok_or_else(|| unknown(spec))?;
        return Ok(to_rgb(hls_to_rgb(h, l, s)));
    }
    if let Some(args) = function_args(&lower, &["hsv", "hsb"]) {
        let (h, s, v) = parse_hue_args(&args).ok_or_else(|| unknown(spec))?;
        return Ok(to_rgb(hsv_to_rgb(h, s, v)));
    }

    named_color(&lower)
        .map(|[r, g, b]| (r, g, b))
        .ok_or_else(|| unknown(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(getrgb("#fff0c0").unwrap(), (255, 240, 192));
        assert_eq!(getrgb("#F0C").unwrap(), (255, 0, 204));
        assert_eq!(getrgb("#f0c8").unwrap(), (255, 0, 204));
        assert_eq!(getrgb("#11223344").unwrap(), (0x11, 0x22, 0x33));
        assert!(getrgb("#12345").is_err());
        assert!(getrgb("#gggggg").is_err());
        assert!(getrgb("#1234567z").is_err());
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(getrgb("rgb(1, 2, 3)").unwrap(), (1, 2, 3));
        assert_eq!(getrgb(" RGBA(10,20,30,0.5) ").unwrap(), (10, 20, 30));
        assert_eq!(getrgb("rgb(100%, 50%, 0%)").unwrap(), (255, 128, 0));
        assert!(getrgb("rgb(256, 0, 0)").is_err());
        assert!(getrgb("rgb(1, 2)").is_err());
    }

    #[test]
    fn test_hsl_and_hsv() {
        assert_eq!(getrgb("hsl(0, 100%, 50%)").unwrap(), (255, 0, 0));
        assert_eq!(getrgb("hsl(120, 100%, 25%)").unwrap(), (0, 128, 0));
        assert_eq!(getrgb("hsl(0, 0%, 100%)").unwrap(), (255, 255, 255));
        assert_eq!(getrgb("hsv(240, 100%, 100%)").unwrap(), (0, 0, 255));
        assert_eq!(getrgb("hsb(60, 100%, 100%)").unwrap(), (255, 255, 0));
        assert!(getrgb("hsl(0, 150%, 50%)").is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(getrgb("White").unwrap(), (255, 255, 255));
        assert_eq!(getrgb("darkslategray").unwrap(), (0x2f, 0x4f, 0x4f));
        assert!(matches!(getrgb("blurple"), Err(PaletteError::UnknownColor(_))));
        assert!(getrgb("").is_err());
    }
}
