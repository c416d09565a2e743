//! JavaScript bindings.
//!
//! Exposes palettes and the lookup-table generators to the browser. Errors
//! surface as JavaScript `Error`s carrying the Rust error message.

use std::io::Cursor;

use js_sys::{Array, JsString, Uint8Array};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::loader::load_from_reader;
use crate::palette::{self, gamma_lut, linear_lut, ImagePalette, DEFAULT_SEPIA_WHITE};

/// Image palette exposed to JavaScript.
#[wasm_bindgen]
pub struct Palette {
    inner: ImagePalette,
}

#[wasm_bindgen]
impl Palette {
    /// Create a palette. Without `buffer` it holds the identity ramp; with one,
    /// `buffer` must be channel-planar and `256 * mode.length` bytes long
    /// unless `size` is given.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: Option<String>, buffer: Option<Vec<u8>>, size: Option<usize>) -> Result<Palette, JsError> {
        let mode = mode.as_deref().unwrap_or("RGB");
        let inner = ImagePalette::new(mode, buffer, size.unwrap_or(0))?;
        Ok(Self { inner })
    }

    /// Parse a GIMP palette, GIMP gradient or indexed palette text file.
    #[wasm_bindgen(js_name = fromFile)]
    pub fn from_file(data: &[u8]) -> Result<Palette, JsError> {
        let loaded = load_from_reader(Cursor::new(data))?;
        Ok(Self {
            inner: ImagePalette::from_loaded(loaded)?,
        })
    }

    /// Wrap raw palette bytes tagged with `rawmode`.
    #[wasm_bindgen]
    pub fn raw(rawmode: &str, data: Vec<u8>) -> Palette {
        Self {
            inner: palette::raw(rawmode, data),
        }
    }

    #[wasm_bindgen]
    pub fn wedge(mode: Option<String>) -> Result<Palette, JsError> {
        let inner = palette::wedge(mode.as_deref().unwrap_or("RGB"))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen]
    pub fn negative(mode: Option<String>) -> Result<Palette, JsError> {
        let inner = palette::negative(mode.as_deref().unwrap_or("RGB"))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen]
    pub fn sepia(white: Option<String>) -> Result<Palette, JsError> {
        let inner = palette::sepia(white.as_deref().unwrap_or(DEFAULT_SEPIA_WHITE))?;
        Ok(Self { inner })
    }

    /// Random palette, reproducible for a given `seed`.
    #[wasm_bindgen]
    pub fn random(mode: Option<String>, seed: u32) -> Result<Palette, JsError> {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let inner = palette::random_with(mode.as_deref().unwrap_or("RGB"), &mut rng)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rawmode(&self) -> Option<String> {
        self.inner.rawmode().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    #[wasm_bindgen(js_name = markClean)]
    pub fn mark_clean(&mut self) {
        self.inner.mark_clean();
    }

    /// Index of `color` (one byte per channel), allocating an entry if needed.
    #[wasm_bindgen(js_name = getColor)]
    pub fn get_color(&mut self, color: &[u8]) -> Result<u8, JsError> {
        Ok(self.inner.get_color(color)?)
    }

    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Result<Uint8Array, JsError> {
        let bytes = self.inner.to_bytes()?;
        Ok(Uint8Array::from(&bytes[..]))
    }

    /// `[tag, bytes]` for handing the palette to image code.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Array {
        let (tag, bytes) = self.inner.get_data();
        let pair = Array::new_with_length(2);
        pair.set(0, JsString::from(tag).into());
        pair.set(1, Uint8Array::from(&bytes[..]).into());
        pair
    }

    /// The text dump (`# Palette` header plus 256 entry lines).
    #[wasm_bindgen]
    pub fn dump(&self) -> Result<String, JsError> {
        Ok(self.inner.dump()?)
    }

    #[wasm_bindgen]
    pub fn copy(&self) -> Palette {
        Self {
            inner: self.inner.copy(),
        }
    }
}

/// Linear lookup table from black (must be 0) to `white`.
#[wasm_bindgen(js_name = linearLut)]
pub fn linear_lut_js(black: u8, white: u8) -> Result<Vec<u8>, JsError> {
    Ok(linear_lut(black, white)?.to_vec())
}

/// Gamma lookup table for `exponent`.
#[wasm_bindgen(js_name = gammaLut)]
pub fn gamma_lut_js(exponent: f64) -> Vec<u8> {
    gamma_lut(exponent).to_vec()
}
