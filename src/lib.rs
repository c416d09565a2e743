//! # libpalette
//!
//! Fixed-capacity (256 entry) color palettes for palette-mapped images.
//!
//! Palettes keep a channel-planar byte buffer together with a color-to-index
//! lookup derived from it, allocate new colors on demand, and serialize to
//! bytes or a text dump. Presets (wedge, negative, random, sepia) are built
//! from linear and gamma lookup tables, and GIMP palettes, GIMP gradients and
//! indexed palette text files can be loaded. Everything is usable natively
//! and, through WASM, from JavaScript.

mod bindings;
mod color;
mod error;
mod loader;
mod palette;
mod utils;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize the WASM module. Call this once before using other functions.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better error messages for panics in debug builds
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Re-export main types
pub use bindings::*;
pub use color::*;
pub use error::*;
pub use loader::*;
pub use palette::*;
