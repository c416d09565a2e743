//! Fixed-capacity image palettes and the presets built on them.

mod channels;
mod dump;
mod factory;
mod image_palette;
mod lut;
mod mode;
mod raw;

pub use channels::*;
pub use dump::*;
pub use factory::*;
pub use image_palette::*;
pub use lut::*;
pub use mode::*;
pub use raw::*;
