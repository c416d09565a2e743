//! Color specifier resolution (hex, CSS functions and names) to RGB.

mod names;
mod parse;

pub use names::*;
pub use parse::*;
