//! Map palette construction
//!
//! This module builds the ordered palette of the map format and its
//! exact-match index, and exposes the built-in base color tables.

mod palette;
mod tables;

pub use palette::{Palette, PaletteIndex};
pub use tables::{BASE_COLORS, DEFAULT_ALPHA_COLOR, MULTIPLIERS};
