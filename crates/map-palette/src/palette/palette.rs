//! Palette construction and exact/brute-force lookups.
//!
//! A map palette is derived from a short list of base colors, each shaded by
//! a fixed set of brightness multipliers. The `(base, multiplier)` iteration
//! order defines the palette index of every entry, and those indices are what
//! map files store, so the order and the shading rule are part of the format.

use std::collections::HashMap;

use super::tables::{BASE_COLORS, MULTIPLIERS};
use crate::color::Color;
use crate::distance::distance;
use crate::error::PaletteError;

/// Index of one palette entry; the byte persisted in map payloads.
pub type PaletteIndex = u8;

/// An immutable, ordered map palette with its exact-match index.
///
/// # Example
///
/// ```
/// use map_palette::{Color, Palette};
///
/// let palette = Palette::build(
///     &[Color::new(0, 0, 0), Color::new(127, 178, 56)],
///     &[180, 220, 255, 135],
///     Color::new(0, 0, 0),
/// )
/// .unwrap();
///
/// assert_eq!(palette.len(), 8);
/// assert_eq!(palette.index_of(Color::new(127, 178, 56)), Some(6));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    base_colors: Vec<Color>,
    multipliers: Vec<u8>,
    alpha_color: Color,
    colors: Vec<Color>,
    inverse: HashMap<Color, PaletteIndex>,
}

impl Palette {
    /// Build a palette from base colors and brightness multipliers.
    ///
    /// Base color 0 is replaced by `alpha_color`. Each base color is shaded by
    /// each multiplier (`channel * multiplier / 255`, floor) and appended in
    /// `(base, multiplier)` order.
    ///
    /// Shaded colors may collide (the alpha slot shades to identical colors
    /// whenever it is black). The exact-match index then points at the
    /// *last* entry holding that color.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] if either list is empty
    /// - [`PaletteError::TooLarge`] if the palette would exceed 256 entries
    pub fn build(
        base_colors: &[Color],
        multipliers: &[u8],
        alpha_color: Color,
    ) -> Result<Self, PaletteError> {
        if base_colors.is_empty() || multipliers.is_empty() {
            return Err(PaletteError::Empty);
        }

        let len = base_colors.len() * multipliers.len();
        if len > usize::from(PaletteIndex::MAX) + 1 {
            return Err(PaletteError::TooLarge { len });
        }

        let mut base_colors = base_colors.to_vec();
        base_colors[0] = alpha_color;

        let colors: Vec<Color> = base_colors
            .iter()
            .flat_map(|&base| multipliers.iter().map(move |&m| base.shade(m)))
            .collect();

        // Later duplicates overwrite earlier ones.
        let inverse = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| (color, i as PaletteIndex))
            .collect();

        Ok(Self {
            base_colors,
            multipliers: multipliers.to_vec(),
            alpha_color,
            colors,
            inverse,
        })
    }

    /// The map format's palette with the given transparent-slot substitution.
    pub fn minecraft(alpha_color: Color) -> Self {
        Self::build(&BASE_COLORS, &MULTIPLIERS, alpha_color)
            .unwrap_or_else(|e| unreachable!("built-in tables are valid: {e}"))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected by [`Palette::build`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of the entry at `index`, if it exists.
    #[inline]
    pub fn get(&self, index: PaletteIndex) -> Option<Color> {
        self.colors.get(usize::from(index)).copied()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Base colors after the alpha substitution.
    pub fn base_colors(&self) -> &[Color] {
        &self.base_colors
    }

    pub fn multipliers(&self) -> &[u8] {
        &self.multipliers
    }

    pub fn alpha_color(&self) -> Color {
        self.alpha_color
    }

    /// Number of entries sharing one base color (the alpha slot spans
    /// indices `0..shades()`).
    pub fn shades(&self) -> usize {
        self.multipliers.len()
    }

    /// Exact-match lookup.
    #[inline]
    pub fn index_of(&self, color: Color) -> Option<PaletteIndex> {
        self.inverse.get(&color).copied()
    }

    /// The exact-match index as a map, for inspection.
    pub fn inverse_index(&self) -> &HashMap<Color, PaletteIndex> {
        &self.inverse
    }

    /// Brute-force nearest entry by [`distance`].
    ///
    /// Ties resolve to the lowest index. Unlike [`Palette::index_of`], an
    /// exact color shared by several entries therefore maps to the *first*
    /// of them here.
    pub fn nearest(&self, color: Color) -> PaletteIndex {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = distance(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        best_idx as PaletteIndex
    }
}
