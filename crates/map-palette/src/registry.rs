//! Shared resolvers keyed by transparent-slot substitution.
//!
//! Building a resolver is cheap, but its tables and cache are not; callers
//! that convert many images with the same alpha substitution should share
//! one. The registry is an ordinary value: create it once, hand out
//! references (or wrap it in an `Arc`), and its resolvers live as long as it
//! does.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::color::Color;
use crate::error::PaletteError;
use crate::palette::{Palette, BASE_COLORS, MULTIPLIERS};
use crate::resolver::Resolver;

/// Lazily populated map from alpha substitution to resolver.
///
/// ```
/// use map_palette::{Color, EstimatorRegistry};
///
/// let registry = EstimatorRegistry::new();
/// let magenta = registry.get(Color::new(255, 0, 255));
/// let black = registry.get(Color::new(0, 0, 0));
///
/// assert_ne!(magenta.palette().get(0), black.palette().get(0));
/// assert_eq!(magenta.palette().get(4), black.palette().get(4));
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug)]
pub struct EstimatorRegistry {
    base_colors: Vec<Color>,
    multipliers: Vec<u8>,
    variants: RwLock<HashMap<Color, Arc<Resolver>>>,
}

impl EstimatorRegistry {
    /// Registry over the map format's built-in color tables.
    pub fn new() -> Self {
        Self {
            base_colors: BASE_COLORS.to_vec(),
            multipliers: MULTIPLIERS.to_vec(),
            variants: RwLock::new(HashMap::new()),
        }
    }

    /// Registry over custom color tables.
    ///
    /// The tables are validated here, once, so that [`EstimatorRegistry::get`]
    /// cannot fail later.
    pub fn with_tables(base_colors: &[Color], multipliers: &[u8]) -> Result<Self, PaletteError> {
        Palette::build(base_colors, multipliers, Color::BLACK)?;
        Ok(Self {
            base_colors: base_colors.to_vec(),
            multipliers: multipliers.to_vec(),
            variants: RwLock::new(HashMap::new()),
        })
    }

    /// Resolver for palettes whose transparent slot is `alpha_color`,
    /// created on first request.
    pub fn get(&self, alpha_color: Color) -> Arc<Resolver> {
        let existing = self
            .variants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&alpha_color)
            .cloned();
        if let Some(resolver) = existing {
            return resolver;
        }

        let mut variants = self.variants.write().unwrap_or_else(PoisonError::into_inner);
        let resolver = variants.entry(alpha_color).or_insert_with(|| {
            tracing::debug!(alpha = %alpha_color, "Creating palette variant");
            Arc::new(Resolver::new(self.build_palette(alpha_color)))
        });
        Arc::clone(resolver)
    }

    /// Palette for `alpha_color`, through its shared resolver.
    pub fn palette(&self, alpha_color: Color) -> Arc<Palette> {
        Arc::clone(self.get(alpha_color).palette())
    }

    /// Whether a variant for `alpha_color` has been created.
    pub fn contains(&self, alpha_color: Color) -> bool {
        self.variants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&alpha_color)
    }

    pub fn len(&self) -> usize {
        self.variants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn build_palette(&self, alpha_color: Color) -> Palette {
        Palette::build(&self.base_colors, &self.multipliers, alpha_color)
            .unwrap_or_else(|e| unreachable!("tables validated at construction: {e}"))
    }
}

impl Default for EstimatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
