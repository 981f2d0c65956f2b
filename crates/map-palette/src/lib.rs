#![allow(clippy::module_inception)]

//! map-palette: nearest-color resolution for map art palettes
//!
//! Map items store one palette index per pixel. The palette is small (52
//! base colors, each in 4 brightness shades) and fixed by the format, so
//! turning an arbitrary image into a map means snapping every pixel to the
//! closest of ~200 colors, often tens of thousands of times per image.
//!
//! # Quick Start
//!
//! ```
//! use map_palette::{Color, EstimatorRegistry, TableMode};
//!
//! let registry = EstimatorRegistry::new();
//! let resolver = registry.get(Color::new(0, 0, 0));
//!
//! // On-palette colors resolve exactly
//! let grass = Color::new(127, 178, 56);
//! let idx = resolver.resolve(grass, 10, TableMode::Dense).unwrap();
//! assert_eq!(resolver.palette().get(idx), Some(grass));
//!
//! // Everything else goes through the grid tiers
//! let idx = resolver.resolve(Color::new(120, 170, 60), 10, TableMode::Dense).unwrap();
//! assert!(usize::from(idx) < resolver.palette().len());
//! ```
//!
//! # Resolution Tiers
//!
//! | Tier | Cost | Exact? |
//! |------|------|--------|
//! | Inverse index | one hash lookup | yes |
//! | Estimation table | one array or hash lookup | nearest entry of the grid point |
//! | Brute-force cache | one hash lookup | yes, for the cached key |
//! | Brute force | one pass over the palette | yes |
//!
//! Estimation tables are the reason this crate exists. A table at interval
//! `n` samples each channel every `n` steps (plus 255) and stores the
//! nearest entry for each sample, so a lookup answers for the grid point the
//! color snaps to rather than the color itself. Coarser grids build faster
//! and use less memory at the cost of occasional off-by-one-shade answers.
//! A table at interval `f` also serves every multiple of `f`.
//!
//! # Distance
//!
//! Plain squared Euclidean distance in RGB, see [`distance()`]. No gamma
//! and no perceptual color space.

pub mod color;
pub mod distance;
pub mod error;
pub mod estimate;
pub mod palette;
pub mod registry;
pub mod resolver;


pub use color::Color;
pub use distance::distance;
pub use error::{ColorError, PaletteError, ResolveError};
pub use estimate::{EstimationTable, IntervalRegistry, TableMode, TableRepr};
pub use palette::{Palette, PaletteIndex, BASE_COLORS, DEFAULT_ALPHA_COLOR, MULTIPLIERS};
pub use registry::EstimatorRegistry;
pub use resolver::{ResolveOptions, Resolver, ResolverStats, DEFAULT_INTERVAL};
