use map_palette::{Color, EstimatorRegistry, Palette, ResolveOptions, Resolver};
use std::sync::Arc;
use std::time::Instant;

use crate::error::MapError;
use crate::models::{AppConfig, MapColors, MAP_HEIGHT, MAP_PIXELS, MAP_WIDTH};
use crate::rendering::DecodedImage;

/// How image pixels become palette indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Only colors already on the palette are accepted
    Exact,
    /// True nearest entry for every pixel
    Nearest,
    /// Nearest entry of the grid point each pixel snaps to
    Grid(ResolveOptions),
}

impl Default for Conversion {
    fn default() -> Self {
        Conversion::Grid(ResolveOptions::default())
    }
}

/// Converts between map color payloads and RGB pixels for one palette
pub struct MapConverter {
    resolver: Arc<Resolver>,
    conversion: Conversion,
}

impl MapConverter {
    pub fn new(resolver: Arc<Resolver>, conversion: Conversion) -> Self {
        Self {
            resolver,
            conversion,
        }
    }

    /// Converter for the palette variant and conversion chosen by `config`
    pub fn from_config(registry: &EstimatorRegistry, config: &AppConfig) -> Self {
        Self::new(registry.get(config.alpha_color), config.conversion())
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub fn palette(&self) -> &Palette {
        self.resolver.palette()
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Expand a map payload to one RGB color per pixel, row-major
    pub fn render(&self, map: &MapColors) -> Result<Vec<Color>, MapError> {
        let palette = self.palette();
        map.as_bytes()
            .iter()
            .map(|&idx| palette.get(idx).ok_or(MapError::UnknownIndex(idx)))
            .collect()
    }

    /// Map row-major pixels onto the palette
    pub fn convert(&self, pixels: &[Color]) -> Result<MapColors, MapError> {
        if pixels.len() != MAP_PIXELS {
            return Err(MapError::InvalidLength {
                expected: MAP_PIXELS,
                actual: pixels.len(),
            });
        }

        let start = Instant::now();
        let colors = pixels
            .iter()
            .map(|&color| self.map_pixel(color))
            .collect::<Result<Vec<u8>, MapError>>()?;

        tracing::debug!(
            conversion = ?self.conversion,
            elapsed_ms = start.elapsed().as_millis() as u64,
            cache = self.resolver.cache_len(),
            "Converted pixels to map colors"
        );
        MapColors::from_bytes(colors)
    }

    /// Convert a decoded image, which must be exactly one map in size
    pub fn convert_image(&self, image: &DecodedImage) -> Result<MapColors, MapError> {
        if image.width != MAP_WIDTH || image.height != MAP_HEIGHT {
            return Err(MapError::Dimensions {
                width: image.width,
                height: image.height,
                expected_width: MAP_WIDTH,
                expected_height: MAP_HEIGHT,
            });
        }
        self.convert(&image.pixels)
    }

    fn map_pixel(&self, color: Color) -> Result<u8, MapError> {
        match &self.conversion {
            Conversion::Exact => self
                .palette()
                .index_of(color)
                .ok_or(MapError::UnmappableColor(color)),
            Conversion::Nearest => Ok(self.resolver.resolve_exact(color)),
            Conversion::Grid(options) => Ok(self.resolver.resolve_with(color, options)?),
        }
    }
}
