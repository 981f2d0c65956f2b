use crate::error::MapError;

/// Map width in pixels
pub const MAP_WIDTH: u32 = 128;
/// Map height in pixels
pub const MAP_HEIGHT: u32 = 128;
/// Length of the `colors` payload of one map
pub const MAP_PIXELS: usize = (MAP_WIDTH * MAP_HEIGHT) as usize;
/// Most zoomed-out map scale
pub const MAX_SCALE: u8 = 4;

/// The color payload of one map item: one palette index per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapColors {
    colors: Vec<u8>,
}

impl MapColors {
    /// A blank map (every pixel on the transparent slot)
    pub fn new() -> Self {
        Self {
            colors: vec![0; MAP_PIXELS],
        }
    }

    /// Wrap a raw payload, checking its length
    pub fn from_bytes(colors: Vec<u8>) -> Result<Self, MapError> {
        if colors.len() != MAP_PIXELS {
            return Err(MapError::InvalidLength {
                expected: MAP_PIXELS,
                actual: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.colors
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.colors
    }

    pub fn width(&self) -> u32 {
        MAP_WIDTH
    }

    pub fn height(&self) -> u32 {
        MAP_HEIGHT
    }

    /// Byte at a flat index, `None` past the end
    pub fn get_byte(&self, index: usize) -> Option<u8> {
        self.colors.get(index).copied()
    }

    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<(), MapError> {
        let slot = self.colors.get_mut(index).ok_or(MapError::OutOfBounds {
            x: (index % MAP_WIDTH as usize) as i64,
            y: (index / MAP_WIDTH as usize) as i64,
        })?;
        *slot = value;
        Ok(())
    }

    /// Byte at pixel `(x, y)`, `None` outside the map
    pub fn get_point(&self, x: i64, y: i64) -> Option<u8> {
        Self::flat_index(x, y).and_then(|i| self.get_byte(i))
    }

    pub fn set_point(&mut self, x: i64, y: i64, value: u8) -> Result<(), MapError> {
        let index = Self::flat_index(x, y).ok_or(MapError::OutOfBounds { x, y })?;
        self.set_byte(index, value)
    }

    /// Nearest-neighbour upscale: each byte becomes a `factor` x `factor`
    /// block, returned row-major at `(128 * factor)` pixels per side.
    pub fn upscale(&self, factor: u32) -> Result<Vec<u8>, MapError> {
        let side = MAP_WIDTH
            .checked_mul(factor)
            .filter(|&side| side > 0)
            .ok_or(MapError::InvalidFactor(factor))?;
        let side = side as usize;
        let factor = factor as usize;

        let mut out = Vec::with_capacity(side * side);
        for row in self.colors.chunks_exact(MAP_WIDTH as usize) {
            let start = out.len();
            for &idx in row {
                out.extend(std::iter::repeat(idx).take(factor));
            }
            for _ in 1..factor {
                out.extend_from_within(start..start + side);
            }
        }
        Ok(out)
    }

    fn flat_index(x: i64, y: i64) -> Option<usize> {
        let in_bounds =
            (0..i64::from(MAP_WIDTH)).contains(&x) && (0..i64::from(MAP_HEIGHT)).contains(&y);
        in_bounds.then(|| (x + y * i64::from(MAP_WIDTH)) as usize)
    }
}

impl Default for MapColors {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement of a map in the world, for pixel/block coordinate conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapView {
    x_center: i64,
    z_center: i64,
    /// Zoom level `0..=MAX_SCALE`; each pixel covers `2^scale` blocks
    scale: u8,
}

impl MapView {
    pub fn new(x_center: i64, z_center: i64, scale: u8) -> Result<Self, MapError> {
        if scale > MAX_SCALE {
            return Err(MapError::InvalidScale(scale));
        }
        Ok(Self {
            x_center,
            z_center,
            scale,
        })
    }

    pub fn x_center(&self) -> i64 {
        self.x_center
    }

    pub fn z_center(&self) -> i64 {
        self.z_center
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn blocks_per_pixel(&self) -> i64 {
        1i64 << self.scale
    }

    /// Upscale factor that shows the map at one pixel per block, times `num`
    pub fn world_factor(&self, num: u32) -> Result<u32, MapError> {
        (self.blocks_per_pixel() as u32)
            .checked_mul(num)
            .filter(|&factor| factor > 0)
            .ok_or(MapError::InvalidFactor(num))
    }

    /// World `(x, z)` to map pixel `(x, y)`; x points east, z south
    pub fn to_pixel(&self, (x, z): (i64, i64)) -> (i64, i64) {
        let bpp = self.blocks_per_pixel();
        (
            i64::from(MAP_WIDTH / 2) + (x - self.x_center).div_euclid(bpp),
            i64::from(MAP_HEIGHT / 2) + (z - self.z_center).div_euclid(bpp),
        )
    }

    /// Map pixel `(x, y)` to the world `(x, z)` of its north-west corner
    pub fn to_coord(&self, (px, py): (i64, i64)) -> (i64, i64) {
        let bpp = self.blocks_per_pixel();
        (
            self.x_center + (px - i64::from(MAP_WIDTH / 2)) * bpp,
            self.z_center + (py - i64::from(MAP_HEIGHT / 2)) * bpp,
        )
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            x_center: 64,
            z_center: 0,
            scale: 1,
        }
    }
}
