//! Test fixtures and constants.

use map_palette::Color;
use mapcolor::models::{MapColors, MAP_PIXELS, MAP_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alpha colors used across tests
pub mod alphas {
    use map_palette::Color;

    /// Default transparent slot; collides with base black in every shade
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// Alpha color with no collisions in the built-in palette
    pub const MAGENTA: Color = Color::new(255, 0, 255);
}

/// Map with vertical stripes cycling through every palette index
pub fn striped_map(palette_len: usize) -> MapColors {
    let mut map = MapColors::new();
    for i in 0..MAP_PIXELS {
        let x = i % MAP_WIDTH as usize;
        map.set_byte(i, (x % palette_len) as u8).unwrap();
    }
    map
}

/// Seeded noise image, one map in size
pub fn noise_pixels(seed: u64) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..MAP_PIXELS)
        .map(|_| Color::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// Encode RGB pixels as a plain 8-bit RGB PNG
pub fn rgb_png(width: u32, height: u32, pixels: &[Color]) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flat_map(|c| c.to_bytes()).collect();
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    buf
}
