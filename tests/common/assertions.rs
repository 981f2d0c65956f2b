//! Assertion helpers for tests.

use map_palette::Palette;
use mapcolor::models::MapColors;

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every byte of the map is a valid index into `palette`
pub fn assert_indices_in_palette(map: &MapColors, palette: &Palette) {
    if let Some((i, &idx)) = map
        .as_bytes()
        .iter()
        .enumerate()
        .find(|(_, &idx)| usize::from(idx) >= palette.len())
    {
        panic!(
            "Pixel {i} holds index {idx}, palette has {} entries",
            palette.len()
        );
    }
}
