//! Color distance used for nearest-palette-entry ranking.

use crate::color::Color;

/// Squared Euclidean distance between two colors in RGB space.
///
/// Only used to rank palette candidates against one input color, so the
/// square root is never taken.
///
/// ```
/// use map_palette::{distance, Color};
///
/// assert_eq!(distance(Color::new(0, 0, 0), Color::new(2, 3, 1)), 14);
/// ```
#[inline]
pub fn distance(a: Color, b: Color) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_equal_colors() {
        let c = Color::new(12, 200, 7);
        assert_eq!(distance(c, c), 0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Color::new(255, 0, 10);
        let b = Color::new(0, 255, 20);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_distance_extremes() {
        assert_eq!(
            distance(Color::new(0, 0, 0), Color::new(255, 255, 255)),
            3 * 255 * 255
        );
    }
}
