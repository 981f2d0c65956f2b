//! Built-in color tables of the map format.

use crate::color::Color;

/// Stand-in for the transparent slot when the caller does not pick one.
pub const DEFAULT_ALPHA_COLOR: Color = Color::BLACK;

/// Brightness multipliers applied to every base color, in index order.
pub const MULTIPLIERS: [u8; 4] = [180, 220, 255, 135];

/// Base colors in map color id order. Entry 0 is the transparent slot and
/// is replaced by the alpha substitution when a palette is built.
pub const BASE_COLORS: [Color; 52] = [
    DEFAULT_ALPHA_COLOR,
    Color::new(127, 178, 56),
    Color::new(247, 233, 163),
    Color::new(199, 199, 199),
    Color::new(255, 0, 0),
    Color::new(160, 160, 255),
    Color::new(167, 167, 167),
    Color::new(0, 124, 0),
    Color::new(255, 255, 255),
    Color::new(164, 168, 184),
    Color::new(151, 109, 77),
    Color::new(112, 112, 112),
    Color::new(64, 64, 255),
    Color::new(143, 119, 72),
    Color::new(255, 252, 245),
    Color::new(216, 127, 51),
    Color::new(178, 76, 216),
    Color::new(102, 153, 216),
    Color::new(229, 229, 51),
    Color::new(127, 204, 25),
    Color::new(242, 127, 165),
    Color::new(76, 76, 76),
    Color::new(153, 153, 153),
    Color::new(76, 127, 153),
    Color::new(127, 63, 178),
    Color::new(51, 76, 178),
    Color::new(102, 76, 51),
    Color::new(102, 127, 51),
    Color::new(153, 51, 51),
    Color::new(25, 25, 25),
    Color::new(250, 238, 77),
    Color::new(92, 219, 213),
    Color::new(74, 128, 255),
    Color::new(0, 217, 58),
    Color::new(129, 86, 49),
    Color::new(112, 2, 0),
    Color::new(209, 177, 161),
    Color::new(159, 82, 36),
    Color::new(149, 87, 108),
    Color::new(112, 108, 138),
    Color::new(186, 133, 36),
    Color::new(103, 117, 53),
    Color::new(160, 77, 78),
    Color::new(57, 41, 35),
    Color::new(135, 107, 98),
    Color::new(87, 92, 92),
    Color::new(122, 73, 88),
    Color::new(76, 62, 92),
    Color::new(76, 50, 35),
    Color::new(76, 82, 42),
    Color::new(142, 60, 46),
    Color::new(37, 22, 16),
];
