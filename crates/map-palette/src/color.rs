//! 8-bit RGB color value type
//!
//! `Color` is the key of every exact-match structure in this crate, so
//! equality is strict component-wise equality. Alpha is accepted at the
//! boundary but never stored: map palettes have no per-entry alpha and the
//! distance metric ignores it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[u8; 3]")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure black, the default stand-in for the transparent palette slot.
    pub const BLACK: Color = Color::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from loosely typed channel values.
    ///
    /// Accepts 3 (RGB) or 4 (RGBA) channels, each in `0..=255`. The alpha
    /// channel is range-checked and then discarded. Out-of-range values are
    /// rejected rather than clamped.
    ///
    /// # Example
    ///
    /// ```
    /// use map_palette::Color;
    ///
    /// let c = Color::from_channels(&[127, 178, 56, 255]).unwrap();
    /// assert_eq!(c, Color::new(127, 178, 56));
    /// assert!(Color::from_channels(&[256, 0, 0]).is_err());
    /// assert!(Color::from_channels(&[1, 2]).is_err());
    /// ```
    pub fn from_channels(channels: &[i64]) -> Result<Self, ColorError> {
        if channels.len() != 3 && channels.len() != 4 {
            return Err(ColorError::Arity {
                arity: channels.len(),
            });
        }

        let mut rgb = [0u8; 3];
        for (channel, &value) in channels.iter().enumerate() {
            let byte = u8::try_from(value).map_err(|_| ColorError::OutOfRange { channel, value })?;
            if let Some(slot) = rgb.get_mut(channel) {
                *slot = byte;
            }
        }

        Ok(Self::from_bytes(rgb))
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Scale every channel by `multiplier / 255`, rounding down.
    ///
    /// This is the brightness shading rule of the map format; the integer
    /// floor division decides which RGB values land on which palette index
    /// and must not be replaced by float math.
    #[inline]
    pub const fn shade(self, multiplier: u8) -> Self {
        let m = multiplier as u16;
        Self::new(
            (self.r as u16 * m / 255) as u8,
            (self.g as u16 * m / 255) as u8,
            (self.b as u16 * m / 255) as u8,
        )
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse a color from text.
    ///
    /// Supported forms:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit doubled)
    /// - `r,g,b` or `r,g,b,a` in decimal, optionally wrapped in parentheses
    ///
    /// ```
    /// use map_palette::Color;
    ///
    /// assert_eq!("#7FB238".parse::<Color>().unwrap(), Color::new(127, 178, 56));
    /// assert_eq!("127, 178, 56".parse::<Color>().unwrap(), Color::new(127, 178, 56));
    /// assert_eq!("(255,0,255,0)".parse::<Color>().unwrap(), Color::new(255, 0, 255));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_err = || ColorError::Parse(s.to_string());

        if trimmed.contains(',') {
            let inner = trimmed
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .unwrap_or(trimmed);
            let channels = inner
                .split(',')
                .map(|part| part.trim().parse::<i64>().map_err(|_| parse_err()))
                .collect::<Result<Vec<_>, _>>()?;
            return Self::from_channels(&channels);
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(parse_err());
        }
        let digit = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| parse_err())
        };

        match hex.len() {
            3 => Ok(Self::new(digit(0..1)? * 17, digit(1..2)? * 17, digit(2..3)? * 17)),
            6 => Ok(Self::new(digit(0..2)?, digit(2..4)?, digit(4..6)?)),
            _ => Err(parse_err()),
        }
    }
}

/// Accepted serialized forms: `[r, g, b]`, `[r, g, b, a]` or a color string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Channels(Vec<i64>),
    Text(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ColorError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Channels(channels) => Self::from_channels(&channels),
            ColorRepr::Text(text) => text.parse(),
        }
    }
}
