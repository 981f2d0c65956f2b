//! Error types for color parsing, palette construction and resolution.

use thiserror::Error;

/// Error returned when a color cannot be built from caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Wrong number of channels (only RGB and RGBA are accepted)
    #[error("color must have 3 or 4 channels, got {arity}")]
    Arity { arity: usize },

    /// Channel value outside 0..=255
    #[error("channel {channel} out of range: {value} (expected 0..=255)")]
    OutOfRange { channel: usize, value: i64 },

    /// Text could not be parsed as a color
    #[error("invalid color string: {0:?}")]
    Parse(String),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No base colors or no multipliers were supplied
    #[error("palette needs at least one base color and one multiplier")]
    Empty,

    /// More entries than a byte index can address
    #[error("palette has {len} entries, at most 256 are addressable")]
    TooLarge { len: usize },
}

/// Error type for color resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Grid lookups need an interval of at least 2; use exact resolution instead
    #[error("grid interval must be greater than 1, got {0}")]
    InvalidInterval(u32),

    /// A table was queried directly for a key it does not hold
    #[error("no estimate for color ({r}, {g}, {b}) at interval {interval}")]
    Unresolvable { r: u8, g: u8, b: u8, interval: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_error_messages() {
        assert_eq!(
            ColorError::Arity { arity: 2 }.to_string(),
            "color must have 3 or 4 channels, got 2"
        );
        assert_eq!(
            ColorError::OutOfRange {
                channel: 1,
                value: 300
            }
            .to_string(),
            "channel 1 out of range: 300 (expected 0..=255)"
        );
    }

    #[test]
    fn test_palette_error_messages() {
        assert_eq!(
            PaletteError::TooLarge { len: 300 }.to_string(),
            "palette has 300 entries, at most 256 are addressable"
        );
    }

    #[test]
    fn test_resolve_error_messages() {
        assert_eq!(
            ResolveError::InvalidInterval(1).to_string(),
            "grid interval must be greater than 1, got 1"
        );
        assert_eq!(
            ResolveError::Unresolvable {
                r: 1,
                g: 2,
                b: 3,
                interval: 10
            }
            .to_string(),
            "no estimate for color (1, 2, 3) at interval 10"
        );
    }
}
