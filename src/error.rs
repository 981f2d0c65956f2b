use map_palette::{Color, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Map payload must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Image must be {expected_width}x{expected_height}, got {width}x{height}")]
    Dimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Point ({x}, {y}) is outside the map")]
    OutOfBounds { x: i64, y: i64 },

    #[error("Map scale must be 0..=4, got {0}")]
    InvalidScale(u8),

    #[error("Upscale factor must be positive and fit the image, got {0}")]
    InvalidFactor(u32),

    #[error("Palette has no entry {0}")]
    UnknownIndex(u8),

    #[error("Could not map color to a palette entry: {0}")]
    UnmappableColor(Color),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_invalid_length() {
        let error = MapError::InvalidLength {
            expected: 16384,
            actual: 10,
        };
        assert_eq!(
            error.to_string(),
            "Map payload must be 16384 bytes, got 10"
        );
    }

    #[test]
    fn test_map_error_dimensions() {
        let error = MapError::Dimensions {
            width: 64,
            height: 32,
            expected_width: 128,
            expected_height: 128,
        };
        assert_eq!(error.to_string(), "Image must be 128x128, got 64x32");
    }

    #[test]
    fn test_map_error_unmappable_color() {
        let error = MapError::UnmappableColor(Color::new(1, 2, 3));
        assert_eq!(
            error.to_string(),
            "Could not map color to a palette entry: (1, 2, 3)"
        );
    }

    #[test]
    fn test_map_error_out_of_bounds() {
        let error = MapError::OutOfBounds { x: 128, y: -1 };
        assert_eq!(error.to_string(), "Point (128, -1) is outside the map");
    }

    #[test]
    fn test_map_error_invalid_scale() {
        let error = MapError::InvalidScale(7);
        assert_eq!(error.to_string(), "Map scale must be 0..=4, got 7");
    }

    #[test]
    fn test_map_error_from_resolve_error() {
        let error: MapError = ResolveError::InvalidInterval(1).into();
        match error {
            MapError::Resolve(_) => {}
            _ => panic!("Expected Resolve variant"),
        }
    }

    #[test]
    fn test_config_error_invalid() {
        let error = ConfigError::Invalid("interval must be at least 1".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid config: interval must be at least 1"
        );
    }
}
