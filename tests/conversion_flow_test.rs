//! End-to-end flow tests: payload -> PNG -> pixels -> payload.

mod common;

use std::sync::Arc;

use common::fixtures::{self, alphas};
use map_palette::{Color, EstimatorRegistry, ResolveOptions, TableMode};
use mapcolor::error::MapError;
use mapcolor::models::{AppConfig, MapColors, MapView};
use mapcolor::rendering::{decode_png, encode_indexed_png, encode_scaled_png};
use mapcolor::services::{Conversion, MapConverter};
use pretty_assertions::assert_eq;

#[test]
fn test_render_png_convert_round_trip() {
    let registry = EstimatorRegistry::new();
    let resolver = registry.get(alphas::MAGENTA);
    let converter = MapConverter::new(Arc::clone(&resolver), Conversion::Exact);
    let map = fixtures::striped_map(resolver.palette().len());

    let png = encode_indexed_png(&map, resolver.palette()).unwrap();
    common::assert_png(&png);

    let image = decode_png(&png).unwrap();
    assert_eq!(image.pixels, converter.render(&map).unwrap());

    let restored = converter.convert_image(&image).unwrap();
    assert_eq!(restored, map);
}

#[test]
fn test_black_alpha_round_trip_collapses_alpha_slot() {
    let registry = EstimatorRegistry::new();
    let converter = MapConverter::new(registry.get(alphas::BLACK), Conversion::Exact);
    let mut map = MapColors::new();
    map.set_point(5, 5, 34).unwrap();

    let pixels = converter.render(&map).unwrap();
    let restored = converter.convert(&pixels).unwrap();

    // Black appears four times; the later index wins
    assert_eq!(restored.get_point(0, 0), Some(3));
    assert_eq!(restored.get_point(5, 5), Some(34));
}

#[test]
fn test_approximate_conversion_of_noise() {
    let registry = EstimatorRegistry::new();
    let config = AppConfig {
        alpha_color: alphas::MAGENTA,
        ..AppConfig::default()
    };
    let converter = MapConverter::from_config(&registry, &config);
    let pixels = fixtures::noise_pixels(42);

    let first = converter.convert(&pixels).unwrap();
    common::assert_indices_in_palette(&first, converter.palette());

    let second = converter.convert(&pixels).unwrap();
    assert_eq!(first, second);
    assert_eq!(converter.resolver().intervals(), vec![10]);
}

#[test]
fn test_grid_modes_agree() {
    let registry = EstimatorRegistry::new();
    let pixels = fixtures::noise_pixels(3);

    let dense = MapConverter::new(
        registry.get(alphas::BLACK),
        Conversion::Grid(ResolveOptions {
            interval: 15,
            mode: TableMode::Dense,
        }),
    );
    let sparse_registry = EstimatorRegistry::new();
    let sparse = MapConverter::new(
        sparse_registry.get(alphas::BLACK),
        Conversion::Grid(ResolveOptions {
            interval: 15,
            mode: TableMode::Sparse,
        }),
    );

    assert_eq!(
        dense.convert(&pixels).unwrap(),
        sparse.convert(&pixels).unwrap()
    );
}

#[test]
fn test_nearest_conversion_matches_brute_force() {
    let registry = EstimatorRegistry::new();
    let converter = MapConverter::new(registry.get(alphas::MAGENTA), Conversion::Nearest);
    let pixels = fixtures::noise_pixels(11);

    let map = converter.convert(&pixels).unwrap();
    let palette = converter.palette();
    for (i, &color) in pixels.iter().enumerate().step_by(97) {
        let expected = palette.index_of(color).unwrap_or_else(|| palette.nearest(color));
        assert_eq!(map.get_byte(i), Some(expected), "pixel {i} {color}");
    }
    assert!(converter.resolver().intervals().is_empty());
}

#[test]
fn test_exact_conversion_rejects_photo() {
    let registry = EstimatorRegistry::new();
    let converter = MapConverter::new(registry.get(alphas::BLACK), Conversion::Exact);
    let png = fixtures::rgb_png(128, 128, &fixtures::noise_pixels(5));

    let image = decode_png(&png).unwrap();
    assert!(matches!(
        converter.convert_image(&image),
        Err(MapError::UnmappableColor(_))
    ));
}

#[test]
fn test_wrong_size_image_is_rejected() {
    let registry = EstimatorRegistry::new();
    let converter = MapConverter::new(registry.get(alphas::BLACK), Conversion::default());
    let png = fixtures::rgb_png(2, 2, &[Color::BLACK; 4]);

    let image = decode_png(&png).unwrap();
    assert!(matches!(
        converter.convert_image(&image),
        Err(MapError::Dimensions {
            width: 2,
            height: 2,
            expected_width: 128,
            expected_height: 128
        })
    ));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "alpha_color: \"#FF00FF\"\napproximate: false\n").unwrap();

    let config = AppConfig::load_or_default(Some(config_path.as_path()));
    assert_eq!(config.conversion(), Conversion::Exact);

    let registry = EstimatorRegistry::new();
    let converter = MapConverter::from_config(&registry, &config);
    let map = fixtures::striped_map(converter.palette().len());

    let payload_path = dir.path().join("colors.bin");
    let png_path = dir.path().join("map.png");
    std::fs::write(&payload_path, map.as_bytes()).unwrap();

    let loaded = MapColors::from_bytes(std::fs::read(&payload_path).unwrap()).unwrap();
    let png = encode_indexed_png(&loaded, converter.palette()).unwrap();
    std::fs::write(&png_path, &png).unwrap();

    let image = decode_png(&std::fs::read(&png_path).unwrap()).unwrap();
    assert_eq!(converter.convert_image(&image).unwrap(), map);
}

#[test]
fn test_world_scale_render() {
    let registry = EstimatorRegistry::new();
    let resolver = registry.get(alphas::MAGENTA);
    let converter = MapConverter::new(Arc::clone(&resolver), Conversion::Exact);
    let map = fixtures::striped_map(resolver.palette().len());

    let view = MapView::new(0, 0, 1).unwrap();
    let factor = view.world_factor(2).unwrap();
    assert_eq!(factor, 4);

    let image = decode_png(&encode_scaled_png(&map, resolver.palette(), factor).unwrap()).unwrap();
    assert_eq!((image.width, image.height), (512, 512));

    // Sampling every block's top-left corner gives back the unscaled map
    let pixels = converter.render(&map).unwrap();
    for y in 0..128usize {
        for x in 0..128usize {
            let corner = image.pixels[x * 4 + y * 4 * 512];
            assert_eq!(corner, pixels[x + y * 128], "pixel ({x}, {y})");
        }
    }
}
