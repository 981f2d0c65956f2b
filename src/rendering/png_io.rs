use map_palette::{Color, Palette};
use std::io::Cursor;

use crate::error::MapError;
use crate::models::MapColors;

/// RGB pixels of a decoded PNG, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

/// Encode a map as an 8-bit indexed PNG over `palette`.
///
/// The alpha slot entries are marked fully transparent in tRNS. The result
/// is re-compressed with oxipng, which may reorder or shrink the palette,
/// so read it back through the decoded colors rather than raw indices.
pub fn encode_indexed_png(map: &MapColors, palette: &Palette) -> Result<Vec<u8>, MapError> {
    encode_scaled_png(map, palette, 1)
}

/// Like [`encode_indexed_png`], with every map pixel drawn as a
/// `factor` x `factor` block (see [`MapView::world_factor`]).
///
/// [`MapView::world_factor`]: crate::models::MapView::world_factor
pub fn encode_scaled_png(
    map: &MapColors,
    palette: &Palette,
    factor: u32,
) -> Result<Vec<u8>, MapError> {
    if let Some(&idx) = map
        .as_bytes()
        .iter()
        .find(|&&idx| usize::from(idx) >= palette.len())
    {
        return Err(MapError::UnknownIndex(idx));
    }

    let indices = map.upscale(factor)?;
    let width = map.width() * factor;
    let height = map.height() * factor;
    let png_bytes = encode_png(width, height, palette, &indices)?;

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(width, height, bytes = optimized.len(), "Encoded map PNG");
    Ok(optimized)
}

/// Encode 8-bit palette indices (fast settings; oxipng re-compresses later)
fn encode_png(
    width: u32,
    height: u32,
    palette: &Palette,
    indices: &[u8],
) -> Result<Vec<u8>, MapError> {
    let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_bytes()).collect();
    let trns = vec![0u8; palette.shades()];

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        encoder.set_trns(trns);
        let mut writer = encoder
            .write_header()
            .map_err(|e| MapError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(indices)
            .map_err(|e| MapError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Decode any 8- or 16-bit gray, RGB, indexed or alpha PNG to RGB pixels.
///
/// Alpha is dropped; transparent pixels keep whatever RGB they carry.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, MapError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| MapError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| MapError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<Color> = match info.color_type {
        png::ColorType::Grayscale => data.iter().map(|&v| Color::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|px| Color::new(px[0], px[0], px[0]))
            .collect(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|px| Color::new(px[0], px[1], px[2]))
            .collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|px| Color::new(px[0], px[1], px[2]))
            .collect(),
        png::ColorType::Indexed => {
            return Err(MapError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    let expected = info.width as usize * info.height as usize;
    if pixels.len() != expected {
        return Err(MapError::PngDecode(format!(
            "expected {expected} pixels, decoded {}",
            pixels.len()
        )));
    }

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}
