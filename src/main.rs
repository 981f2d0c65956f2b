use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use map_palette::{Color, EstimatorRegistry, ResolveOptions, ResolverStats, TableMode};
use mapcolor::models::{AppConfig, MapColors, MapView};
use mapcolor::rendering::{decode_png, encode_scaled_png};
use mapcolor::services::{Conversion, MapConverter};

#[derive(Parser)]
#[command(name = "mapcolor")]
#[command(about = "Convert between images and map item color data")]
struct Cli {
    /// YAML config file (defaults to $MAPCOLOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the palette as JSON
    Palette {
        /// Color for the transparent slot (e.g. "#FF00FF" or "255,0,255")
        #[arg(long)]
        alpha: Option<Color>,
    },
    /// Resolve one color to a palette index
    Resolve {
        /// Color to resolve (e.g. "#7FB238" or "127,178,56")
        color: Color,

        /// Grid interval (overrides config)
        #[arg(short, long)]
        interval: Option<u32>,

        /// Use sparse tables instead of dense arrays
        #[arg(long)]
        sparse: bool,

        /// Resolve to the true nearest entry, bypassing the grid
        #[arg(long)]
        exact: bool,

        /// Color for the transparent slot
        #[arg(long)]
        alpha: Option<Color>,
    },
    /// Render a map color payload to an indexed PNG
    Render {
        /// Raw 16384-byte color payload
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Map scale level (0..=4); each pixel is drawn 2^zoom blocks wide
        #[arg(short, long, default_value_t = 0)]
        zoom: u8,

        /// Extra upscale factor on top of the zoom
        #[arg(short, long, default_value_t = 1)]
        scale: u32,
    },
    /// Convert a 128x128 PNG to a map color payload
    Convert {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output payload file path
        #[arg(short, long)]
        output: PathBuf,

        /// Fail on colors that are not on the palette
        #[arg(long)]
        exact: bool,
    },
}

#[derive(Serialize)]
struct PaletteOutput<'a> {
    alpha_color: Color,
    multipliers: &'a [u8],
    colors: &'a [Color],
}

#[derive(Serialize)]
struct ResolveOutput {
    color: Color,
    index: u8,
    entry: Color,
    stats: ResolverStats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapcolor=warn,map_palette=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("MAPCOLOR_CONFIG").ok().map(PathBuf::from));
    let config = AppConfig::load_or_default(config_path.as_deref());
    let registry = EstimatorRegistry::new();

    match cli.command {
        Commands::Palette { alpha } => run_palette_command(&registry, &config, alpha),
        Commands::Resolve {
            color,
            interval,
            sparse,
            exact,
            alpha,
        } => run_resolve_command(&registry, &config, color, interval, sparse, exact, alpha),
        Commands::Render {
            input,
            output,
            zoom,
            scale,
        } => run_render_command(&registry, &config, &input, &output, zoom, scale),
        Commands::Convert {
            input,
            output,
            exact,
        } => run_convert_command(&registry, &config, &input, &output, exact),
    }
}

fn run_palette_command(
    registry: &EstimatorRegistry,
    config: &AppConfig,
    alpha: Option<Color>,
) -> anyhow::Result<()> {
    let palette = registry.palette(alpha.unwrap_or(config.alpha_color));
    let output = PaletteOutput {
        alpha_color: palette.alpha_color(),
        multipliers: palette.multipliers(),
        colors: palette.colors(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_resolve_command(
    registry: &EstimatorRegistry,
    config: &AppConfig,
    color: Color,
    interval: Option<u32>,
    sparse: bool,
    exact: bool,
    alpha: Option<Color>,
) -> anyhow::Result<()> {
    let resolver = registry.get(alpha.unwrap_or(config.alpha_color));
    let interval = interval.unwrap_or(config.interval);
    let mode = if sparse {
        TableMode::Sparse
    } else {
        config.table_mode()
    };

    let index = if exact || interval <= 1 {
        resolver.resolve_exact(color)
    } else {
        resolver.resolve_with(color, &ResolveOptions { interval, mode })?
    };
    let entry = resolver
        .palette()
        .get(index)
        .context("resolved index is not on the palette")?;

    let output = ResolveOutput {
        color,
        index,
        entry,
        stats: resolver.stats(),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn run_render_command(
    registry: &EstimatorRegistry,
    config: &AppConfig,
    input: &Path,
    output: &Path,
    zoom: u8,
    scale: u32,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let map = MapColors::from_bytes(bytes)?;
    let palette = registry.palette(config.alpha_color);
    let factor = MapView::new(0, 0, zoom)?.world_factor(scale)?;

    let png = encode_scaled_png(&map, &palette, factor)?;
    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!("Rendered {} ({} bytes)", output.display(), png.len());
    Ok(())
}

fn run_convert_command(
    registry: &EstimatorRegistry,
    config: &AppConfig,
    input: &Path,
    output: &Path,
    exact: bool,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let image = decode_png(&bytes)?;

    let mut converter = MapConverter::from_config(registry, config);
    if exact {
        converter = MapConverter::new(converter.resolver().clone(), Conversion::Exact);
    }
    let map = converter.convert_image(&image)?;

    std::fs::write(output, map.as_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        stats = ?converter.resolver().stats(),
        "Converted image"
    );
    eprintln!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}
