//! Render a surface plot document to SVG
//!
//! Reads a JSON document of the form
//! `{ "grid": [[...]], "config": {...}, "tilt": 0.8, "azimuth": 0.1, "hover": {"x": 1, "y": 2} }`
//! where everything but `grid` is optional, and writes the SVG to a file or
//! stdout. Set `RUST_LOG=debug` for per-render diagnostics.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use isoplot_core::{ColorError, GridIndex, RenderState, Rgb, SampleGrid};
use isoplot_visualization::{scene_to_svg, ConfigError, SurfaceConfig, SurfaceView, SvgExportConfig, ViewError};

#[derive(Debug, Error)]
enum RenderError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("Invalid plot document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Render an isometric surface plot to SVG
#[derive(Debug, Parser)]
#[command(name = "isoplot-render", version, about)]
struct Args {
    /// JSON plot document
    input: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tilt in radians, overrides the document
    #[arg(long, allow_negative_numbers = true)]
    tilt: Option<f64>,

    /// Azimuth in radians, overrides the document
    #[arg(long, allow_negative_numbers = true)]
    azimuth: Option<f64>,

    /// Comma-separated hex color ramp, overrides the document
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// Decimal places for coordinates
    #[arg(long, default_value_t = 2)]
    precision: u8,

    /// Background color
    #[arg(long)]
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlotDocument {
    grid: SampleGrid,
    #[serde(default)]
    config: SurfaceConfig,
    #[serde(default)]
    tilt: Option<f64>,
    #[serde(default)]
    azimuth: Option<f64>,
    #[serde(default)]
    hover: Option<GridIndex>,
}

fn run(args: Args) -> Result<(), RenderError> {
    let source = fs::read_to_string(&args.input).map_err(|source| RenderError::Read {
        path: args.input.clone(),
        source,
    })?;
    let document: PlotDocument = serde_json::from_str(&source)?;

    let config = match &args.colors {
        Some(colors) => document.config.with_hex_colors(colors.as_slice())?,
        None => document.config,
    };

    let defaults = RenderState::default();
    let state = RenderState::new(
        args.tilt.or(document.tilt).unwrap_or(defaults.tilt),
        args.azimuth.or(document.azimuth).unwrap_or(defaults.azimuth),
    )
    .clamped();

    let view = SurfaceView::new(document.grid, config)?;
    let scene = view.render(state, document.hover);

    let mut export = SvgExportConfig::default().with_precision(args.precision);
    if let Some(background) = &args.background {
        export = export.with_background(Rgb::from_hex(background)?);
    }
    let svg = scene_to_svg(&scene, &export);

    info!(
        "Rendered {}x{} grid ({} tiles) at tilt={:.3} azimuth={:.3}",
        view.grid().width(),
        view.grid().height(),
        view.faces().len(),
        state.tilt,
        state.azimuth
    );

    match &args.output {
        Some(path) => fs::write(path, svg)?,
        None => io::stdout().lock().write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(error) = run(Args::parse()) {
        log::error!("{error}");
        eprintln!("isoplot-render: {error}");
        std::process::exit(1);
    }
}
