//! Views that turn sample grids into scenes
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use isoplot_core::GridError;

use crate::config::ConfigError;

pub mod surface_view;

pub use surface_view::{SurfaceView, LABEL_FONT_SIZE, LABEL_OFFSET};

/// Errors associated with building a view
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
