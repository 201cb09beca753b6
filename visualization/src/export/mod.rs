//! Scene export backends
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod svg;

pub use svg::{scene_to_svg, SvgExportConfig};
