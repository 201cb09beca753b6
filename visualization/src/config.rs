//! Configuration for surface plot rendering
//!
//! All options carry defaults, so a configuration document only needs the
//! fields it changes. Loaded from JSON through serde.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use isoplot_core::{ColorError, ColorRamp, ProjectionParams, Rgb};

use crate::scene::BlendMode;

/// Errors associated with surface configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for surface plot rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Canvas width in pixels
    pub width: f64,

    /// Canvas height in pixels
    pub height: f64,

    /// Empty border kept around the plot
    pub margin: f64,

    /// Pixel height of the largest sample when viewed side-on
    pub vertical_scale: f64,

    /// Color ramp, low values first
    pub colors: ColorRamp,

    /// Tile edge curvature, 0 for straight edges
    pub handle_ratio: f64,

    /// Draw base-plane gridlines
    pub show_grid: bool,

    /// Emit hover targets and the hovered sample marker
    pub show_points: bool,

    /// Draw axis labels
    pub show_labels: bool,

    /// Draw the corner gradient overlay on each tile
    pub gradient_overlay: bool,

    pub grid_color: Rgb,

    pub grid_stroke_width: f64,

    /// Hover target radius, defaults to twice the grid stroke width
    pub point_radius: Option<f64>,

    /// Blend mode for the gradient overlay layer
    pub overlay_blend: BlendMode,

    /// Column labels, by column index
    pub x_labels: Vec<String>,

    /// Row labels, by row index
    pub y_labels: Vec<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
            vertical_scale: 100.0,
            colors: ColorRamp::new(vec![
                Rgb::new(0x2c, 0x7b, 0xb6),
                Rgb::new(0xab, 0xd9, 0xe9),
                Rgb::new(0xff, 0xff, 0xbf),
                Rgb::new(0xfd, 0xae, 0x61),
                Rgb::new(0xd7, 0x19, 0x1c),
            ]),
            handle_ratio: 0.3,
            show_grid: true,
            show_points: true,
            show_labels: true,
            gradient_overlay: true,
            grid_color: Rgb::new(0x88, 0x88, 0x88),
            grid_stroke_width: 1.0,
            point_radius: None,
            overlay_blend: BlendMode::Multiply,
            x_labels: Vec::new(),
            y_labels: Vec::new(),
        }
    }
}

impl SurfaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Replace the color ramp with parsed hex stops
    pub fn with_hex_colors<S: AsRef<str>>(mut self, colors: &[S]) -> Result<Self, ConfigError> {
        self.colors = ColorRamp::from_hex(colors)?;
        Ok(self)
    }

    /// Check option ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::Invalid("color ramp needs at least one color".into()));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let non_negative = [
            ("margin", self.margin),
            ("vertical_scale", self.vertical_scale),
            ("grid_stroke_width", self.grid_stroke_width),
            ("point_radius", self.point_radius.unwrap_or(0.0)),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")));
        }

        let room = self.height - 2.0 * self.margin;
        if self.vertical_scale > room {
            return Err(ConfigError::Invalid(format!(
                "vertical_scale {} exceeds the {} px between the vertical margins",
                self.vertical_scale, room
            )));
        }

        if !(0.0..=1.0).contains(&self.handle_ratio) {
            return Err(ConfigError::Invalid(format!(
                "handle_ratio must be within [0, 1], got {}",
                self.handle_ratio
            )));
        }

        Ok(())
    }

    /// Canvas sizing handed to the projector
    pub fn projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            width: self.width,
            height: self.height,
            margin: self.margin,
            vertical_scale: self.vertical_scale,
            border: 0.0,
        }
    }

    pub fn point_radius(&self) -> f64 {
        self.point_radius.unwrap_or(2.0 * self.grid_stroke_width)
    }

    /// Label for column `x`, falling back to the index
    pub fn x_label(&self, x: usize) -> String {
        self.x_labels.get(x).cloned().unwrap_or_else(|| x.to_string())
    }

    /// Label for row `y`, falling back to the index
    pub fn y_label(&self, y: usize) -> String {
        self.y_labels.get(y).cloned().unwrap_or_else(|| y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = SurfaceConfig::from_json_str(
            r##"{ "width": 800, "colors": ["#000", "#ffffff"], "overlay_blend": "screen" }"##,
        )
        .unwrap();

        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 400.0);
        assert_eq!(config.colors.len(), 2);
        assert_eq!(config.overlay_blend, BlendMode::Screen);
        assert_eq!(config.point_radius(), 2.0);
    }

    #[test]
    fn test_invalid_documents_are_rejected() {
        assert!(matches!(
            SurfaceConfig::from_json_str(r#"{ "colors": [] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json_str(r#"{ "handle_ratio": 1.5 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json_str(r#"{ "margin": -1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json_str(r#"{ "vertical_scale": 500 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(SurfaceConfig::from_json_str(r#"{ "vertical_scale": 360 }"#).is_ok());
        assert!(matches!(
            SurfaceConfig::from_json_str(r#"{ "colors": ["teal"] }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_hex_color_override() {
        let config = SurfaceConfig::default().with_hex_colors(&["#102030"]).unwrap();
        assert_eq!(config.colors.stops(), &[Rgb::new(0x10, 0x20, 0x30)]);

        assert!(matches!(
            SurfaceConfig::default().with_hex_colors(&["nope"]),
            Err(ConfigError::Color(_))
        ));
    }

    #[test]
    fn test_labels_fall_back_to_indices() {
        let config = SurfaceConfig {
            x_labels: vec!["Jan".into(), "Feb".into()],
            ..Default::default()
        };
        assert_eq!(config.x_label(1), "Feb");
        assert_eq!(config.x_label(2), "2");
        assert_eq!(config.y_label(0), "0");
    }
}
