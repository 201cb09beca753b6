//! Backend-neutral vector scene graph
//!
//! The surface view emits paths, circles, lines, text and clipped groups in
//! draw order; export backends walk the list front to back.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use glam::DVec2;
use serde::{Deserialize, Serialize};

use isoplot_core::{GradientStop, GridIndex, Rgb, TilePath};

/// Color compositing mode for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    SoftLight,
    HardLight,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
        }
    }
}

/// Fill of a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    None,
    Solid(Rgb),
    /// Reference to a [`RadialGradient`] by id
    Gradient(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Paint,
    pub fill_opacity: f64,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
}

impl Style {
    pub fn filled(color: Rgb) -> Self {
        Self {
            fill: Paint::Solid(color),
            fill_opacity: 1.0,
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Invisible but still hit-testable
    pub fn hidden() -> Self {
        Self {
            fill: Paint::Solid(Rgb::BLACK),
            fill_opacity: 0.0,
            stroke: None,
            stroke_width: 0.0,
        }
    }

    pub fn with_stroke(mut self, color: Rgb, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub id: String,
    pub center: DVec2,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    Path {
        path: TilePath,
        style: Style,
    },
    Circle {
        center: DVec2,
        radius: f64,
        style: Style,
        /// Sample this circle reports when hovered
        target: Option<GridIndex>,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgb,
        width: f64,
    },
    Text {
        position: DVec2,
        content: String,
        anchor: TextAnchor,
        color: Rgb,
        size: f64,
    },
    Group {
        clip: Option<TilePath>,
        blend: BlendMode,
        children: Vec<SceneElement>,
    },
}

/// Draw-ordered scene for one render pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub gradients: Vec<RadialGradient>,
    pub elements: Vec<SceneElement>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn push(&mut self, element: SceneElement) {
        self.elements.push(element);
    }

    /// Depth-first walk over every element, groups included
    pub fn walk(&self) -> impl Iterator<Item = &SceneElement> {
        let mut stack: Vec<&SceneElement> = self.elements.iter().rev().collect();
        std::iter::from_fn(move || {
            let element = stack.pop()?;
            if let SceneElement::Group { children, .. } = element {
                stack.extend(children.iter().rev());
            }
            Some(element)
        })
    }
}
