//! Isometric surface view
//!
//! Assembles the scene for one render pass: base-plane gridlines, the
//! draw-ordered tiles with their clipped gradient overlays, axis labels and
//! sample hover targets. The value extent and face list are computed when
//! the grid is set and reused by every render.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;

use isoplot_core::{
    GradientOverlay, GridIndex, ProjectionContext, ProjectionParams, RenderState, SampleGrid, TileIndex, TileMesh,
    ValueExtent,
};

use crate::config::SurfaceConfig;
use crate::interaction::HitTarget;
use crate::scene::{BlendMode, Paint, RadialGradient, Scene, SceneElement, Style, TextAnchor};
use crate::view::ViewError;

/// Distance, in grid units, between the front edges and their labels
pub const LABEL_OFFSET: f64 = 0.6;

pub const LABEL_FONT_SIZE: f64 = 10.0;

/// Lift of the hovered value text above its marker, in pixels
const HOVER_TEXT_OFFSET: f64 = 8.0;

/// Surface plot of one sample grid
#[derive(Debug, Clone)]
pub struct SurfaceView {
    grid: SampleGrid,
    config: SurfaceConfig,
    extent: ValueExtent,
    faces: Vec<TileIndex>,
}

impl SurfaceView {
    pub fn new(grid: SampleGrid, config: SurfaceConfig) -> Result<Self, ViewError> {
        config.validate()?;
        let mut view = Self {
            grid: SampleGrid::default(),
            config,
            extent: ValueExtent::default(),
            faces: Vec::new(),
        };
        view.set_grid(grid);
        Ok(view)
    }

    /// Build the view straight from grid columns
    pub fn from_columns(columns: Vec<Vec<Option<f64>>>, config: SurfaceConfig) -> Result<Self, ViewError> {
        Self::new(SampleGrid::from_columns(columns)?, config)
    }

    /// Replace the grid and recompute extent and faces
    pub fn set_grid(&mut self, grid: SampleGrid) {
        self.extent = grid.extent();
        self.faces = isoplot_core::extract_faces(&grid);
        debug!(
            "Surface grid {}x{}: extent=({}, {}) faces={}",
            grid.width(),
            grid.height(),
            self.extent.max,
            self.extent.min,
            self.faces.len()
        );
        self.grid = grid;
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn extent(&self) -> ValueExtent {
        self.extent
    }

    /// Drawable tiles in draw order
    pub fn faces(&self) -> &[TileIndex] {
        &self.faces
    }

    /// Projection context for `state`, leaving room for the label ring
    pub fn projection(&self, state: RenderState) -> ProjectionContext {
        let params = ProjectionParams {
            border: if self.config.show_labels { LABEL_OFFSET } else { 0.0 },
            ..self.config.projection_params()
        };
        ProjectionContext::new(
            params,
            state,
            self.grid.dimensions(),
            self.extent,
        )
    }

    /// Hover hit circles for every present sample
    pub fn hit_targets(&self, state: RenderState) -> Vec<HitTarget> {
        let ctx = self.projection(state);
        self.targets(&ctx)
    }

    fn targets(&self, ctx: &ProjectionContext) -> Vec<HitTarget> {
        let radius = self.config.point_radius();
        self.grid
            .present_samples()
            .map(|(index, value)| HitTarget {
                index,
                center: ctx.project_index(index, value),
                radius,
            })
            .collect()
    }

    /// Render the full scene
    pub fn render(&self, state: RenderState, hover: Option<GridIndex>) -> Scene {
        let ctx = self.projection(state);
        let mut scene = Scene::new(self.config.width, self.config.height);

        if self.config.show_grid {
            self.push_gridlines(&mut scene, &ctx);
        }
        self.push_tiles(&mut scene, &ctx);
        if self.config.show_labels {
            self.push_labels(&mut scene, &ctx);
        }
        if self.config.show_points {
            self.push_points(&mut scene, &ctx, hover);
        }

        debug!(
            "Rendered scene: {} elements, {} gradients",
            scene.elements.len(),
            scene.gradients.len()
        );
        scene
    }

    fn push_gridlines(&self, scene: &mut Scene, ctx: &ProjectionContext) {
        if self.grid.is_empty() {
            return;
        }
        let last_column = (self.grid.width() - 1) as f64;
        let last_row = (self.grid.height() - 1) as f64;
        let color = self.config.grid_color;
        let width = self.config.grid_stroke_width;

        for x in 0..self.grid.width() {
            let x = x as f64;
            scene.push(SceneElement::Line {
                from: ctx.project(x, 0.0, 0.0),
                to: ctx.project(x, last_row, 0.0),
                color,
                width,
            });
        }
        for y in 0..self.grid.height() {
            let y = y as f64;
            scene.push(SceneElement::Line {
                from: ctx.project(0.0, y, 0.0),
                to: ctx.project(last_column, y, 0.0),
                color,
                width,
            });
        }
    }

    fn push_tiles(&self, scene: &mut Scene, ctx: &ProjectionContext) {
        let ramp = &self.config.colors;

        for &tile in &self.faces {
            let Some(mesh) = TileMesh::build(&self.grid, tile, ctx, ramp, self.config.handle_ratio) else {
                continue;
            };

            scene.push(SceneElement::Path {
                path: mesh.path,
                style: Style::filled(mesh.fill),
            });

            if !self.config.gradient_overlay {
                continue;
            }

            let overlay = GradientOverlay::build(&mesh, ramp, &self.extent);
            let children = overlay
                .gradients
                .into_iter()
                .map(|gradient| {
                    let id = format!("tile-{}-{}-c{}", tile.x, tile.y, gradient.corner);
                    let circle = SceneElement::Circle {
                        center: gradient.center,
                        radius: gradient.radius,
                        style: Style {
                            fill: Paint::Gradient(id.clone()),
                            fill_opacity: 1.0,
                            stroke: None,
                            stroke_width: 0.0,
                        },
                        target: None,
                    };
                    scene.gradients.push(RadialGradient {
                        id,
                        center: gradient.center,
                        radius: gradient.radius,
                        stops: gradient.stops,
                    });
                    circle
                })
                .collect::<Vec<_>>();

            if !children.is_empty() {
                scene.push(SceneElement::Group {
                    clip: Some(mesh.path),
                    blend: self.config.overlay_blend,
                    children,
                });
            }
        }
    }

    fn push_labels(&self, scene: &mut Scene, ctx: &ProjectionContext) {
        if self.grid.is_empty() {
            return;
        }
        let front_column = (self.grid.width() - 1) as f64 + LABEL_OFFSET;
        let text = |position, content| SceneElement::Text {
            position,
            content,
            anchor: TextAnchor::Middle,
            color: self.config.grid_color,
            size: LABEL_FONT_SIZE,
        };

        for x in 0..self.grid.width() {
            let position = ctx.project(x as f64, -LABEL_OFFSET, 0.0);
            scene.push(text(position, self.config.x_label(x)));
        }
        for y in 0..self.grid.height() {
            let position = ctx.project(front_column, y as f64, 0.0);
            scene.push(text(position, self.config.y_label(y)));
        }
    }

    fn push_points(&self, scene: &mut Scene, ctx: &ProjectionContext, hover: Option<GridIndex>) {
        for target in self.targets(ctx) {
            scene.push(SceneElement::Circle {
                center: target.center,
                radius: target.radius,
                style: Style::hidden(),
                target: Some(target.index),
            });
        }

        let Some((index, value)) = hover.and_then(|index| self.grid.sample_at(index).map(|v| (index, v))) else {
            return;
        };
        let center = ctx.project_index(index, value);
        let color = self.config.colors.sample(self.extent.normalize(value));

        scene.push(SceneElement::Group {
            clip: None,
            blend: BlendMode::Normal,
            children: vec![
                SceneElement::Circle {
                    center,
                    radius: self.config.point_radius(),
                    style: Style::filled(color)
                        .with_stroke(self.config.grid_color, self.config.grid_stroke_width),
                    target: None,
                },
                SceneElement::Text {
                    position: center - glam::DVec2::new(0.0, HOVER_TEXT_OFFSET),
                    content: value.to_string(),
                    anchor: TextAnchor::Middle,
                    color: self.config.grid_color,
                    size: LABEL_FONT_SIZE,
                },
            ],
        });
    }
}
