//! Isometric projection of grid coordinates onto the drawing surface
//!
//! Grid positions are mapped into an isometric basis, spun by the azimuth,
//! foreshortened by the tilt and lifted by the normalized sample height.
//! Everything that does not depend on the individual cell (rotation terms,
//! step lengths, canvas origin) is computed once per render pass in
//! [`ProjectionContext::new`] and reused for every projected point.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::DVec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::grid::{GridIndex, ValueExtent};

/// Valid tilt range (elevation), radians
pub const TILT_RANGE: (f64, f64) = (0.0, FRAC_PI_2);

/// Valid azimuth range (in-plane spin), radians
pub const AZIMUTH_RANGE: (f64, f64) = (-FRAC_PI_4, FRAC_PI_4);

/// Spans below this do not constrain the scale fit
const SPAN_EPSILON: f64 = 1e-12;

/// Rotation of the view, owned by the caller and passed into every render
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Elevation / foreshortening, `[0, π/2]`
    pub tilt: f64,
    /// In-plane rotation, `[-π/4, π/4]`
    pub azimuth: f64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            tilt: FRAC_PI_4,
            azimuth: 0.0,
        }
    }
}

impl RenderState {
    pub fn new(tilt: f64, azimuth: f64) -> Self {
        Self { tilt, azimuth }
    }

    /// Copy with both angles clamped into their valid ranges
    pub fn clamped(self) -> Self {
        Self {
            tilt: self.tilt.clamp(TILT_RANGE.0, TILT_RANGE.1),
            azimuth: self.azimuth.clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1),
        }
    }
}

/// Canvas sizing for the projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Pixel height of a sample whose value equals the extent maximum, at tilt 0
    pub vertical_scale: f64,
    /// Room, in grid units, reserved around the grid when fitting the scale
    #[serde(default)]
    pub border: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
            vertical_scale: 100.0,
            border: 0.0,
        }
    }
}

/// Derived projection scalars for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionContext {
    params: ProjectionParams,
    extent: ValueExtent,
    rotation: DVec2,
    step: DVec2,
    origin: DVec2,
    lift: f64,
    scale: f64,
}

impl ProjectionContext {
    /// Compute step lengths and origin so the rotated grid fits the canvas.
    ///
    /// `dimensions` is `(columns, rows)` of the grid being drawn.
    pub fn new(
        params: ProjectionParams,
        state: RenderState,
        dimensions: (usize, usize),
        extent: ValueExtent,
    ) -> Self {
        let rotation = DVec2::from_angle(state.azimuth);
        let half_tilt = state.tilt / 2.0;
        let unit = DVec2::new(half_tilt.cos(), half_tilt.sin());

        // The lift may never exceed the vertical room inside the margins.
        let room = (params.height - 2.0 * params.margin).max(0.0);
        let lift = state.tilt.cos() * params.vertical_scale;
        if lift > room {
            warn!(
                "Vertical scale {} exceeds the {} px inside the margins; clamping lift",
                params.vertical_scale, room
            );
        }
        let lift = lift.min(room);

        let border = params.border.max(0.0);
        let last_column = dimensions.0.saturating_sub(1) as f64 + border;
        let last_row = dimensions.1.saturating_sub(1) as f64 + border;
        let corners = [
            (-border, -border),
            (last_column, -border),
            (-border, last_row),
            (last_column, last_row),
        ];
        let (low, high) = corners.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(low, high), &(column, row)| {
                let p = rotate(rotation, column, row);
                (low.min(p), high.max(p))
            },
        );
        let box_size = high - low;

        let available = DVec2::new(
            params.width - 2.0 * params.margin,
            params.height - 2.0 * params.margin - lift,
        );
        let unscaled = box_size * unit;

        let fits = [
            (unscaled.x > SPAN_EPSILON).then(|| available.x / unscaled.x),
            (unscaled.y > SPAN_EPSILON).then(|| available.y / unscaled.y),
        ];
        let scale = fits
            .into_iter()
            .flatten()
            .reduce(f64::min)
            .unwrap_or(1.0);
        if scale < 0.0 {
            warn!(
                "Canvas {}x{} leaves no room inside margin {}; collapsing projection",
                params.width, params.height, params.margin
            );
        }
        let scale = scale.max(0.0);
        let step = unit * scale;

        let scaled = box_size * step;
        let origin = DVec2::new(
            (available.x - scaled.x) / 2.0 - low.x * step.x,
            params.margin + lift + (available.y - scaled.y) / 2.0 - low.y * step.y,
        );

        debug!(
            "Projection context: tilt={:.3} azimuth={:.3} scale={:.3} step=({:.3}, {:.3})",
            state.tilt, state.azimuth, scale, step.x, step.y
        );

        Self {
            params,
            extent,
            rotation,
            step,
            origin,
            lift,
            scale,
        }
    }

    /// Project a (possibly fractional) grid position at the given sample value
    #[inline]
    pub fn project(&self, column: f64, row: f64, value: f64) -> DVec2 {
        let rotated = rotate(self.rotation, column, row);
        let height = self.extent.height(value);
        DVec2::new(
            self.origin.x + self.params.margin + rotated.x * self.step.x,
            self.origin.y + rotated.y * self.step.y - self.lift * height,
        )
    }

    #[inline]
    pub fn project_index(&self, index: GridIndex, value: f64) -> DVec2 {
        self.project(index.x as f64, index.y as f64, value)
    }

    /// Per-axis step lengths after the scale fit
    #[inline]
    pub fn step(&self) -> DVec2 {
        self.step
    }

    /// Uniform factor applied to the unit step lengths
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn extent(&self) -> ValueExtent {
        self.extent
    }

    #[inline]
    pub fn params(&self) -> ProjectionParams {
        self.params
    }
}

/// Isometric basis followed by the azimuth rotation
#[inline]
fn rotate(rotation: DVec2, column: f64, row: f64) -> DVec2 {
    rotation.rotate(DVec2::new(column + row, column - row))
}
