//! Geometry and color pipeline for isometric surface plots
//!
//! Turns a column-major grid of optional samples into draw-ordered tile
//! meshes with curved edges, base fill colors and corner gradient overlays:
//!
//! ```text
//! SampleGrid ─▶ faces ─▶ TileMesh (ProjectionContext, ColorRamp) ─▶ GradientOverlay
//! ```
//!
//! Every stage is a pure function of its inputs. Rotation arrives as an
//! explicit [`RenderState`] and all per-render derived scalars are held by a
//! single [`ProjectionContext`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod color;
pub mod faces;
pub mod gradient;
pub mod grid;
pub mod mesh;
pub mod projection;

pub use color::{interpolate, ColorError, ColorRamp, Rgb};
pub use faces::{extract_faces, faces, Faces, TileIndex};
pub use gradient::{corner_order, CornerGradient, GradientOverlay, GradientStop, RADIAL_RADIUS};
pub use grid::{GridError, GridIndex, SampleGrid, ValueExtent, EXTENT_EPSILON};
pub use mesh::{build_meshes, CubicSegment, TileMesh, TilePath};
pub use projection::{ProjectionContext, ProjectionParams, RenderState, AZIMUTH_RANGE, TILT_RANGE};
