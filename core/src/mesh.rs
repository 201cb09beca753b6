//! Curved-edge tile meshes
//!
//! Each drawable tile becomes a closed path of four cubic Bezier segments
//! through its projected corners. Control points sit a fraction
//! `handle_ratio` along each edge in grid space, projected at the height of
//! the nearer endpoint, so edges leave and enter every corner level with it.
//! A ratio of 0 gives straight edges.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use glam::DVec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::{ColorRamp, Rgb};
use crate::faces::{faces, TileIndex};
use crate::grid::SampleGrid;
use crate::projection::ProjectionContext;

/// One cubic Bezier segment continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub control1: DVec2,
    pub control2: DVec2,
    pub end: DVec2,
}

/// Closed path: a start point followed by four cubic segments.
///
/// Usable as a fill, a stroke, or a clip region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePath {
    pub start: DVec2,
    pub segments: [CubicSegment; 4],
}

impl TilePath {
    /// The four on-curve points, starting with `start`
    pub fn vertices(&self) -> [DVec2; 4] {
        [
            self.start,
            self.segments[0].end,
            self.segments[1].end,
            self.segments[2].end,
        ]
    }
}

/// Geometry and base color of one tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMesh {
    pub tile: TileIndex,
    /// Corner samples in cyclic corner order
    pub values: [f64; 4],
    /// Projected corners in cyclic corner order
    pub corners: [DVec2; 4],
    pub path: TilePath,
    pub average: f64,
    pub fill: Rgb,
}

impl TileMesh {
    /// Build the mesh for `tile`, or `None` if any corner sample is missing
    pub fn build(
        grid: &SampleGrid,
        tile: TileIndex,
        ctx: &ProjectionContext,
        ramp: &ColorRamp,
        handle_ratio: f64,
    ) -> Option<Self> {
        let values = tile.corner_values(grid)?;
        let positions = tile
            .corners()
            .map(|corner| DVec2::new(corner.x as f64, corner.y as f64));

        let corners = [0, 1, 2, 3].map(|i| ctx.project(positions[i].x, positions[i].y, values[i]));

        let segments = [0, 1, 2, 3].map(|i| {
            let j = (i + 1) % 4;
            let (from, to) = (positions[i], positions[j]);
            let near_from = from + (to - from) * handle_ratio;
            let near_to = to + (from - to) * handle_ratio;
            CubicSegment {
                control1: ctx.project(near_from.x, near_from.y, values[i]),
                control2: ctx.project(near_to.x, near_to.y, values[j]),
                end: corners[j],
            }
        });

        let average = values.iter().sum::<f64>() / 4.0;
        let fill = ramp.sample(ctx.extent().normalize(average));

        trace!("Tile ({}, {}) average={:.4} fill={}", tile.x, tile.y, average, fill);

        Some(Self {
            tile,
            values,
            corners,
            path: TilePath {
                start: corners[0],
                segments,
            },
            average,
            fill,
        })
    }

    /// Mean of the four projected corners
    pub fn centroid(&self) -> DVec2 {
        self.corners.iter().copied().sum::<DVec2>() / 4.0
    }
}

/// Meshes for every drawable tile, in draw order
pub fn build_meshes(
    grid: &SampleGrid,
    ctx: &ProjectionContext,
    ramp: &ColorRamp,
    handle_ratio: f64,
) -> Vec<TileMesh> {
    let meshes: Vec<TileMesh> = faces(grid)
        .filter_map(|tile| TileMesh::build(grid, tile, ctx, ramp, handle_ratio))
        .collect();
    debug!("Built {} tile meshes for {}x{} grid", meshes.len(), grid.width(), grid.height());
    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionParams, RenderState};
    use approx::assert_relative_eq;

    fn setup(values: Vec<Vec<f64>>) -> (SampleGrid, ProjectionContext, ColorRamp) {
        let grid = SampleGrid::from_values(values).unwrap();
        let ctx = ProjectionContext::new(
            ProjectionParams::default(),
            RenderState::default(),
            grid.dimensions(),
            grid.extent(),
        );
        let ramp = ColorRamp::from_hex(&["#000000", "#ffffff"]).unwrap();
        (grid, ctx, ramp)
    }

    #[test]
    fn test_corners_follow_cyclic_order() {
        let (grid, ctx, ramp) = setup(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let mesh = TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.3).unwrap();

        assert_eq!(mesh.values, [2.0, 1.0, 3.0, 4.0]);
        assert_eq!(mesh.corners[0], ctx.project(0.0, 1.0, 2.0));
        assert_eq!(mesh.corners[2], ctx.project(1.0, 0.0, 3.0));
        assert_eq!(mesh.path.vertices(), mesh.corners);
        assert_eq!(mesh.path.segments[3].end, mesh.path.start);
    }

    #[test]
    fn test_zero_handle_ratio_gives_straight_edges() {
        let (grid, ctx, ramp) = setup(vec![vec![1.0, 5.0], vec![2.0, 0.5]]);
        let mesh = TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.0).unwrap();

        for (i, segment) in mesh.path.segments.iter().enumerate() {
            assert_eq!(segment.control1, mesh.corners[i]);
            assert_eq!(segment.control2, mesh.corners[(i + 1) % 4]);
        }
    }

    #[test]
    fn test_control_points_hold_endpoint_heights() {
        let (grid, ctx, ramp) = setup(vec![vec![1.0, 5.0], vec![2.0, 0.5]]);
        let mesh = TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.25).unwrap();

        // Edge p1 -> p2 runs from (0,1) to (0,0).
        let segment = mesh.path.segments[0];
        assert_eq!(segment.control1, ctx.project(0.0, 0.75, 5.0));
        assert_eq!(segment.control2, ctx.project(0.0, 0.25, 1.0));
    }

    #[test]
    fn test_fill_uses_normalized_average() {
        let (grid, ctx, ramp) = setup(vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
        let mesh = TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.3).unwrap();

        // Extent is (8, 0); average 5 normalizes to 0.625.
        assert_relative_eq!(mesh.average, 5.0);
        assert_eq!(mesh.fill, ramp.sample(0.625));
        assert_eq!(mesh.fill, Rgb::new(159, 159, 159));
    }

    #[test]
    fn test_constant_grid_has_deterministic_fill() {
        let (grid, ctx, ramp) = setup(vec![vec![3.0; 3]; 3]);
        let meshes = build_meshes(&grid, &ctx, &ramp, 0.3);
        assert_eq!(meshes.len(), 4);
        assert!(meshes.iter().all(|m| m.fill == meshes[0].fill));
    }

    #[test]
    fn test_centroid_is_mean_of_corners() {
        let (grid, ctx, ramp) = setup(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let mesh = TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.3).unwrap();
        let expected = (mesh.corners[0] + mesh.corners[1] + mesh.corners[2] + mesh.corners[3]) / 4.0;
        assert_relative_eq!(mesh.centroid().x, expected.x);
        assert_relative_eq!(mesh.centroid().y, expected.y);
    }

    #[test]
    fn test_missing_corner_yields_no_mesh() {
        let grid = SampleGrid::from_columns(vec![vec![Some(1.0), None], vec![Some(1.0), Some(1.0)]]).unwrap();
        let ctx = ProjectionContext::new(
            ProjectionParams::default(),
            RenderState::default(),
            grid.dimensions(),
            grid.extent(),
        );
        let ramp = ColorRamp::default();
        assert!(TileMesh::build(&grid, TileIndex::new(0, 1), &ctx, &ramp, 0.3).is_none());
        assert!(build_meshes(&grid, &ctx, &ramp, 0.3).is_empty());
    }
}
