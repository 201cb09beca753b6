//! Corner-anchored radial gradient overlays
//!
//! Every tile carries four translucent radial gradients, one centered on
//! each projected corner and reaching exactly to the tile centroid. Stop
//! colors blend from the corner's own sample toward the tile average, so
//! adjacent tiles meet in a heat-map-like wash instead of flat facets.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::{ColorRamp, Rgb};
use crate::faces::TileIndex;
use crate::grid::ValueExtent;
use crate::mesh::TileMesh;

/// Fraction of each gradient's radius over which the corner value fades
/// into the tile average
pub const RADIAL_RADIUS: f64 = 1.0;

/// Corner draw order for even `(x + y)` tiles
const EVEN_ORDER: [usize; 4] = [0, 1, 2, 3];

/// Corner draw order for odd `(x + y)` tiles
const ODD_ORDER: [usize; 4] = [2, 3, 0, 1];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the radius, `[0, 1]`
    pub offset: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Radial gradient anchored at one tile corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerGradient {
    /// Index into the tile's cyclic corner order
    pub corner: usize,
    pub center: DVec2,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

/// The four corner gradients of a tile, in draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientOverlay {
    pub tile: TileIndex,
    pub gradients: Vec<CornerGradient>,
}

impl GradientOverlay {
    /// Build the overlay for `mesh`. An empty ramp yields no gradients.
    pub fn build(mesh: &TileMesh, ramp: &ColorRamp, extent: &ValueExtent) -> Self {
        if ramp.is_empty() {
            return Self {
                tile: mesh.tile,
                gradients: Vec::new(),
            };
        }

        let centroid = mesh.centroid();
        let gradients = corner_order(mesh.tile)
            .iter()
            .map(|&corner| {
                let center = mesh.corners[corner];
                CornerGradient {
                    corner,
                    center,
                    radius: center.distance(centroid),
                    stops: gradient_stops(mesh.values[corner], mesh.average, ramp, extent),
                }
            })
            .collect();

        Self {
            tile: mesh.tile,
            gradients,
        }
    }
}

/// Draw order of the four corner gradients; alternates by checkerboard parity
#[inline]
pub fn corner_order(tile: TileIndex) -> [usize; 4] {
    if tile.is_even() {
        EVEN_ORDER
    } else {
        ODD_ORDER
    }
}

/// `N + 1` stops blending `corner_value` toward `average`, fading from
/// opaque to transparent, where `N` is the number of ramp colors.
pub fn gradient_stops(
    corner_value: f64,
    average: f64,
    ramp: &ColorRamp,
    extent: &ValueExtent,
) -> Vec<GradientStop> {
    let n = ramp.len();
    if n == 0 {
        return Vec::new();
    }
    let count = n as f64;

    (0..=n)
        .map(|j| {
            let remaining = (n - j) as f64 / count;
            let own_weight = RADIAL_RADIUS * remaining + (1.0 - RADIAL_RADIUS);
            let value = own_weight * corner_value + (1.0 - own_weight) * average;
            GradientStop {
                offset: j as f64 / count,
                color: ramp.sample(extent.normalize(value)),
                opacity: remaining,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::extract_faces;
    use crate::grid::SampleGrid;
    use crate::mesh::build_meshes;
    use crate::projection::{ProjectionContext, ProjectionParams, RenderState};
    use approx::assert_relative_eq;

    fn ramp() -> ColorRamp {
        ColorRamp::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap()
    }

    #[test]
    fn test_stops_fade_from_corner_to_average() {
        let extent = ValueExtent { max: 10.0, min: 0.0 };
        let stops = gradient_stops(10.0, 4.0, &ramp(), &extent);

        assert_eq!(stops.len(), 4);
        assert_relative_eq!(stops[0].offset, 0.0);
        assert_relative_eq!(stops[3].offset, 1.0);
        assert_relative_eq!(stops[0].opacity, 1.0);
        assert_relative_eq!(stops[1].opacity, 2.0 / 3.0);
        assert_relative_eq!(stops[3].opacity, 0.0);

        // First stop is the corner itself, last stop the tile average.
        assert_eq!(stops[0].color, ramp().sample(1.0));
        assert_eq!(stops[3].color, ramp().sample(0.4));
        // Stop 1 sits a third of the way toward the average: 10 - 6/3 = 8.
        assert_eq!(stops[1].color, ramp().sample(0.8));
    }

    #[test]
    fn test_empty_ramp_has_no_stops() {
        let extent = ValueExtent::default();
        assert!(gradient_stops(1.0, 1.0, &ColorRamp::default(), &extent).is_empty());
    }

    #[test]
    fn test_overlay_geometry_and_parity_order() {
        let grid = SampleGrid::from_values(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let extent = grid.extent();
        let ctx = ProjectionContext::new(
            ProjectionParams::default(),
            RenderState::default(),
            grid.dimensions(),
            extent,
        );
        let meshes = build_meshes(&grid, &ctx, &ramp(), 0.3);
        assert_eq!(
            meshes.iter().map(|m| m.tile).collect::<Vec<_>>(),
            extract_faces(&grid)
        );

        for mesh in &meshes {
            let overlay = GradientOverlay::build(mesh, &ramp(), &extent);
            let order: Vec<usize> = overlay.gradients.iter().map(|g| g.corner).collect();
            assert_eq!(order, corner_order(mesh.tile).to_vec());

            for gradient in &overlay.gradients {
                assert_eq!(gradient.center, mesh.corners[gradient.corner]);
                assert_relative_eq!(gradient.radius, gradient.center.distance(mesh.centroid()));
                assert_eq!(gradient.stops.len(), ramp().len() + 1);
            }
        }

        // (0, 2) is even, (0, 1) is odd.
        assert_eq!(corner_order(TileIndex::new(0, 2)), [0, 1, 2, 3]);
        assert_eq!(corner_order(TileIndex::new(0, 1)), [2, 3, 0, 1]);
    }
}
