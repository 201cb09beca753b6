//! Visible face enumeration
//!
//! Enumerates the unit quadrilaterals of a sample grid whose four corners
//! are all present, in back-to-front draw order.
//!
//! # Draw order
//! Tiles are produced column ascending and, within a column, row
//! descending. Later tiles are nearer the viewer and are drawn on top of
//! earlier ones (painter's algorithm). Downstream builders consume this
//! order directly; there is no separate sort and no depth buffer, so the
//! order is a hard contract.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::grid::{GridIndex, SampleGrid};

/// A tile, identified by its upper-left grid coordinate
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: usize,
    pub y: usize,
}

impl TileIndex {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Corner positions in cyclic order `(x,y), (x,y-1), (x+1,y-1), (x+1,y)`.
    ///
    /// `y` must be at least 1.
    #[inline]
    pub fn corners(&self) -> [GridIndex; 4] {
        let (x, y) = (self.x, self.y);
        [
            GridIndex::new(x, y),
            GridIndex::new(x, y - 1),
            GridIndex::new(x + 1, y - 1),
            GridIndex::new(x + 1, y),
        ]
    }

    /// Checkerboard parity of the tile
    #[inline]
    pub fn is_even(&self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Corner sample values in cyclic order, if all four are present
    pub fn corner_values(&self, grid: &SampleGrid) -> Option<[f64; 4]> {
        if self.y == 0 {
            return None;
        }
        let [a, b, c, d] = self.corners();
        Some([
            grid.sample_at(a)?,
            grid.sample_at(b)?,
            grid.sample_at(c)?,
            grid.sample_at(d)?,
        ])
    }
}

/// Lazy iterator over the drawable tiles of a grid, in draw order.
///
/// Restart by calling [`faces`] again.
#[derive(Debug, Clone)]
pub struct Faces<'a> {
    grid: &'a SampleGrid,
    column: usize,
    row: usize,
}

impl<'a> Iterator for Faces<'a> {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.grid.width().saturating_sub(1);
        let top_row = self.grid.height().saturating_sub(1);

        while self.column < columns {
            // Row 0 has no row below it and can never be an upper-left corner.
            while self.row >= 1 {
                let tile = TileIndex::new(self.column, self.row);
                self.row -= 1;
                if tile.corner_values(self.grid).is_some() {
                    return Some(tile);
                }
            }
            self.column += 1;
            self.row = top_row;
        }

        None
    }
}

/// Drawable tiles of `grid` in back-to-front order
pub fn faces(grid: &SampleGrid) -> Faces<'_> {
    Faces {
        grid,
        column: 0,
        row: grid.height().saturating_sub(1),
    }
}

/// Eagerly collected [`faces`]
pub fn extract_faces(grid: &SampleGrid) -> Vec<TileIndex> {
    faces(grid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    fn build(columns: Vec<Vec<Option<f64>>>) -> SampleGrid {
        SampleGrid::from_columns(columns).unwrap()
    }

    #[test]
    fn test_two_by_two_grid_yields_one_face() {
        let grid = SampleGrid::from_values(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let tiles = extract_faces(&grid);
        assert_eq!(tiles, vec![TileIndex::new(0, 1)]);
        assert_eq!(tiles[0].corner_values(&grid), Some([2.0, 1.0, 3.0, 4.0]));
    }

    #[test]
    fn test_missing_sample_blocks_tile() {
        let grid = build(vec![vec![Some(1.0), None], vec![Some(3.0), Some(4.0)]]);
        assert!(extract_faces(&grid).is_empty());
    }

    #[test]
    fn test_degenerate_grids_have_no_faces() {
        assert!(extract_faces(&SampleGrid::default()).is_empty());
        assert!(extract_faces(&SampleGrid::from_values(vec![vec![1.0]]).unwrap()).is_empty());
        assert!(extract_faces(&SampleGrid::from_values(vec![vec![1.0, 2.0, 3.0]]).unwrap()).is_empty());
        assert!(extract_faces(&SampleGrid::from_values(vec![vec![1.0], vec![2.0]]).unwrap()).is_empty());
    }

    #[test]
    fn test_draw_order_is_column_ascending_row_descending() {
        let values = (0..3).map(|x| (0..4).map(|y| (x * 4 + y) as f64).collect()).collect();
        let grid = SampleGrid::from_values(values).unwrap();
        let order: Vec<(usize, usize)> = faces(&grid).map(|t| (t.x, t.y)).collect();
        assert_eq!(
            order,
            vec![(0, 3), (0, 2), (0, 1), (1, 3), (1, 2), (1, 1)]
        );
    }

    #[test]
    fn test_hole_removes_only_adjacent_tiles() {
        let mut columns = vec![vec![Some(1.0); 3]; 3];
        columns[1][1] = None;
        let grid = build(columns);
        // The center sample touches all four tiles of a 3x3 grid.
        assert!(extract_faces(&grid).is_empty());

        let mut columns = vec![vec![Some(1.0); 3]; 3];
        columns[2][2] = None;
        let tiles = extract_faces(&build(columns));
        assert_eq!(
            tiles,
            vec![TileIndex::new(0, 2), TileIndex::new(0, 1), TileIndex::new(1, 1)]
        );
    }

    #[test]
    fn test_iterator_restarts() {
        let grid = SampleGrid::from_values(vec![vec![1.0; 3]; 3]).unwrap();
        let first: Vec<_> = faces(&grid).collect();
        let second: Vec<_> = faces(&grid).collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    quickcheck! {
        fn prop_faces_have_all_corners(cells: Vec<Option<u8>>, width: u8) -> TestResult {
            let width = width as usize % 6 + 1;
            if cells.len() < width {
                return TestResult::discard();
            }
            let height = cells.len() / width;
            let columns: Vec<Vec<Option<f64>>> = cells
                .chunks(height)
                .take(width)
                .map(|c| c.iter().map(|v| v.map(f64::from)).collect())
                .collect();
            let grid = SampleGrid::from_columns(columns).unwrap();
            let tiles = extract_faces(&grid);

            let valid = tiles.iter().all(|t| {
                t.corners().iter().all(|&corner| grid.sample_at(corner).is_some())
            });
            let ordered = tiles
                .windows(2)
                .all(|w| w[0].x < w[1].x || (w[0].x == w[1].x && w[0].y > w[1].y));
            TestResult::from_bool(valid && ordered)
        }
    }
}
