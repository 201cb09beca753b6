//! Sample grid and value extent
//!
//! A column-major grid of optional scalar samples. Missing samples are part
//! of the data model: they never raise, they only remove the tiles that
//! touch them.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed for the extent maximum; the maximum never drops below it.
pub const EXTENT_EPSILON: f64 = 1e-6;

/// Errors raised while building a grid at the input boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Jagged grid: column {column} has {found} rows, expected {expected}")]
    Jagged {
        column: usize,
        expected: usize,
        found: usize,
    },
}

/// Integer position of a sample in the grid
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: usize,
    pub y: usize,
}

impl GridIndex {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Rectangular, column-major grid of optional samples, indexed `[column][row]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<f64>>>", into = "Vec<Vec<Option<f64>>>")]
pub struct SampleGrid {
    columns: Vec<Vec<Option<f64>>>,
    rows: usize,
}

impl SampleGrid {
    /// Build a grid from its columns.
    ///
    /// Every column must have the same length. A grid with no columns, or
    /// with empty columns, is valid and simply produces no geometry.
    pub fn from_columns(columns: Vec<Vec<Option<f64>>>) -> Result<Self, GridError> {
        let rows = columns.first().map_or(0, Vec::len);

        if let Some((column, found)) = columns
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != rows)
        {
            return Err(GridError::Jagged {
                column,
                expected: rows,
                found,
            });
        }

        Ok(Self { columns, rows })
    }

    /// Build a fully populated grid from plain values
    pub fn from_values(columns: Vec<Vec<f64>>) -> Result<Self, GridError> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|column| column.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// Number of columns (`W`)
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (`H`)
    #[inline]
    pub fn height(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Sample at `(x, y)`. Out-of-range positions and non-finite values
    /// read as missing.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> Option<f64> {
        self.columns
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .flatten()
            .filter(|value| value.is_finite())
    }

    #[inline]
    pub fn sample_at(&self, index: GridIndex) -> Option<f64> {
        self.sample(index.x, index.y)
    }

    /// All present samples with their positions, column by column
    pub fn present_samples(&self) -> impl Iterator<Item = (GridIndex, f64)> + '_ {
        (0..self.width()).flat_map(move |x| {
            (0..self.height()).filter_map(move |y| {
                self.sample(x, y).map(|value| (GridIndex::new(x, y), value))
            })
        })
    }

    /// Value extent over the present samples
    pub fn extent(&self) -> ValueExtent {
        ValueExtent::from_samples(self.present_samples().map(|(_, value)| value))
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for SampleGrid {
    type Error = GridError;

    fn try_from(columns: Vec<Vec<Option<f64>>>) -> Result<Self, Self::Error> {
        Self::from_columns(columns)
    }
}

impl From<SampleGrid> for Vec<Vec<Option<f64>>> {
    fn from(grid: SampleGrid) -> Self {
        grid.columns
    }
}

/// `(max, min)` of a grid with asymmetric seeding.
///
/// `max` starts at [`EXTENT_EPSILON`] and `min` starts at zero, so an
/// all-positive grid always reports `min = 0` and an all-non-positive grid
/// reports `max = EXTENT_EPSILON`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueExtent {
    pub max: f64,
    pub min: f64,
}

impl Default for ValueExtent {
    fn default() -> Self {
        Self {
            max: EXTENT_EPSILON,
            min: 0.0,
        }
    }
}

impl ValueExtent {
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        samples
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(Self::default(), |extent, value| Self {
                max: extent.max.max(value),
                min: extent.min.min(value),
            })
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a value onto `[0, 1]` for color lookup.
    ///
    /// A zero or non-finite span maps everything to 0 (the first color stop).
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if !span.is_finite() || span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Normalized height used by the projector. Divides by `max` only, so
    /// negative samples fall below the base plane.
    #[inline]
    pub fn height(&self, value: f64) -> f64 {
        value / self.max
    }
}
