//! Sample grid carried by contour records.

use crate::core::BoundingBox;

/// How the coordinates of a [`ContourGrid`] are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCoordinates {
    /// `x` has one entry per column, `y` one per row.
    Vectors,
    /// `x` and `y` hold one entry per cell, column-major like `z`.
    Matrices,
}

/// Scalar field sampled on a rectangular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Column-major `rows x cols` samples.
    pub z: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
    pub coordinates: GridCoordinates,
}

impl ContourGrid {
    pub fn new(
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        rows: usize,
        cols: usize,
        coordinates: GridCoordinates,
    ) -> Result<Self, String> {
        let cells = rows * cols;
        if z.len() != cells {
            return Err(format!(
                "ContourGrid: z holds {} values, expected {cells} ({rows}x{cols})",
                z.len()
            ));
        }
        let (x_expected, y_expected) = match coordinates {
            GridCoordinates::Vectors => (cols, rows),
            GridCoordinates::Matrices => (cells, cells),
        };
        if x.len() != x_expected || y.len() != y_expected {
            return Err(format!(
                "ContourGrid: coordinate lengths ({}, {}) do not fit a {rows}x{cols} grid",
                x.len(),
                y.len()
            ));
        }
        Ok(Self {
            x,
            y,
            z,
            rows,
            cols,
            coordinates,
        })
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_axes(&self.x, &self.y)
    }

    /// Minimum and maximum of the finite samples.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let mut finite = self.z.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn estimated_memory_usage(&self) -> usize {
        (self.x.len() + self.y.len() + self.z.len()) * std::mem::size_of::<f64>()
    }
}
