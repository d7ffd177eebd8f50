//! Shape validation for contour inputs.
//!
//! `z` must be a 2D grid of `(rows, cols)` samples. `x` and `y` are either
//! axis vectors (`len(x) == cols`, `len(y) == rows`) or coordinate matrices
//! with exactly the shape of `z`, and both must use the same form. Rules are
//! checked in a fixed order and the first violation is reported.

use isoplot_builtins::{format_shape, Tensor};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Input z must be a 2D array.")]
    ZNotTwoDimensional { ndims: usize },

    #[error("Inputs x and y must be 1D or 2D.")]
    CoordinateRank { x_ndims: usize, y_ndims: usize },

    #[error("Number of dimensions of x and y should match.")]
    CoordinateRankMismatch { x_ndims: usize, y_ndims: usize },

    #[error("Length of x must be number of columns in z.")]
    XLength { found: usize, expected: usize },

    #[error("Length of y must be number of rows in z.")]
    YLength { found: usize, expected: usize },

    #[error(
        "Shape of x does not match that of z: found {} instead of {}.",
        format_shape(.found),
        format_shape(.expected)
    )]
    XShape {
        found: Vec<usize>,
        expected: Vec<usize>,
    },

    #[error(
        "Shape of y does not match that of z: found {} instead of {}.",
        format_shape(.found),
        format_shape(.expected)
    )]
    YShape {
        found: Vec<usize>,
        expected: Vec<usize>,
    },
}

/// Form of the coordinates that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    /// 1D axis vectors.
    Vector,
    /// 2D coordinate matrices shaped like `z`.
    Grid,
}

/// Grid dimensions confirmed by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
    pub coordinates: CoordinateKind,
}

/// Check that `z` is 2D and return its `(rows, cols)`.
pub fn validate_grid(z: &Tensor) -> Result<(usize, usize), ShapeError> {
    grid_dims(z.shape())
}

fn grid_dims(z: &[usize]) -> Result<(usize, usize), ShapeError> {
    match z {
        [rows, cols] => Ok((*rows, *cols)),
        other => Err(ShapeError::ZNotTwoDimensional {
            ndims: other.len(),
        }),
    }
}

/// Validate an `(x, y, z)` triple before it is handed to a contour routine.
pub fn validate(x: &Tensor, y: &Tensor, z: &Tensor) -> Result<GridShape, ShapeError> {
    validate_shapes(x.shape(), y.shape(), z.shape())
}

/// Same rules as [`validate`], applied to bare shapes. Nothing is allocated,
/// so arbitrarily large shapes can be checked.
pub fn validate_shapes(x: &[usize], y: &[usize], z: &[usize]) -> Result<GridShape, ShapeError> {
    let (rows, cols) = grid_dims(z)?;

    let x_ndims = x.len();
    let y_ndims = y.len();
    let rank_ok = |n: usize| n == 1 || n == 2;
    if !rank_ok(x_ndims) || !rank_ok(y_ndims) {
        return Err(ShapeError::CoordinateRank { x_ndims, y_ndims });
    }
    if x_ndims != y_ndims {
        return Err(ShapeError::CoordinateRankMismatch { x_ndims, y_ndims });
    }

    if let ([x_len], [y_len]) = (x, y) {
        if *x_len != cols {
            return Err(ShapeError::XLength {
                found: *x_len,
                expected: cols,
            });
        }
        if *y_len != rows {
            return Err(ShapeError::YLength {
                found: *y_len,
                expected: rows,
            });
        }
        return Ok(GridShape {
            rows,
            cols,
            coordinates: CoordinateKind::Vector,
        });
    }

    if x != z {
        return Err(ShapeError::XShape {
            found: x.to_vec(),
            expected: z.to_vec(),
        });
    }
    if y != z {
        return Err(ShapeError::YShape {
            found: y.to_vec(),
            expected: z.to_vec(),
        });
    }
    Ok(GridShape {
        rows,
        cols,
        coordinates: CoordinateKind::Grid,
    })
}
