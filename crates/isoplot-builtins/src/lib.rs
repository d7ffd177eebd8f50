//! Core array type shared by the isoplot crates.
//!
//! `Tensor` carries its shape explicitly so callers can reason about
//! dimensionality without inspecting the data buffer.

use std::fmt;

pub mod dates;
pub mod grid;
pub mod shape_rules;

pub use dates::{datetime_from_days, datetime_vector, days_since_epoch, parse_datetime};
pub use grid::{meshgrid, repeat_cols, repeat_rows};
pub use shape_rules::format_shape;

#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub data: Vec<f64>,
    pub shape: Vec<usize>, // Column-major layout
    pub rows: usize,       // Compatibility for 2D usage
    pub cols: usize,       // Compatibility for 2D usage
}

fn element_count_or_err(shape: &[usize]) -> Result<usize, String> {
    shape_rules::element_count(shape)
        .ok_or_else(|| format!("Tensor shape {} has too many elements", format_shape(shape)))
}

fn compat_dims(shape: &[usize]) -> (usize, usize) {
    match shape.len() {
        0 => (0, 0),
        1 => (1, shape[0]),
        _ => (shape[0], shape[1]),
    }
}

impl Tensor {
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, String> {
        let expected = element_count_or_err(&shape)?;
        if data.len() != expected {
            return Err(format!(
                "Tensor data length {} doesn't match shape {:?} ({} elements)",
                data.len(),
                shape,
                expected
            ));
        }
        let (rows, cols) = compat_dims(&shape);
        Ok(Tensor {
            data,
            shape,
            rows,
            cols,
        })
    }

    pub fn new_2d(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, String> {
        Self::new(data, vec![rows, cols])
    }

    /// Build a 2D tensor from row-major nested rows (the layout humans write).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, String> {
        let row_count = rows.len();
        let col_count = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != col_count) {
            return Err(format!(
                "row {idx} has {} elements, expected {col_count}",
                row.len()
            ));
        }
        let mut data = vec![0.0; row_count * col_count];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                data[r + c * row_count] = *value;
            }
        }
        Self::new_2d(data, row_count, col_count)
    }

    /// 1D tensor holding `values` in order.
    pub fn vector(values: Vec<f64>) -> Self {
        let len = values.len();
        Tensor {
            data: values,
            shape: vec![len],
            rows: 1,
            cols: len,
        }
    }

    /// `0, 1, ..., len - 1` as a 1D tensor.
    pub fn range(len: usize) -> Self {
        Self::vector((0..len).map(|i| i as f64).collect())
    }

    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: vec![value],
            shape: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    pub fn zeros(shape: Vec<usize>) -> Result<Self, String> {
        let size = element_count_or_err(&shape)?;
        let (rows, cols) = compat_dims(&shape);
        Ok(Tensor {
            data: vec![0.0; size],
            shape,
            rows,
            cols,
        })
    }

    pub fn zeros2(rows: usize, cols: usize) -> Result<Self, String> {
        Self::zeros(vec![rows, cols])
    }

    /// Fill a 2D tensor by evaluating `f(row, col)` for every cell.
    pub fn from_fn2(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = vec![0.0; rows * cols];
        for c in 0..cols {
            for r in 0..rows {
                data[r + c * rows] = f(r, c);
            }
        }
        Tensor {
            data,
            shape: vec![rows, cols],
            rows,
            cols,
        }
    }

    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get2(&self, row: usize, col: usize) -> Result<f64, String> {
        if self.ndims() != 2 {
            return Err(format!(
                "get2 requires a 2D tensor, found shape {}",
                format_shape(&self.shape)
            ));
        }
        let rows = self.rows;
        let cols = self.cols;
        if row >= rows || col >= cols {
            return Err(format!(
                "Index ({row}, {col}) out of bounds for {rows}x{cols} tensor"
            ));
        }
        // Column-major linearization: lin = row + col*rows
        Ok(self.data[row + col * rows])
    }

    /// Minimum and maximum over the finite entries, if any.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for &value in self.data.iter().filter(|v| v.is_finite()) {
            min_v = min_v.min(value);
            max_v = max_v.max(value);
        }
        if min_v.is_finite() && max_v.is_finite() {
            Some((min_v, max_v))
        } else {
            None
        }
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape.len() {
            0 | 1 => {
                // Treat as row vector for display
                write!(f, "[")?;
                for (i, v) in self.data.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            2 => {
                let rows = self.rows;
                let cols = self.cols;
                write!(f, "[")?;
                for r in 0..rows {
                    for c in 0..cols {
                        if c > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", self.data[r + c * rows])?;
                    }
                    if r + 1 < rows {
                        write!(f, "; ")?;
                    }
                }
                write!(f, "]")
            }
            _ => write!(f, "Tensor(shape={})", format_shape(&self.shape)),
        }
    }
}
