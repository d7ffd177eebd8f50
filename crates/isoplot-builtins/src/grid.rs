//! Coordinate grid helpers (`meshgrid` and axis repetition).

use crate::shape_rules::format_shape;
use crate::Tensor;

fn vector_values<'a>(tensor: &'a Tensor, name: &str) -> Result<&'a [f64], String> {
    let is_vector = match tensor.shape.as_slice() {
        [_] => true,
        [r, c] => *r == 1 || *c == 1,
        _ => false,
    };
    if !is_vector {
        return Err(format!(
            "{name} must be a vector, found shape {}",
            format_shape(&tensor.shape)
        ));
    }
    Ok(&tensor.data)
}

/// Expand axis vectors into 2D coordinate grids of shape `(len(y), len(x))`.
///
/// Cell `(r, c)` of the first grid holds `x[c]` and of the second `y[r]`.
pub fn meshgrid(x: &Tensor, y: &Tensor) -> Result<(Tensor, Tensor), String> {
    let xs = vector_values(x, "meshgrid: x")?;
    let ys = vector_values(y, "meshgrid: y")?;
    let rows = ys.len();
    let cols = xs.len();
    let xg = Tensor::from_fn2(rows, cols, |_, c| xs[c]);
    let yg = Tensor::from_fn2(rows, cols, |r, _| ys[r]);
    Ok((xg, yg))
}

/// Stack `count` copies of a vector as rows: result is `(count, len)`.
pub fn repeat_rows(values: &Tensor, count: usize) -> Result<Tensor, String> {
    let data = vector_values(values, "repeat_rows")?;
    Ok(Tensor::from_fn2(count, data.len(), |_, c| data[c]))
}

/// Stack `count` copies of a vector as columns: result is `(len, count)`.
pub fn repeat_cols(values: &Tensor, count: usize) -> Result<Tensor, String> {
    let data = vector_values(values, "repeat_cols")?;
    Ok(Tensor::from_fn2(data.len(), count, |r, _| data[r]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meshgrid_orients_rows_along_y() {
        let (xg, yg) = meshgrid(&Tensor::range(10), &Tensor::range(9)).unwrap();
        assert_eq!(xg.shape, vec![9, 10]);
        assert_eq!(yg.shape, vec![9, 10]);
        assert_eq!(xg.get2(4, 7).unwrap(), 7.0);
        assert_eq!(yg.get2(4, 7).unwrap(), 4.0);
    }

    #[test]
    fn meshgrid_rejects_matrices() {
        let m = Tensor::zeros2(3, 3).unwrap();
        let err = meshgrid(&m, &Tensor::range(3)).unwrap_err();
        assert!(err.contains("(3, 3)"), "{err}");
    }

    #[test]
    fn repeat_helpers_match_axis_orientation() {
        let v = Tensor::vector(vec![1.0, 2.0, 3.0]);
        let rows = repeat_rows(&v, 2).unwrap();
        assert_eq!(rows.shape, vec![2, 3]);
        assert_eq!(rows.get2(1, 2).unwrap(), 3.0);

        let cols = repeat_cols(&v, 4).unwrap();
        assert_eq!(cols.shape, vec![3, 4]);
        assert_eq!(cols.get2(2, 3).unwrap(), 3.0);
    }
}
