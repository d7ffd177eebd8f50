use isoplot_builtins::{datetime_vector, format_shape, parse_datetime, repeat_cols, Tensor};

#[test]
fn new_rejects_mismatched_data() {
    let err = Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]).unwrap_err();
    assert!(err.contains("doesn't match shape"), "{err}");
}

#[test]
fn overflowing_shapes_are_errors() {
    let err = Tensor::zeros2(1 << 32, 1 << 32).unwrap_err();
    assert!(err.contains("too many elements"), "{err}");
    assert!(Tensor::new(Vec::new(), vec![usize::MAX, 2]).is_err());
}

#[test]
fn ndims_follows_shape_length() {
    assert_eq!(Tensor::scalar(1.0).ndims(), 0);
    assert_eq!(Tensor::range(10).ndims(), 1);
    assert_eq!(Tensor::zeros2(9, 10).unwrap().ndims(), 2);
    assert_eq!(Tensor::zeros(vec![3, 3, 3]).unwrap().ndims(), 3);
}

#[test]
fn from_rows_stores_column_major() {
    let t = Tensor::from_rows(&[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
    assert_eq!(t.shape, vec![2, 3]);
    assert_eq!(t.data, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    assert_eq!(t.get2(1, 2).unwrap(), 5.0);
}

#[test]
fn from_rows_rejects_ragged_input() {
    let err = Tensor::from_rows(&[vec![0.0, 1.0], vec![2.0]]).unwrap_err();
    assert!(err.contains("row 1"), "{err}");
}

#[test]
fn finite_range_skips_nan() {
    let t = Tensor::vector(vec![f64::NAN, 3.0, -1.0, f64::INFINITY]);
    assert_eq!(t.finite_range(), Some((-1.0, 3.0)));
    assert_eq!(Tensor::vector(vec![f64::NAN]).finite_range(), None);
}

#[test]
fn display_matches_row_layout() {
    let t = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(t.to_string(), "[1 2; 3 4]");
    assert_eq!(Tensor::range(3).to_string(), "[0 1 2]");
    assert_eq!(
        Tensor::zeros(vec![2, 2, 2]).unwrap().to_string(),
        format!("Tensor(shape={})", format_shape(&[2, 2, 2]))
    );
}

#[test]
fn daily_datetime_axis_can_be_repeated_into_a_grid() {
    let base = parse_datetime("2013-01-01").unwrap();
    let days: Vec<_> = (0..20)
        .map(|d| base + chrono::Duration::days(d))
        .collect();
    let x = datetime_vector(&days);
    assert_eq!(x.shape, vec![20]);
    assert_eq!(x.data[19] - x.data[0], 19.0);

    let grid = repeat_cols(&Tensor::range(20), 20).unwrap();
    assert_eq!(grid.shape, vec![20, 20]);
}
