use chrono::{Duration, NaiveDate, NaiveDateTime};
use glam::Vec4;
use isoplot_builtins::{datetime_vector, meshgrid, repeat_cols, repeat_rows, Tensor};
use isoplot_plot::{AxisScale, Extend, Figure, PlotElement, PlotType};
use isoplot_runtime::{
    clabel, colorbar, contour, contour_z, contourf, contourf_z, parse_colors, parse_extend,
    ContourLevelSpec, ContourOptions, ShapeError, SHAPE_MISMATCH_ID,
};

fn arange_grid(rows: usize, cols: usize) -> Tensor {
    // 0, 1, 2, ... filled row by row
    Tensor::from_fn2(rows, cols, |r, c| (r * cols + c) as f64)
}

#[test]
fn contour_records_the_validated_grid() {
    let mut fig = Figure::new();
    let z = arange_grid(9, 10);
    let idx = contour(
        &mut fig,
        0,
        &Tensor::range(10),
        &Tensor::range(9),
        &z,
        &ContourOptions::default(),
    )
    .unwrap();

    match fig.get_plot(idx) {
        Some(PlotElement::Contour(plot)) => {
            assert_eq!((plot.grid.rows, plot.grid.cols), (9, 10));
            assert_eq!(plot.grid.z, z.data);
            assert_eq!(plot.levels.len(), isoplot_runtime::DEFAULT_LEVELS);
            assert_eq!(plot.levels[0], 0.0);
            assert!((plot.levels[9] - 89.0).abs() < 1e-9);
        }
        other => panic!("expected line contour, found {other:?}"),
    }
}

#[test]
fn failed_validation_records_nothing() {
    let mut fig = Figure::new();
    let err = contourf(
        &mut fig,
        0,
        &Tensor::range(9),
        &Tensor::range(9),
        &arange_grid(9, 10),
        &ContourOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.message(), "Length of x must be number of columns in z.");
    assert_eq!(err.identifier(), Some(SHAPE_MISMATCH_ID));
    assert_eq!(err.builtin(), Some("contourf"));
    assert!(matches!(err.shape_error(), Some(ShapeError::XLength { .. })));
    assert!(fig.is_empty());
}

#[test]
fn meshgrid_coordinates_are_accepted() {
    let mut fig = Figure::new();
    let (xg, yg) = meshgrid(&Tensor::range(10), &Tensor::range(9)).unwrap();
    contourf(&mut fig, 0, &xg, &yg, &arange_grid(9, 10), &ContourOptions::default()).unwrap();

    let stats = fig.statistics();
    assert_eq!(stats.plot_type_counts.get(&PlotType::ContourFill), Some(&1));
    let bounds = fig.bounds();
    assert_eq!(bounds.max.x, 9.0);
    assert_eq!(bounds.max.y, 8.0);
}

#[test]
fn z_only_form_uses_zero_based_axes() {
    let mut fig = Figure::new();
    let idx = contour_z(&mut fig, 0, &arange_grid(3, 4), &ContourOptions::default()).unwrap();
    match fig.get_plot(idx) {
        Some(PlotElement::Contour(plot)) => {
            assert_eq!(plot.grid.x, vec![0.0, 1.0, 2.0, 3.0]);
            assert_eq!(plot.grid.y, vec![0.0, 1.0, 2.0]);
        }
        other => panic!("expected line contour, found {other:?}"),
    }

    let err = contourf_z(&mut fig, 0, &Tensor::range(4), &ContourOptions::default()).unwrap_err();
    assert_eq!(err.message(), "Input z must be a 2D array.");
    assert_eq!(fig.len(), 1);
}

#[test]
fn explicit_levels_are_kept_and_checked() {
    let mut fig = Figure::new();
    let levels = ContourLevelSpec::from_values("contour", &[2.0, 4.0, 8.0, 10.0]).unwrap();
    let opts = ContourOptions::default().with_levels(levels);
    let idx = contour_z(&mut fig, 0, &arange_grid(3, 4), &opts).unwrap();
    assert_eq!(fig.get_plot(idx).unwrap().levels(), &[2.0, 4.0, 8.0, 10.0]);

    let err = ContourLevelSpec::from_values("contour", &[2.0, 8.0, 4.0]).unwrap_err();
    assert_eq!(err.message(), "contour: level values must be strictly increasing");

    let bad = ContourOptions::default().with_levels(ContourLevelSpec::Values(vec![4.0, 4.0]));
    assert!(contour_z(&mut fig, 0, &arange_grid(3, 4), &bad).is_err());
    assert_eq!(fig.len(), 1);
}

#[test]
fn given_colors_levels_and_extends() {
    let mut fig = Figure::new().with_subplot_grid(2, 4);
    let data = arange_grid(3, 4);
    let colors = ["red", "yellow", "pink", "blue", "black"];
    let levels = [2.0, 4.0, 8.0, 10.0];

    for i in 0..8 {
        let filled = i % 2 == 0;
        let extend = parse_extend("contour", ["neither", "min", "max", "both"][i / 2]).unwrap();

        let idx = if filled {
            let color_count = match extend {
                Extend::Min | Extend::Max => colors.len() - 1,
                _ => colors.len(),
            };
            let opts = ContourOptions::default()
                .with_levels(ContourLevelSpec::Values(levels.to_vec()))
                .with_colors(parse_colors("contourf", &colors[..color_count]).unwrap())
                .with_extend(extend);
            contourf_z(&mut fig, i, &data, &opts).unwrap()
        } else {
            let level_count = if extend == Extend::Both { 3 } else { 4 };
            let opts = ContourOptions::default()
                .with_levels(ContourLevelSpec::Values(levels[..level_count].to_vec()))
                .with_colors(parse_colors("contour", &colors).unwrap())
                .with_extend(extend);
            contour_z(&mut fig, i, &data, &opts).unwrap()
        };
        colorbar(&mut fig, i).unwrap();
        assert_eq!(fig.plot_axes_indices()[idx], i);
    }

    assert_eq!(fig.statistics().colorbars, 8);
    match fig.get_plot(7) {
        Some(PlotElement::Contour(plot)) => {
            assert_eq!(plot.extend, Extend::Both);
            assert_eq!(plot.levels, vec![2.0, 4.0, 8.0]);
            assert_eq!(plot.colors[0], Vec4::new(1.0, 0.0, 0.0, 1.0));
        }
        other => panic!("expected line contour, found {other:?}"),
    }
    match fig.get_plot(2) {
        Some(PlotElement::ContourFill(plot)) => {
            assert_eq!(plot.extend, Extend::Min);
            assert_eq!(plot.colors.len(), 4);
            assert_eq!(plot.band_count(), 3);
        }
        other => panic!("expected filled contour, found {other:?}"),
    }
}

#[test]
fn manual_labels_attach_to_line_contours() {
    let mut fig = Figure::new();
    let (x, y) = meshgrid(&Tensor::range(10), &Tensor::range(10)).unwrap();
    let z = Tensor::from_fn2(10, 10, |r, c| r.max(c) as f64);
    let cs = contour(&mut fig, 0, &x, &y, &z, &ContourOptions::default()).unwrap();
    clabel(&mut fig, cs, &[(1.5, 3.0), (1.5, 4.4), (1.5, 6.0)]).unwrap();

    match fig.get_plot(cs) {
        Some(PlotElement::Contour(plot)) => assert_eq!(plot.manual_labels().len(), 3),
        other => panic!("expected line contour, found {other:?}"),
    }

    let filled = contourf(&mut fig, 0, &x, &y, &z, &ContourOptions::default()).unwrap();
    let err = clabel(&mut fig, filled, &[(1.0, 1.0)]).unwrap_err();
    assert!(err.message().starts_with("clabel: "), "{}", err.message());
}

fn twenty_days() -> Vec<NaiveDateTime> {
    let base = NaiveDate::from_ymd_opt(2013, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..20).map(|d| base + Duration::days(d)).collect()
}

#[test]
fn contour_datetime_axis() {
    let mut fig = Figure::new().with_subplot_grid(2, 2);
    let x = datetime_vector(&twenty_days());
    let y = Tensor::range(20);
    let (z1, z2) = meshgrid(&Tensor::range(20), &Tensor::range(20)).unwrap();
    let z = Tensor::new_2d(
        z1.data.iter().zip(&z2.data).map(|(a, b)| a * b).collect(),
        20,
        20,
    )
    .unwrap();
    let opts = ContourOptions::default().with_x_scale(AxisScale::Date);

    contour(&mut fig, 0, &x, &y, &z, &opts).unwrap();
    contourf(&mut fig, 1, &x, &y, &z, &opts).unwrap();

    let xg = repeat_rows(&x, 20).unwrap();
    let yg = repeat_cols(&y, 20).unwrap();
    contour(&mut fig, 2, &xg, &yg, &z, &opts).unwrap();
    contourf(&mut fig, 3, &xg, &yg, &z, &opts).unwrap();

    assert_eq!(fig.len(), 4);
    for axes in 0..4 {
        assert_eq!(fig.x_scale(axes), AxisScale::Date);
    }
    let bounds = fig.bounds();
    assert_eq!(bounds.min.x, 15706.0);
    assert_eq!(bounds.max.x, 15725.0);
}

#[test]
fn unknown_options_fail_before_dispatch() {
    assert!(parse_colors("contour", &["red", "no-such-color"]).is_err());
    let err = parse_extend("contour", "sideways").unwrap_err();
    assert_eq!(err.builtin(), Some("contour"));
}
