//! `contour`, `contourf` and their companions `clabel` and `colorbar`.
//!
//! Every entry point validates its inputs before touching the engine, so a
//! rejected call leaves the figure exactly as it was.

use glam::{DVec2, Vec4};
use isoplot_builtins::Tensor;
use isoplot_plot::{AxisScale, ContourFillPlot, ContourGrid, ContourPlot, Extend, GridCoordinates};
use log::debug;

use crate::engine::ContourEngine;
use crate::error::{engine_error, plotting_error, shape_error, PlotResult};
use crate::levels::{ensure_fill_levels, ContourLevelSpec};
use crate::shape::{validate, validate_grid, CoordinateKind, GridShape};

const BUILTIN_CONTOUR: &str = "contour";
const BUILTIN_CONTOURF: &str = "contourf";
const BUILTIN_CLABEL: &str = "clabel";
const BUILTIN_COLORBAR: &str = "colorbar";

/// Options shared by line and filled contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourOptions {
    pub levels: ContourLevelSpec,
    /// Explicit colors; empty leaves the choice to the engine.
    pub colors: Vec<Vec4>,
    pub extend: Extend,
    pub x_scale: AxisScale,
    pub label: Option<String>,
}

impl ContourOptions {
    pub fn with_levels(mut self, levels: ContourLevelSpec) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_extend(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }

    pub fn with_x_scale(mut self, scale: AxisScale) -> Self {
        self.x_scale = scale;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Parse an extend keyword for `builtin`.
pub fn parse_extend(builtin: &str, text: &str) -> PlotResult<Extend> {
    text.parse::<Extend>()
        .map_err(|err| plotting_error(builtin, format!("{builtin}: {err}")))
}

/// Draw iso-lines of `z` over the `(x, y)` coordinates on `axes_index`.
///
/// Returns the engine's index for the new plot.
pub fn contour<E: ContourEngine + ?Sized>(
    engine: &mut E,
    axes_index: usize,
    x: &Tensor,
    y: &Tensor,
    z: &Tensor,
    options: &ContourOptions,
) -> PlotResult<usize> {
    let shape = validate(x, y, z).map_err(|err| shape_error(BUILTIN_CONTOUR, err))?;
    let grid = build_grid(BUILTIN_CONTOUR, x, y, z, shape)?;
    let levels = options.levels.resolve(BUILTIN_CONTOUR, grid.z_range())?;

    let mut plot = ContourPlot::new(grid, levels)
        .map_err(|msg| engine_error(BUILTIN_CONTOUR, msg))?
        .with_colors(options.colors.clone())
        .with_extend(options.extend);
    if let Some(label) = &options.label {
        plot = plot.with_label(label.clone());
    }

    debug!(
        "contour: {}x{} grid, {} levels, extend={} on axes {axes_index}",
        shape.rows,
        shape.cols,
        plot.levels.len(),
        plot.extend
    );
    apply_x_scale(engine, BUILTIN_CONTOUR, axes_index, options.x_scale)?;
    engine
        .add_contour(axes_index, plot)
        .map_err(|msg| engine_error(BUILTIN_CONTOUR, msg))
}

/// Filled counterpart of [`contour`]: bands between consecutive levels.
pub fn contourf<E: ContourEngine + ?Sized>(
    engine: &mut E,
    axes_index: usize,
    x: &Tensor,
    y: &Tensor,
    z: &Tensor,
    options: &ContourOptions,
) -> PlotResult<usize> {
    let shape = validate(x, y, z).map_err(|err| shape_error(BUILTIN_CONTOURF, err))?;
    let grid = build_grid(BUILTIN_CONTOURF, x, y, z, shape)?;
    let levels = ensure_fill_levels(BUILTIN_CONTOURF, &options.levels, grid.z_range())?;

    let mut plot = ContourFillPlot::new(grid, levels)
        .map_err(|msg| engine_error(BUILTIN_CONTOURF, msg))?
        .with_colors(options.colors.clone())
        .with_extend(options.extend);
    if let Some(label) = &options.label {
        plot = plot.with_label(label.clone());
    }

    debug!(
        "contourf: {}x{} grid, {} bands, extend={} on axes {axes_index}",
        shape.rows,
        shape.cols,
        plot.band_count(),
        plot.extend
    );
    apply_x_scale(engine, BUILTIN_CONTOURF, axes_index, options.x_scale)?;
    engine
        .add_contour_fill(axes_index, plot)
        .map_err(|msg| engine_error(BUILTIN_CONTOURF, msg))
}

/// `contour(z)`: x runs over `0..cols`, y over `0..rows`.
pub fn contour_z<E: ContourEngine + ?Sized>(
    engine: &mut E,
    axes_index: usize,
    z: &Tensor,
    options: &ContourOptions,
) -> PlotResult<usize> {
    let (x, y) = implicit_axes(BUILTIN_CONTOUR, z)?;
    contour(engine, axes_index, &x, &y, z, options)
}

/// `contourf(z)` with the same implicit axes as [`contour_z`].
pub fn contourf_z<E: ContourEngine + ?Sized>(
    engine: &mut E,
    axes_index: usize,
    z: &Tensor,
    options: &ContourOptions,
) -> PlotResult<usize> {
    let (x, y) = implicit_axes(BUILTIN_CONTOURF, z)?;
    contourf(engine, axes_index, &x, &y, z, options)
}

/// Place inline labels of a line contour at the given `(x, y)` anchors.
pub fn clabel<E: ContourEngine + ?Sized>(
    engine: &mut E,
    plot_index: usize,
    points: &[(f64, f64)],
) -> PlotResult<()> {
    if points
        .iter()
        .any(|(px, py)| !px.is_finite() || !py.is_finite())
    {
        return Err(plotting_error(
            BUILTIN_CLABEL,
            "clabel: label positions must be finite",
        ));
    }
    let anchors = points.iter().map(|&(px, py)| DVec2::new(px, py)).collect();
    engine
        .set_manual_labels(plot_index, anchors)
        .map_err(|msg| engine_error(BUILTIN_CLABEL, msg))
}

pub fn colorbar<E: ContourEngine + ?Sized>(engine: &mut E, axes_index: usize) -> PlotResult<()> {
    engine
        .set_colorbar(axes_index)
        .map_err(|msg| engine_error(BUILTIN_COLORBAR, msg))
}

fn implicit_axes(builtin: &str, z: &Tensor) -> PlotResult<(Tensor, Tensor)> {
    let (rows, cols) = validate_grid(z).map_err(|err| shape_error(builtin, err))?;
    Ok((Tensor::range(cols), Tensor::range(rows)))
}

fn build_grid(
    builtin: &str,
    x: &Tensor,
    y: &Tensor,
    z: &Tensor,
    shape: GridShape,
) -> PlotResult<ContourGrid> {
    let coordinates = match shape.coordinates {
        CoordinateKind::Vector => GridCoordinates::Vectors,
        CoordinateKind::Grid => GridCoordinates::Matrices,
    };
    ContourGrid::new(
        x.data.clone(),
        y.data.clone(),
        z.data.clone(),
        shape.rows,
        shape.cols,
        coordinates,
    )
    .map_err(|msg| engine_error(builtin, msg))
}

fn apply_x_scale<E: ContourEngine + ?Sized>(
    engine: &mut E,
    builtin: &str,
    axes_index: usize,
    scale: AxisScale,
) -> PlotResult<()> {
    if scale == AxisScale::Linear {
        return Ok(());
    }
    engine
        .set_x_scale(axes_index, scale)
        .map_err(|msg| engine_error(builtin, msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoplot_plot::Figure;

    #[test]
    fn extend_errors_carry_the_builtin() {
        let err = parse_extend("contourf", "upward").unwrap_err();
        assert_eq!(err.builtin(), Some("contourf"));
        assert!(err.message().starts_with("contourf: unsupported extend `upward`"));
    }

    #[test]
    fn labels_must_be_finite() {
        let mut fig = Figure::new();
        let z = Tensor::zeros2(3, 3).unwrap();
        let idx = contour_z(&mut fig, 0, &z, &ContourOptions::default()).unwrap();
        assert!(clabel(&mut fig, idx, &[(f64::NAN, 1.0)]).is_err());
        clabel(&mut fig, idx, &[(0.5, 1.0)]).unwrap();
    }
}
