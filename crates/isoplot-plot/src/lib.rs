//! Plot records for isoplot.
//!
//! A [`plots::Figure`] owns a subplot grid and the contour sets drawn on each
//! axes. Records carry validated inputs and resolved levels; turning them into
//! pixels is left to whichever backend consumes the figure.

pub mod core;
pub mod plots;

pub use crate::core::BoundingBox;
pub use plots::{
    AxisScale, ContourFillPlot, ContourGrid, ContourPlot, Extend, Figure, FigureStatistics,
    GridCoordinates, PlotElement, PlotType,
};
