//! Contour plot records and the figure that holds them

pub mod contour;
pub mod contour_fill;
pub mod figure;
pub mod grid;

pub use contour::{ContourPlot, Extend};
pub use contour_fill::ContourFillPlot;
pub use figure::{AxisScale, Figure, FigureStatistics, PlotElement, PlotType};
pub use grid::{ContourGrid, GridCoordinates};
