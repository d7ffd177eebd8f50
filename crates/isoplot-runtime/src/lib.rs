//! Contour builtins: input shape validation, level and option handling, and
//! dispatch of validated requests into a [`ContourEngine`].

pub mod contour;
pub mod engine;
pub mod error;
pub mod levels;
pub mod shape;
pub mod style;

pub use contour::{
    clabel, colorbar, contour, contour_z, contourf, contourf_z, parse_extend, ContourOptions,
};
pub use engine::ContourEngine;
pub use error::{PlotError, PlotResult, SHAPE_MISMATCH_ID};
pub use levels::{ContourLevelSpec, DEFAULT_LEVELS, MAX_LEVELS};
pub use shape::{validate, validate_grid, validate_shapes, CoordinateKind, GridShape, ShapeError};
pub use style::{parse_color, parse_colors};
