//! Filled contour plot record (bands between consecutive levels).
//!
//! Band `i` covers `levels[i]..levels[i + 1]`, so a filled set needs at least
//! two levels.

use glam::Vec4;

use crate::core::BoundingBox;
use crate::plots::contour::Extend;
use crate::plots::grid::ContourGrid;

#[derive(Debug, Clone)]
pub struct ContourFillPlot {
    pub grid: ContourGrid,
    /// Band edges; `levels.len() - 1` bands.
    pub levels: Vec<f64>,
    pub colors: Vec<Vec4>,
    pub extend: Extend,
    pub label: Option<String>,
}

impl ContourFillPlot {
    pub fn new(grid: ContourGrid, levels: Vec<f64>) -> Result<Self, String> {
        if levels.len() < 2 {
            return Err(format!(
                "ContourFillPlot: filled contours need at least two levels, found {}",
                levels.len()
            ));
        }
        Ok(Self {
            grid,
            levels,
            colors: Vec::new(),
            extend: Extend::Neither,
            label: None,
        })
    }

    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_extend(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn band_count(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn bounds(&self) -> BoundingBox {
        self.grid.bounds()
    }

    pub fn estimated_memory_usage(&self) -> usize {
        self.grid.estimated_memory_usage()
            + self.levels.len() * std::mem::size_of::<f64>()
            + self.colors.len() * std::mem::size_of::<Vec4>()
    }
}
