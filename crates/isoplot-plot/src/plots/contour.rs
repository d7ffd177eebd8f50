//! Contour plot record (iso-lines over a sampled grid).
//!
//! A `ContourPlot` stores the validated grid, the resolved levels and the
//! styling a caller asked for. Colors and `Extend` are kept as given; mapping
//! them onto a colormap is the renderer's job. Manual label anchors are only
//! meaningful for line contours, so they live here and not on filled sets.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, Vec4};

use crate::core::BoundingBox;
use crate::plots::grid::ContourGrid;

/// Which out-of-range regions a contour set and its colorbar cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extend {
    #[default]
    Neither,
    Min,
    Max,
    Both,
}

impl Extend {
    pub fn as_str(self) -> &'static str {
        match self {
            Extend::Neither => "neither",
            Extend::Min => "min",
            Extend::Max => "max",
            Extend::Both => "both",
        }
    }
}

impl FromStr for Extend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neither" => Ok(Extend::Neither),
            "min" => Ok(Extend::Min),
            "max" => Ok(Extend::Max),
            "both" => Ok(Extend::Both),
            other => Err(format!(
                "unsupported extend `{other}` (expected 'neither', 'min', 'max' or 'both')"
            )),
        }
    }
}

impl fmt::Display for Extend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ContourPlot {
    pub grid: ContourGrid,
    pub levels: Vec<f64>,
    /// Explicit line colors; empty means the figure colormap is used.
    pub colors: Vec<Vec4>,
    pub extend: Extend,
    pub label: Option<String>,
    manual_labels: Vec<DVec2>,
}

impl ContourPlot {
    pub fn new(grid: ContourGrid, levels: Vec<f64>) -> Result<Self, String> {
        if levels.is_empty() {
            return Err("ContourPlot: at least one level is required".to_string());
        }
        Ok(Self {
            grid,
            levels,
            colors: Vec::new(),
            extend: Extend::Neither,
            label: None,
            manual_labels: Vec::new(),
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

    /// Anchor points for inline level labels placed by the caller.
    pub fn manual_labels(&self) -> &[DVec2] {
        &self.manual_labels
    }

    pub fn set_manual_labels(&mut self, points: Vec<DVec2>) {
        self.manual_labels = points;
    }

    pub fn bounds(&self) -> BoundingBox {
        self.grid.bounds()
    }

    pub fn estimated_memory_usage(&self) -> usize {
        self.grid.estimated_memory_usage()
            + self.levels.len() * std::mem::size_of::<f64>()
            + self.colors.len() * std::mem::size_of::<Vec4>()
            + self.manual_labels.len() * std::mem::size_of::<DVec2>()
    }
}
