//! Figure management for contour plots
//!
//! A `Figure` owns a subplot grid (row-major axes indices starting at 0) and
//! the contour records assigned to each axes, plus per-axes colorbar and
//! x-axis scale settings.
//!
//! Axes indices past the end of the grid are clamped to the last axes by every
//! setter and getter, so a figure never rejects a record for its placement.
//! Combined bounds are cached and recomputed only after the plot list or the
//! grid changes.

use std::collections::HashMap;

use glam::DVec2;
use log::debug;

use crate::core::BoundingBox;
use crate::plots::{ContourFillPlot, ContourPlot};

/// Scale used to format an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Values are days since 1970-01-01 and are formatted as dates.
    Date,
}

#[derive(Debug, Clone)]
pub struct Figure {
    plots: Vec<PlotElement>,
    plot_axes_indices: Vec<usize>,

    /// Subplot grid configuration (rows x cols). Defaults to 1x1.
    pub axes_rows: usize,
    pub axes_cols: usize,

    colorbars: Vec<bool>,
    x_scales: Vec<AxisScale>,

    bounds: Option<BoundingBox>,
    dirty: bool,
}

#[derive(Debug, Clone)]
pub enum PlotElement {
    Contour(ContourPlot),
    ContourFill(ContourFillPlot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotType {
    Contour,
    ContourFill,
}

impl Figure {
    pub fn new() -> Self {
        Self {
            plots: Vec::new(),
            plot_axes_indices: Vec::new(),
            axes_rows: 1,
            axes_cols: 1,
            colorbars: vec![false],
            x_scales: vec![AxisScale::Linear],
            bounds: None,
            dirty: true,
        }
    }

    /// Configure subplot grid (rows x cols). Axes are indexed row-major starting at 0.
    pub fn with_subplot_grid(mut self, rows: usize, cols: usize) -> Self {
        self.set_subplot_grid(rows, cols);
        self
    }

    /// Resize the subplot grid; plots on axes that no longer exist move to the last axes.
    pub fn set_subplot_grid(&mut self, rows: usize, cols: usize) {
        self.axes_rows = rows.max(1);
        self.axes_cols = cols.max(1);
        let total = self.total_axes();
        self.colorbars.resize(total, false);
        self.x_scales.resize(total, AxisScale::Linear);
        for idx in self.plot_axes_indices.iter_mut() {
            *idx = (*idx).min(total - 1);
        }
        self.dirty = true;
    }

    pub fn total_axes(&self) -> usize {
        self.axes_rows.max(1) * self.axes_cols.max(1)
    }

    /// Axes index mapping for plots (length equals number of plots)
    pub fn plot_axes_indices(&self) -> &[usize] {
        &self.plot_axes_indices
    }

    fn normalize_axes_index(&self, axes_index: usize) -> usize {
        let last = self.total_axes() - 1;
        if axes_index > last {
            debug!("axes index {axes_index} outside {last}; clamping");
        }
        axes_index.min(last)
    }

    fn push_plot(&mut self, element: PlotElement, axes_index: usize) -> usize {
        let idx = self.normalize_axes_index(axes_index);
        self.plots.push(element);
        self.plot_axes_indices.push(idx);
        self.dirty = true;
        self.plots.len() - 1
    }

    pub fn add_contour_plot(&mut self, plot: ContourPlot) -> usize {
        self.add_contour_plot_on_axes(plot, 0)
    }

    pub fn add_contour_plot_on_axes(&mut self, plot: ContourPlot, axes_index: usize) -> usize {
        self.push_plot(PlotElement::Contour(plot), axes_index)
    }

    pub fn add_contour_fill_plot(&mut self, plot: ContourFillPlot) -> usize {
        self.add_contour_fill_plot_on_axes(plot, 0)
    }

    pub fn add_contour_fill_plot_on_axes(
        &mut self,
        plot: ContourFillPlot,
        axes_index: usize,
    ) -> usize {
        self.push_plot(PlotElement::ContourFill(plot), axes_index)
    }

    pub fn set_colorbar(&mut self, axes_index: usize, enabled: bool) {
        let idx = self.normalize_axes_index(axes_index);
        self.colorbars[idx] = enabled;
    }

    pub fn has_colorbar(&self, axes_index: usize) -> bool {
        self.colorbars[self.normalize_axes_index(axes_index)]
    }

    pub fn set_x_scale(&mut self, axes_index: usize, scale: AxisScale) {
        let idx = self.normalize_axes_index(axes_index);
        self.x_scales[idx] = scale;
    }

    pub fn x_scale(&self, axes_index: usize) -> AxisScale {
        self.x_scales[self.normalize_axes_index(axes_index)]
    }

    /// Attach manual label anchors to a line contour plot.
    pub fn set_manual_labels(&mut self, plot_index: usize, points: Vec<DVec2>) -> Result<(), String> {
        match self.plots.get_mut(plot_index) {
            Some(PlotElement::Contour(plot)) => {
                plot.set_manual_labels(points);
                Ok(())
            }
            Some(PlotElement::ContourFill(_)) => Err(format!(
                "plot {plot_index} is a filled contour; labels need line contours"
            )),
            None => Err(format!("Plot index {plot_index} out of bounds")),
        }
    }

    pub fn clear(&mut self) {
        self.plots.clear();
        self.plot_axes_indices.clear();
        self.colorbars.iter_mut().for_each(|flag| *flag = false);
        self.x_scales.iter_mut().for_each(|scale| *scale = AxisScale::Linear);
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn plots(&self) -> impl Iterator<Item = &PlotElement> {
        self.plots.iter()
    }

    pub fn get_plot(&self, index: usize) -> Option<&PlotElement> {
        self.plots.get(index)
    }

    /// Plots assigned to one axes, in insertion order.
    pub fn plots_on_axes(&self, axes_index: usize) -> impl Iterator<Item = &PlotElement> {
        self.plots
            .iter()
            .zip(self.plot_axes_indices.iter())
            .filter(move |(_, ax)| **ax == axes_index)
            .map(|(plot, _)| plot)
    }

    /// Combined data bounds of every plot, cached until the figure changes.
    pub fn bounds(&mut self) -> BoundingBox {
        if self.dirty || self.bounds.is_none() {
            let mut combined = BoundingBox::default();
            for plot in &self.plots {
                combined.expand_by_box(&plot.bounds());
            }
            self.bounds = Some(combined);
            self.dirty = false;
        }
        self.bounds.unwrap_or_default()
    }

    pub fn statistics(&self) -> FigureStatistics {
        let plot_counts = self.plots.iter().fold(HashMap::new(), |mut acc, plot| {
            *acc.entry(plot.plot_type()).or_insert(0) += 1;
            acc
        });
        FigureStatistics {
            total_plots: self.plots.len(),
            plot_type_counts: plot_counts,
            total_memory_usage: self
                .plots
                .iter()
                .map(|plot| plot.estimated_memory_usage())
                .sum(),
            colorbars: self.colorbars.iter().filter(|flag| **flag).count(),
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotElement {
    pub fn plot_type(&self) -> PlotType {
        match self {
            PlotElement::Contour(_) => PlotType::Contour,
            PlotElement::ContourFill(_) => PlotType::ContourFill,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            PlotElement::Contour(plot) => plot.label.as_deref(),
            PlotElement::ContourFill(plot) => plot.label.as_deref(),
        }
    }

    pub fn levels(&self) -> &[f64] {
        match self {
            PlotElement::Contour(plot) => &plot.levels,
            PlotElement::ContourFill(plot) => &plot.levels,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            PlotElement::Contour(plot) => plot.bounds(),
            PlotElement::ContourFill(plot) => plot.bounds(),
        }
    }

    pub fn estimated_memory_usage(&self) -> usize {
        match self {
            PlotElement::Contour(plot) => plot.estimated_memory_usage(),
            PlotElement::ContourFill(plot) => plot.estimated_memory_usage(),
        }
    }
}

/// Figure statistics for debugging and summaries
#[derive(Debug)]
pub struct FigureStatistics {
    pub total_plots: usize,
    pub plot_type_counts: HashMap<PlotType, usize>,
    pub total_memory_usage: usize,
    pub colorbars: usize,
}
