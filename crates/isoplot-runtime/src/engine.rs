//! Seam between the contour builtins and whatever records the plots.

use glam::DVec2;
use isoplot_plot::{AxisScale, ContourFillPlot, ContourPlot, Figure};

/// Receives validated contour requests. Indices returned by the `add_*`
/// methods identify the plot for later calls such as [`ContourEngine::set_manual_labels`].
pub trait ContourEngine {
    fn add_contour(&mut self, axes_index: usize, plot: ContourPlot) -> Result<usize, String>;

    fn add_contour_fill(
        &mut self,
        axes_index: usize,
        plot: ContourFillPlot,
    ) -> Result<usize, String>;

    fn set_colorbar(&mut self, axes_index: usize) -> Result<(), String>;

    fn set_manual_labels(&mut self, plot_index: usize, points: Vec<DVec2>) -> Result<(), String>;

    fn set_x_scale(&mut self, axes_index: usize, scale: AxisScale) -> Result<(), String>;
}

impl ContourEngine for Figure {
    fn add_contour(&mut self, axes_index: usize, plot: ContourPlot) -> Result<usize, String> {
        Ok(self.add_contour_plot_on_axes(plot, axes_index))
    }

    fn add_contour_fill(
        &mut self,
        axes_index: usize,
        plot: ContourFillPlot,
    ) -> Result<usize, String> {
        Ok(self.add_contour_fill_plot_on_axes(plot, axes_index))
    }

    fn set_colorbar(&mut self, axes_index: usize) -> Result<(), String> {
        Figure::set_colorbar(self, axes_index, true);
        Ok(())
    }

    fn set_manual_labels(&mut self, plot_index: usize, points: Vec<DVec2>) -> Result<(), String> {
        Figure::set_manual_labels(self, plot_index, points)
    }

    fn set_x_scale(&mut self, axes_index: usize, scale: AxisScale) -> Result<(), String> {
        Figure::set_x_scale(self, axes_index, scale);
        Ok(())
    }
}
