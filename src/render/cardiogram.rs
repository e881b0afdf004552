//! Cardiogram display widget
//!
//! Ties the grid and the animated trace to an egui painter. The widget
//! itself keeps no animation state; the animator is passed in so the app
//! can tick it from its clock.

use eframe::egui::{self, Vec2};

use super::grid::GridRenderer;
use super::surface::{PainterSurface, Surface};
use super::waveform::WaveformAnimator;

/// ECG paper + sweeping trace
pub struct CardiogramView {
    pub grid: GridRenderer,

    /// Whether to draw the millimeter grid (background is always filled)
    pub show_grid: bool,
}

impl Default for CardiogramView {
    fn default() -> Self {
        Self::new(GridRenderer::default())
    }
}

impl CardiogramView {
    pub fn new(grid: GridRenderer) -> Self {
        Self {
            grid,
            show_grid: true,
        }
    }

    /// Paint one frame
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `animator` - Trace to draw; its wrap state is updated by the paint
    /// * `size` - Desired widget size (or None for all available space)
    ///
    /// # Returns
    /// A clickable response; the app uses clicks to toggle animation
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        animator: &mut WaveformAnimator,
        size: Option<Vec2>,
    ) -> egui::Response {
        let size = size.unwrap_or_else(|| ui.available_size());
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let rect = response.rect;
        let painter = painter.with_clip_rect(rect);

        let mut surface = PainterSurface::new(&painter, rect);
        self.paint(&mut surface, animator);

        response
    }

    /// Background (and grid), then the trace
    pub fn paint<S: Surface>(&self, surface: &mut S, animator: &mut WaveformAnimator) {
        if self.show_grid {
            self.grid.render(surface);
        } else {
            let clip = surface.clip_rect();
            surface.fill_rect(clip, self.grid.style.background);
        }

        animator.render(surface);
    }
}
