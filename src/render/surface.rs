//! Drawing surface abstraction
//!
//! The grid and the trace never talk to egui directly. They draw through
//! the `Surface` trait, which exposes just enough of a 2D canvas:
//!
//! - the current clip rectangle
//! - line segments and filled rectangles
//! - text measurement and placement
//!
//! All coordinates are surface-local pixels: (0, 0) is the top-left corner
//! of the widget, not of the window.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

/// A rectangular canvas the renderers can draw onto
pub trait Surface {
    /// Region being repainted, in surface-local coordinates
    fn clip_rect(&self) -> Rect;

    /// Draw a straight line between two points
    fn draw_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, rect: Rect, fill: Color32);

    /// Size the text would occupy when drawn with `font`
    fn measure_text(&self, text: &str, font: &FontId) -> Vec2;

    /// Draw text with its top-left corner at `rect.min`
    fn draw_text(&mut self, text: &str, font: &FontId, color: Color32, rect: Rect);
}

/// `Surface` backed by an egui painter
///
/// Translates surface-local coordinates into screen space by offsetting
/// everything with the widget's top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    size: Vec2,
}

impl<'a> PainterSurface<'a> {
    /// Wrap a painter that covers `rect` on screen
    pub fn new(painter: &'a egui::Painter, rect: Rect) -> Self {
        Self {
            painter,
            origin: rect.min,
            size: rect.size(),
        }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        p + self.origin.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clip_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size)
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }

    fn fill_rect(&mut self, rect: Rect, fill: Color32) {
        let rect = rect.translate(self.origin.to_vec2());
        self.painter.rect_filled(rect, 0.0, fill);
    }

    fn measure_text(&self, text: &str, font: &FontId) -> Vec2 {
        // Colour doesn't affect layout
        self.painter
            .layout_no_wrap(text.to_owned(), font.clone(), Color32::WHITE)
            .size()
    }

    fn draw_text(&mut self, text: &str, font: &FontId, color: Color32, rect: Rect) {
        self.painter.text(
            self.to_screen(rect.min),
            Align2::LEFT_TOP,
            text,
            font.clone(),
            color,
        );
    }
}
