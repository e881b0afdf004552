//! Waveform animator - the sweeping ECG trace
//!
//! The animator owns a fixed list of points and a tick counter. Every
//! paint shifts the whole trace right by `ticks` pixels. Once the first
//! point has been pushed past the right edge of the surface the counter
//! goes back to zero and the sweep starts over.
//!
//! ## Tick / paint ordering
//!
//! ```text
//! tick()    ticks += 1          (only while enabled)
//! render()  draw with ticks     then reset to 0 if first.x + ticks > width
//! ```
//!
//! The paint that detects the wrap still draws with the old offset; only
//! the following paint starts from zero.
//!
//! Note that only the first point decides when to wrap. A trace whose
//! first point isn't its leftmost one can wrap early or late.

use eframe::egui::{Color32, FontId, Pos2, Rect, Stroke, Vec2};

use super::surface::Surface;

/// A trace vertex in surface-local pixels
pub type Point = Pos2;

/// Default caption shown in the corner of the trace
pub const DEFAULT_CAPTION: &str = "Grid intervals: 0.2 sec, 0.5 mV (ECG)";

/// How the trace and its caption are drawn
#[derive(Clone, Debug)]
pub struct TraceStyle {
    pub color: Color32,
    pub line_width: f32,
    pub text_color: Color32,
    pub caption: String,
    pub caption_size: f32,
    /// Distance from the right edge; half of it is kept from the bottom
    pub caption_margin: f32,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(39, 25, 24),
            line_width: 1.0,
            text_color: Color32::from_rgb(39, 25, 24),
            caption: DEFAULT_CAPTION.to_string(),
            caption_size: 12.0,
            caption_margin: 10.0,
        }
    }
}

/// Looping horizontal sweep of a point sequence
#[derive(Clone, Debug, Default)]
pub struct WaveformAnimator {
    points: Vec<Point>,
    ticks: u32,
    enabled: bool,
    pub style: TraceStyle,
}

impl WaveformAnimator {
    /// Create an animator with custom styling
    pub fn with_style(style: TraceStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Replace the whole trace; takes effect on the next paint
    pub fn set_sequence(&mut self, points: impl Into<Vec<Point>>) {
        self.points = points.into();
        log::info!("Waveform replaced ({} points)", self.points.len());
    }

    /// Current trace
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Allow or ignore ticks. Keeps the counter and the trace.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance the sweep by one pixel if animation is enabled
    pub fn tick(&mut self) {
        if self.enabled {
            self.ticks = self.ticks.saturating_add(1);
        }
    }

    /// Current horizontal offset in pixels
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Put the trace back at its original position
    pub fn restart(&mut self) {
        self.ticks = 0;
    }

    /// Draw the shifted trace and the caption
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        let clip = surface.clip_rect();
        let shift = Vec2::new(self.ticks as f32, 0.0);
        let stroke = Stroke::new(self.style.line_width, self.style.color);

        for pair in self.points.windows(2) {
            surface.draw_line(pair[0] + shift, pair[1] + shift, stroke);
        }

        if let Some(first) = self.points.first() {
            if first.x + shift.x > clip.width() {
                log::debug!("Sweep wrapped after {} ticks", self.ticks);
                self.ticks = 0;
            }
        }

        self.draw_caption(surface, clip);
    }

    /// Caption anchored to the bottom-right corner
    fn draw_caption<S: Surface>(&self, surface: &mut S, clip: Rect) {
        let font = FontId::proportional(self.style.caption_size);
        let size = surface.measure_text(&self.style.caption, &font);
        let margin = self.style.caption_margin;

        let min = Pos2::new(
            clip.right() - size.x - margin,
            clip.bottom() - size.y - margin / 2.0,
        );
        let rect = Rect::from_min_size(min, size);

        surface.draw_text(&self.style.caption, &font, self.style.text_color, rect);
    }
}

/// Sample trace: a single PQRST complex, ~200 px wide
pub fn demo_trace() -> Vec<Point> {
    [
        (0.0, 46.0),
        (60.0, 46.0),
        (90.0, 90.0),
        (110.0, 5.0),
        (120.0, 50.0),
        (150.0, 50.0),
        (160.0, 55.0),
        (170.0, 60.0),
        (180.0, 70.0),
        (185.0, 69.0),
        (190.0, 70.0),
        (195.0, 40.0),
    ]
    .into_iter()
    .map(|(x, y)| Pos2::new(x, y))
    .collect()
}
