//! Millimeter grid - the ECG paper background
//!
//! ## Geometry
//!
//! Grid spacing comes from a fixed pixel density rather than the monitor's
//! reported DPI, so one grid cell is always the same number of pixels:
//!
//! ```text
//! gap = density / 25.4     (pixels per millimeter)
//! ```
//!
//! At the default 300 DPI that is ~11.8 px per millimeter.
//!
//! Lines start at offset 0 and stop strictly before the far edge. Every
//! 5th line (index 0, 5, 10, ...) is drawn twice, one pixel apart, which
//! reads as a heavier "major" line without needing a second stroke width.

use std::ops::RangeInclusive;

use eframe::egui::{Color32, Pos2, Rect, Stroke};

use super::surface::Surface;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Density used when none is configured
pub const DEFAULT_DENSITY: f32 = 300.0;

/// Densities a renderer accepts, in pixels per inch
pub const DENSITY_RANGE: RangeInclusive<f32> = 72.0..=600.0;

/// Lines per major division
pub const MAJOR_EVERY: usize = 5;

/// Which way a grid line runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Runs left to right at a fixed y
    Horizontal,
    /// Runs top to bottom at a fixed x
    Vertical,
}

/// One segment produced by the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub orientation: Orientation,
    /// 0-based line index along its axis; the 1 px twin shares its index
    pub index: usize,
    pub from: Pos2,
    pub to: Pos2,
}

impl GridLine {
    /// Part of a major division (the base line or its twin)
    pub fn is_major(&self) -> bool {
        self.index % MAJOR_EVERY == 0
    }
}

/// Colours for the paper
#[derive(Clone, Copy, Debug)]
pub struct GridStyle {
    pub background: Color32,
    pub line: Color32,
    /// Colour of major lines, usually the same as `line`
    pub major: Color32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(246, 247, 233),
            line: Color32::from_rgb(224, 206, 194),
            major: Color32::from_rgb(224, 206, 194),
        }
    }
}

/// Stateless grid generator
#[derive(Clone, Debug)]
pub struct GridRenderer {
    /// Distance between adjacent lines, in pixels
    gap: f32,
    pub style: GridStyle,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY)
    }
}

impl GridRenderer {
    /// Create a renderer for a fixed density in pixels per inch
    ///
    /// The density is clamped to `DENSITY_RANGE`.
    pub fn new(density: f32) -> Self {
        Self::with_spacing(spacing_for(density))
    }

    /// Create a renderer from an explicit line spacing in pixels
    pub fn with_spacing(gap: f32) -> Self {
        Self {
            gap,
            style: GridStyle::default(),
        }
    }

    /// Builder: set the colours
    pub fn style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    /// Change the density (pixels per inch)
    pub fn set_density(&mut self, density: f32) {
        self.gap = spacing_for(density);
    }

    /// Spacing between lines in pixels
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Line offsets along one axis: `(index, offset)` for each offset < extent
    ///
    /// Returns nothing for a non-positive extent or a spacing that
    /// wouldn't advance.
    pub fn positions(&self, extent: f32) -> impl Iterator<Item = (usize, f32)> {
        let gap = self.gap;
        let usable = extent > 0.0 && gap > 0.0 && gap.is_finite();
        (0usize..)
            .map(move |i| (i, i as f32 * gap))
            .take_while(move |&(_, offset)| usable && offset < extent)
    }

    /// Every segment for the given clip rectangle, in draw order
    ///
    /// Horizontal lines come first, then vertical ones. A major line is
    /// immediately followed by its 1 px twin.
    pub fn lines(&self, clip: Rect) -> Vec<GridLine> {
        let mut lines = Vec::new();

        if clip.width() <= 0.0 || clip.height() <= 0.0 {
            return lines;
        }

        for (index, y) in self.positions(clip.height()) {
            push_line(&mut lines, Orientation::Horizontal, index, y, clip);
        }

        for (index, x) in self.positions(clip.width()) {
            push_line(&mut lines, Orientation::Vertical, index, x, clip);
        }

        lines
    }

    /// Paint the background and the grid onto a surface
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let clip = surface.clip_rect();
        surface.fill_rect(clip, self.style.background);

        let minor = Stroke::new(1.0, self.style.line);
        let major = Stroke::new(1.0, self.style.major);
        for line in self.lines(clip) {
            let stroke = if line.is_major() { major } else { minor };
            surface.draw_line(line.from, line.to, stroke);
        }
    }
}

/// Line spacing for a density, clamped to `DENSITY_RANGE`
///
/// NaN stays NaN, which `positions` treats as unusable.
fn spacing_for(density: f32) -> f32 {
    density.clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end()) / MM_PER_INCH
}

fn push_line(lines: &mut Vec<GridLine>, orientation: Orientation, index: usize, offset: f32, clip: Rect) {
    let segment = |offset: f32| match orientation {
        Orientation::Horizontal => (Pos2::new(0.0, offset), Pos2::new(clip.right(), offset)),
        Orientation::Vertical => (Pos2::new(offset, 0.0), Pos2::new(offset, clip.bottom())),
    };

    let (from, to) = segment(offset);
    lines.push(GridLine { orientation, index, from, to });

    if index % MAJOR_EVERY == 0 {
        let (from, to) = segment(offset + 1.0);
        lines.push(GridLine { orientation, index, from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::recording::{DrawCommand, RecordingSurface};
    use eframe::egui::Vec2;

    fn clip(width: f32, height: f32) -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height))
    }

    /// Offset of a line along its axis
    fn offset(line: &GridLine) -> f32 {
        match line.orientation {
            Orientation::Horizontal => line.from.y,
            Orientation::Vertical => line.from.x,
        }
    }

    /// The extra 1 px stroke sits one pixel past `index * gap`
    fn is_twin(line: &GridLine, gap: f32) -> bool {
        (offset(line) - line.index as f32 * gap - 1.0).abs() < 1e-3
    }

    fn base_lines(lines: &[GridLine], orientation: Orientation, gap: f32) -> Vec<GridLine> {
        lines
            .iter()
            .filter(|l| l.orientation == orientation && !is_twin(l, gap))
            .copied()
            .collect()
    }

    #[test]
    fn test_default_gap_is_one_millimeter_at_300_dpi() {
        let grid = GridRenderer::default();
        assert!((grid.gap() - 300.0 / 25.4).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_line_count() {
        let grid = GridRenderer::new(300.0);
        let gap = grid.gap();

        for width in [1.0_f32, 50.0, 100.0, 123.4, 640.0] {
            let lines = grid.lines(clip(width, 30.0));
            let vertical = base_lines(&lines, Orientation::Vertical, gap);

            let expected = ((width - 1e-3) / gap).floor() as usize + 1;
            assert_eq!(vertical.len(), expected, "width {}", width);

            for line in &vertical {
                assert!(line.from.x < width);
                assert!((line.from.x - line.index as f32 * gap).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_horizontal_line_count() {
        let grid = GridRenderer::new(300.0);
        let lines = grid.lines(clip(30.0, 100.0));
        let horizontal = base_lines(&lines, Orientation::Horizontal, grid.gap());

        // 8 * 11.81 = 94.5 fits, 9 * 11.81 = 106.3 doesn't
        assert_eq!(horizontal.len(), 9);
        assert!(horizontal.iter().all(|l| l.from.y < 100.0));
    }

    #[test]
    fn test_far_edge_is_excluded() {
        let grid = GridRenderer::with_spacing(10.0);
        let lines = grid.lines(clip(100.0, 100.0));

        let vertical = base_lines(&lines, Orientation::Vertical, 10.0);
        assert_eq!(vertical.len(), 10);
        assert_eq!(vertical.last().map(|l| l.from.x), Some(90.0));
    }

    #[test]
    fn test_major_lines_are_doubled() {
        let grid = GridRenderer::with_spacing(10.0);
        let lines = grid.lines(clip(200.0, 200.0));

        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for index in 0..20 {
                let twins: Vec<&GridLine> = lines
                    .iter()
                    .filter(|l| l.orientation == orientation && l.index == index && is_twin(l, 10.0))
                    .collect();

                if index % 5 == 0 {
                    assert_eq!(twins.len(), 1, "index {} should be major", index);
                    let base = index as f32 * 10.0 + 1.0;
                    match orientation {
                        Orientation::Horizontal => assert_eq!(twins[0].from.y, base),
                        Orientation::Vertical => assert_eq!(twins[0].from.x, base),
                    }
                } else {
                    assert!(twins.is_empty(), "index {} should be minor", index);
                }
            }
        }
    }

    #[test]
    fn test_lines_span_the_clip() {
        let grid = GridRenderer::with_spacing(10.0);
        let lines = grid.lines(clip(80.0, 60.0));

        for line in &lines {
            match line.orientation {
                Orientation::Horizontal => {
                    assert_eq!(line.from.x, 0.0);
                    assert_eq!(line.to.x, 80.0);
                }
                Orientation::Vertical => {
                    assert_eq!(line.from.y, 0.0);
                    assert_eq!(line.to.y, 60.0);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_sizes_yield_nothing() {
        let grid = GridRenderer::default();
        assert!(grid.lines(clip(0.0, 100.0)).is_empty());
        assert!(grid.lines(clip(100.0, 0.0)).is_empty());
        assert!(grid.lines(Rect::NOTHING).is_empty());
        assert_eq!(grid.positions(-5.0).count(), 0);
    }

    #[test]
    fn test_zero_spacing_does_not_loop() {
        let grid = GridRenderer::with_spacing(0.0);
        assert!(grid.lines(clip(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_density_is_clamped() {
        let (min, max) = (*DENSITY_RANGE.start(), *DENSITY_RANGE.end());

        let tiny = GridRenderer::new(1e-6);
        assert!((tiny.gap() - min / MM_PER_INCH).abs() < 1e-4);
        // 317 * 2.83 = 898.6 is the last offset on a 900 px axis
        assert_eq!(tiny.positions(900.0).count(), 318);

        let huge = GridRenderer::new(1e9);
        assert!((huge.gap() - max / MM_PER_INCH).abs() < 1e-4);

        let mut grid = GridRenderer::default();
        grid.set_density(0.01);
        assert!((grid.gap() - min / MM_PER_INCH).abs() < 1e-4);
    }

    #[test]
    fn test_nan_density_draws_nothing() {
        let grid = GridRenderer::new(f32::NAN);
        assert!(grid.lines(clip(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_major_lines_use_major_color() {
        let style = GridStyle {
            major: Color32::RED,
            ..GridStyle::default()
        };
        let grid = GridRenderer::with_spacing(10.0).style(style);
        let mut surface = RecordingSurface::new(60.0, 5.0);
        grid.render(&mut surface);

        // Horizontal: index 0 (+twin). Vertical: 0 (+twin), 1..=5 (+twin at 5)
        let colors: Vec<Color32> = surface
            .take()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Line { stroke, .. } => Some(stroke.color),
                _ => None,
            })
            .collect();
        let red = colors.iter().filter(|&&c| c == Color32::RED).count();
        assert_eq!(red, 6);
        assert_eq!(colors.len() - red, 4);
    }

    #[test]
    fn test_render_fills_background_first() {
        let grid = GridRenderer::with_spacing(10.0);
        let mut surface = RecordingSurface::new(40.0, 20.0);
        grid.render(&mut surface);

        let commands = surface.take();
        assert_eq!(
            commands[0],
            DrawCommand::Fill { rect: clip(40.0, 20.0), fill: grid.style.background }
        );
        // 2 horizontal (+1 twin) and 4 vertical (+1 twin)
        assert_eq!(commands.len() - 1, 3 + 5);
    }
}
