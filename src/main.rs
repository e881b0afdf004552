//! cardiogram-rs - animated ECG trace on millimeter paper
//!
//! The window shows a sweeping ECG waveform over a medical grid. The grid
//! spacing comes from a fixed pixel density so one cell is always one
//! "millimeter" regardless of the monitor.
//!
//! Click the trace (or press Start) to run the sweep; click again to pause.

use std::time::{Duration, Instant};

use eframe::egui;

mod clock;
mod render;
mod settings;

use clock::TickClock;
use render::{demo_trace, CardiogramView, WaveformAnimator, DENSITY_RANGE};
use settings::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting cardiogram-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 500.0])
            .with_title("cardiogram-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "cardiogram-rs",
        options,
        Box::new(|cc| Ok(Box::new(CardiogramApp::new(cc)))),
    )
}

/// Main application state
struct CardiogramApp {
    settings: AppSettings,
    clock: TickClock,
    animator: WaveformAnimator,
    view: CardiogramView,
}

impl CardiogramApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();

        let mut clock = TickClock::new(settings.tick_interval());
        clock.set_enabled(settings.animate_on_start, Instant::now());

        let mut animator = WaveformAnimator::with_style(settings.trace_style());
        animator.set_sequence(demo_trace());
        animator.set_enabled(clock.is_enabled());

        let mut view = CardiogramView::new(settings.grid());
        view.show_grid = settings.show_grid;

        Self {
            settings,
            clock,
            animator,
            view,
        }
    }

    /// Start or pause the sweep
    fn toggle_animation(&mut self) {
        let running = self.clock.toggle(Instant::now());
        self.animator.set_enabled(running);
        log::info!("Animation {}", if running { "started" } else { "paused" });
    }

    /// Persist the current display state
    fn save_settings(&mut self) {
        self.settings.capture(&self.view.grid, &self.animator.style);
        self.settings.tick_interval_ms = self.clock.interval().as_millis() as u64;
        self.settings.show_grid = self.view.show_grid;
        self.settings.save();
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.separator();

        ui.collapsing("Animation", |ui| {
            let mut interval_ms = self.clock.interval().as_millis() as u64;
            if ui
                .add(egui::Slider::new(&mut interval_ms, 10..=200).text("Tick (ms)"))
                .changed()
            {
                self.clock.set_interval(Duration::from_millis(interval_ms));
            }
            ui.checkbox(&mut self.settings.animate_on_start, "Run on start");
        });

        ui.separator();

        ui.collapsing("Grid", |ui| {
            if ui
                .add(
                    egui::Slider::new(&mut self.settings.grid_density, DENSITY_RANGE)
                        .text("Density (DPI)"),
                )
                .changed()
            {
                self.view.grid.set_density(self.settings.grid_density);
            }
            ui.checkbox(&mut self.view.show_grid, "Show grid");
        });

        ui.separator();

        ui.collapsing("Trace", |ui| {
            ui.add(egui::Slider::new(&mut self.animator.style.line_width, 0.5..=4.0).text("Line width"));
        });

        ui.separator();

        // Color presets
        ui.collapsing("Color", |ui| {
            ui.horizontal(|ui| {
                if ui.button("Paper").clicked() {
                    self.view.grid.style.background = egui::Color32::from_rgb(246, 247, 233);
                    self.view.grid.style.line = egui::Color32::from_rgb(224, 206, 194);
                    self.view.grid.style.major = egui::Color32::from_rgb(224, 206, 194);
                    self.animator.style.color = egui::Color32::from_rgb(39, 25, 24);
                    self.animator.style.text_color = egui::Color32::from_rgb(39, 25, 24);
                }
                if ui.button("Monitor").clicked() {
                    self.view.grid.style.background = egui::Color32::from_rgb(8, 16, 8);
                    self.view.grid.style.line = egui::Color32::from_rgb(24, 56, 24);
                    self.view.grid.style.major = egui::Color32::from_rgb(40, 96, 40);
                    self.animator.style.color = egui::Color32::from_rgb(100, 255, 100);
                    self.animator.style.text_color = egui::Color32::from_rgb(100, 200, 100);
                }
            });
        });

        ui.separator();

        if ui.button("Save settings").clicked() {
            self.save_settings();
        }
    }
}

impl eframe::App for CardiogramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.clock.poll(now) {
            self.animator.tick();
        }
        if let Some(wait) = self.clock.until_next(now) {
            ctx.request_repaint_after(wait);
        }

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("cardiogram-rs");
                ui.separator();

                let button_text = if self.animator.is_enabled() {
                    "⏹ Stop"
                } else {
                    "▶ Start"
                };
                if ui.button(button_text).clicked() {
                    self.toggle_animation();
                }

                if ui.button("Restart sweep").clicked() {
                    self.animator.restart();
                }

                ui.separator();
                ui.toggle_value(&mut self.settings.show_settings, "⚙ Settings");
            });
        });

        // Settings panel
        if self.settings.show_settings {
            egui::SidePanel::left("settings_panel")
                .min_width(220.0)
                .show(ctx, |ui| self.settings_panel(ui));
        }

        // Footer
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(format!("Offset: {} px", self.animator.ticks()));
                ui.separator();
                ui.small(format!("Points: {}", self.animator.points().len()));
                ui.separator();
                ui.small(format!("Tick: {} ms", self.clock.interval().as_millis()));
                ui.separator();
                ui.small(format!("Grid: {:.2} px/mm", self.view.grid.gap()));
            });
        });

        // Main cardiogram display
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let response = self.view.show(ui, &mut self.animator, None);
                if response.clicked() {
                    self.toggle_animation();
                }
            });
    }
}
