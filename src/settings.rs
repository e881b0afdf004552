use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{
    GridRenderer, GridStyle, TraceStyle, DEFAULT_CAPTION, DEFAULT_DENSITY, DENSITY_RANGE,
};

/// Returns the path to the settings file: `~/.config/cardiogram-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("cardiogram-rs");
    path.push("settings.json");
    path
}

/// Errors that can occur while reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(serde_json::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(serde_json::Error),
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files. The trace itself is never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Animation
    pub tick_interval_ms: u64,
    pub animate_on_start: bool,

    // Grid
    pub grid_density: f32,
    pub show_grid: bool,

    // Trace
    pub line_width: f32,
    pub caption: String,
    pub caption_size: f32,
    pub caption_margin: f32,

    // UI
    pub show_settings: bool,

    // Colors (stored as u8 triples since Color32 isn't serde-friendly)
    pub background: [u8; 3],
    pub grid_color: [u8; 3],
    pub major_color: [u8; 3],
    pub trace_color: [u8; 3],
    pub text_color: [u8; 3],
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 40,
            animate_on_start: false,

            grid_density: DEFAULT_DENSITY,
            show_grid: true,

            line_width: 1.0,
            caption: DEFAULT_CAPTION.to_string(),
            caption_size: 12.0,
            caption_margin: 10.0,

            show_settings: false,

            background: [246, 247, 233],
            grid_color: [224, 206, 194],
            major_color: [224, 206, 194],
            trace_color: [39, 25, 24],
            text_color: [39, 25, 24],
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn triple(color: Color32) -> [u8; 3] {
    [color.r(), color.g(), color.b()]
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from a specific file, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read settings from a specific file
    ///
    /// Out-of-range values are pulled back into the ranges the UI offers.
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents).map_err(SettingsError::Parse)?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let density = self.grid_density.clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end());
        self.grid_density = if density.is_nan() { DEFAULT_DENSITY } else { density };
        self
    }

    /// Save settings to disk as pretty JSON, logging any failure.
    pub fn save(&self) {
        let path = settings_path();
        match self.try_save(&path) {
            Ok(()) => log::info!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Write settings to a specific file, creating parent directories
    pub fn try_save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn grid(&self) -> GridRenderer {
        GridRenderer::new(self.grid_density).style(GridStyle {
            background: rgb(self.background),
            line: rgb(self.grid_color),
            major: rgb(self.major_color),
        })
    }

    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            color: rgb(self.trace_color),
            line_width: self.line_width,
            text_color: rgb(self.text_color),
            caption: self.caption.clone(),
            caption_size: self.caption_size,
            caption_margin: self.caption_margin,
        }
    }

    /// Copy the editable display state back into the settings
    pub fn capture(&mut self, grid: &GridRenderer, trace: &TraceStyle) {
        self.background = triple(grid.style.background);
        self.grid_color = triple(grid.style.line);
        self.major_color = triple(grid.style.major);
        self.trace_color = triple(trace.color);
        self.text_color = triple(trace.text_color);
        self.line_width = trace.line_width;
    }
}
