//! Render module - ECG paper and trace
//!
//! This module provides:
//! - `Surface` trait the renderers draw through
//! - Millimeter grid generator
//! - Looping waveform animator
//! - egui widget combining the two

mod cardiogram;
mod grid;
mod surface;
mod waveform;

pub use cardiogram::CardiogramView;
pub use grid::{GridRenderer, GridStyle, DEFAULT_DENSITY, DENSITY_RANGE};
pub use waveform::{demo_trace, TraceStyle, WaveformAnimator, DEFAULT_CAPTION};
