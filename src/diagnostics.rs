//! Structured diagnostics emitted alongside the recovered image.
//!
//! The report is a passive record: producing it never blocks a stage or
//! alters pipeline results. Serialize it with `write_json_file` or inspect
//! it in process.
use serde::Serialize;

/// Per-stage wall-clock durations in milliseconds.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StageTimings {
    pub dark_channel_ms: f64,
    pub atmospheric_ms: f64,
    pub transmission_ms: f64,
    pub refine_ms: f64,
    pub recover_ms: f64,
    pub total_ms: f64,
}

/// Summary statistics of a transmission map.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransmissionStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl TransmissionStats {
    pub fn of(map: &crate::image::ImageF32) -> Self {
        Self {
            min: map.min_value(),
            max: map.max_value(),
            mean: map.mean_value(),
        }
    }
}

/// Full diagnostics for one pipeline run.
#[derive(Clone, Debug, Serialize)]
pub struct DehazeReport {
    pub input_width: usize,
    pub input_height: usize,
    /// Estimated airlight triple; a statistic, not clamped to [0, 1].
    pub atmospheric_light: [f32; 3],
    pub raw_transmission: TransmissionStats,
    pub refined_transmission: TransmissionStats,
    pub timings: StageTimings,
}
