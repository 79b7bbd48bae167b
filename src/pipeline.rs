//! Dehazing pipeline orchestrating the five stages end to end.
//!
//! The [`Dehazer`] exposes a simple API: feed a normalized RGB image and get
//! the recovered image plus intermediate maps and timing diagnostics. Data
//! flows strictly forward, each stage a pure transform of its explicit
//! inputs:
//!
//! 1. Dark channel (`dark_channel`)
//! 2. Atmospheric light (`estimate_atmospheric_light`)
//! 3. Raw transmission (`estimate_transmission`)
//! 4. Edge-aware refinement (the configured [`TransmissionRefiner`])
//! 5. Radiance recovery (`recover_radiance`)
//!
//! Typical usage:
//! ```no_run
//! use dehaze::{DehazeParams, Dehazer};
//! use dehaze::image::load_rgb_image;
//!
//! # fn example() -> Result<(), dehaze::DehazeError> {
//! let src = load_rgb_image(std::path::Path::new("hazy.jpg"))?;
//! let out = Dehazer::new(DehazeParams::default()).process(&src)?;
//! println!("airlight = {:?}", out.report.atmospheric_light);
//! # Ok(())
//! # }
//! ```
use crate::atmospheric::estimate_atmospheric_light;
use crate::dark_channel::dark_channel;
use crate::diagnostics::{DehazeReport, StageTimings, TransmissionStats};
use crate::error::DehazeError;
use crate::guided::{GuidedFilter, TransmissionRefiner};
use crate::image::{ImageF32, ImageRgbF32};
use crate::params::DehazeParams;
use crate::recover::recover_radiance;
use crate::transmission::estimate_transmission;
use log::debug;
use std::time::Instant;

/// Output of a completed pipeline run: the recovered image, every
/// intermediate map (read-only hand-offs, useful for inspection), and the
/// diagnostics report.
#[derive(Debug)]
pub struct DehazeOutput {
    pub image: ImageRgbF32,
    pub dark_channel: ImageF32,
    pub raw_transmission: ImageF32,
    pub refined_transmission: ImageF32,
    pub report: DehazeReport,
}

/// Single-image dehazer parameterized by [`DehazeParams`] and a pluggable
/// transmission refiner (the guided filter by default).
pub struct Dehazer {
    params: DehazeParams,
    refiner: Box<dyn TransmissionRefiner>,
}

impl Dehazer {
    /// Create a dehazer with the default guided-filter refiner.
    pub fn new(params: DehazeParams) -> Self {
        let refiner = Box::new(GuidedFilter::new(params.guided_radius, params.eps));
        Self { params, refiner }
    }

    /// Create a dehazer with a custom edge-aware refiner.
    pub fn with_refiner(params: DehazeParams, refiner: Box<dyn TransmissionRefiner>) -> Self {
        Self { params, refiner }
    }

    /// Run the full pipeline on a normalized [0, 1] RGB image.
    ///
    /// Parameters and input are validated before any stage runs; there is no
    /// partial-result mode.
    pub fn process(&self, src: &ImageRgbF32) -> Result<DehazeOutput, DehazeError> {
        self.params.validate()?;
        if src.w == 0 || src.h == 0 {
            return Err(DehazeError::InvalidInput(format!(
                "image dimensions {}x{}",
                src.w, src.h
            )));
        }
        if src.data.len() != src.w * src.h * 3 {
            return Err(DehazeError::InvalidInput(format!(
                "buffer holds {} values, expected {} for a 3-channel {}x{} image",
                src.data.len(),
                src.w * src.h * 3,
                src.w,
                src.h
            )));
        }

        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        let stage_start = Instant::now();
        let dark = dark_channel(src, self.params.dark_radius);
        timings.dark_channel_ms = elapsed_ms(stage_start);
        debug!("dark channel: {:.3} ms", timings.dark_channel_ms);

        let stage_start = Instant::now();
        let alight = estimate_atmospheric_light(src, &dark);
        timings.atmospheric_ms = elapsed_ms(stage_start);
        debug!(
            "atmospheric light: {alight:?} ({:.3} ms)",
            timings.atmospheric_ms
        );

        let stage_start = Instant::now();
        let raw = estimate_transmission(src, alight, self.params.omega, self.params.dark_radius)?;
        timings.transmission_ms = elapsed_ms(stage_start);
        debug!("raw transmission: {:.3} ms", timings.transmission_ms);

        let stage_start = Instant::now();
        let refined = self.refiner.refine(src, &raw);
        timings.refine_ms = elapsed_ms(stage_start);
        debug!("refinement: {:.3} ms", timings.refine_ms);

        let stage_start = Instant::now();
        let image = recover_radiance(src, &refined, alight, self.params.t0);
        timings.recover_ms = elapsed_ms(stage_start);
        debug!("recovery: {:.3} ms", timings.recover_ms);

        timings.total_ms = elapsed_ms(total_start);

        let report = DehazeReport {
            input_width: src.w,
            input_height: src.h,
            atmospheric_light: alight,
            raw_transmission: TransmissionStats::of(&raw),
            refined_transmission: TransmissionStats::of(&refined),
            timings,
        };

        Ok(DehazeOutput {
            image,
            dark_channel: dark,
            raw_transmission: raw,
            refined_transmission: refined,
            report,
        })
    }
}

/// Convenience wrapper: run the pipeline once with the given parameters.
pub fn dehaze(src: &ImageRgbF32, params: &DehazeParams) -> Result<DehazeOutput, DehazeError> {
    Dehazer::new(params.clone()).process(src)
}

#[inline]
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
