#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod params;
pub mod pipeline;

// Stage modules – public for tools and advanced users, but considered
// unstable internals.
pub mod atmospheric;
pub mod dark_channel;
pub mod filters;
pub mod guided;
pub mod recover;
pub mod transmission;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::error::DehazeError;
pub use crate::params::DehazeParams;
pub use crate::pipeline::{dehaze, DehazeOutput, Dehazer};

// Diagnostics returned by the pipeline.
pub use crate::diagnostics::{DehazeReport, StageTimings, TransmissionStats};

// Refinement seam for custom edge-aware smoothers.
pub use crate::guided::{GuidedFilter, TransmissionRefiner};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dehaze::prelude::*;
///
/// # fn main() -> Result<(), DehazeError> {
/// let src = load_rgb_image(std::path::Path::new("hazy.jpg"))?;
/// let out = Dehazer::new(DehazeParams::default()).process(&src)?;
/// save_rgb_image(&out.image, std::path::Path::new("clear.png"))?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{load_rgb_image, save_rgb_image, ImageF32, ImageRgbF32};
    pub use crate::{DehazeError, DehazeOutput, DehazeParams, Dehazer};
}
