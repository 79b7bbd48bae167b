//! Raw transmission estimation.
//!
//! In the haze model `I(x) = J(x)·t(x) + A·(1 − t(x))`, the transmission
//! `t(x)` is the fraction of scene-reflected light reaching the sensor
//! unscattered. Applying the dark-channel prior to the airlight-normalized
//! image gives
//!
//! `tran[i,j] = 1 − ω · min over window of (min over channels of src/A[c])`
//!
//! with the channel-wise division performed before the spatial minimum. The
//! result is patch-quantized ("blocky"); the guided filter refines it.
use crate::error::DehazeError;
use crate::filters::min_filter;
use crate::image::{ImageF32, ImageRgbF32};

/// Estimate the raw transmission map.
///
/// Output values lie in `[1−ω, 1]` by construction. Any non-positive
/// atmospheric-light channel makes the division undefined and is reported as
/// [`DehazeError::DegenerateAtmosphericLight`] instead of silently producing
/// infinities.
pub fn estimate_transmission(
    src: &ImageRgbF32,
    alight: [f32; 3],
    omega: f32,
    radius: usize,
) -> Result<ImageF32, DehazeError> {
    for (channel, &value) in alight.iter().enumerate() {
        if value <= 0.0 {
            return Err(DehazeError::DegenerateAtmosphericLight { channel, value });
        }
    }

    // Per-pixel minimum of the airlight-normalized channels.
    let mut ratio = ImageF32::new(src.w, src.h);
    for (slot, px) in ratio.data.iter_mut().zip(src.data.chunks_exact(3)) {
        *slot = (px[0] / alight[0])
            .min(px[1] / alight[1])
            .min(px[2] / alight[2]);
    }

    let mut tran = min_filter(&ratio, radius);
    for v in tran.data.iter_mut() {
        *v = 1.0 - omega * *v;
    }
    Ok(tran)
}
