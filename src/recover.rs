//! Scene radiance recovery.
//!
//! Inverts the haze model `I(x) = J(x)·t(x) + A·(1 − t(x))` per pixel and
//! channel: `J = (I − A) / max(t, t0) + A`. The floor `t0` bounds the
//! division in dense haze; flooring happens on a local read of the refined
//! map, never mutating the refiner's output. Recovered values are clamped to
//! [0, 1] (saturating, not wrapping) before the codec scales them to the
//! display range. Out-of-range values here are routine, not errors.
use crate::image::{ImageF32, ImageRgbF32};
use rayon::prelude::*;

/// Recover the haze-free radiance from the source image, refined
/// transmission map and atmospheric light.
pub fn recover_radiance(
    src: &ImageRgbF32,
    transmission: &ImageF32,
    alight: [f32; 3],
    t0: f32,
) -> ImageRgbF32 {
    let mut out = ImageRgbF32::new(src.w, src.h);
    out.data
        .par_chunks_mut(src.w * 3)
        .enumerate()
        .for_each(|(y, out_row)| {
            let src_row = src.row(y);
            let tran_row = transmission.row(y);
            for x in 0..src.w {
                let t = tran_row[x].max(t0);
                for c in 0..3 {
                    let i = x * 3 + c;
                    let j = (src_row[i] - alight[c]) / t + alight[c];
                    out_row[i] = j.clamp(0.0, 1.0);
                }
            }
        });
    out
}
