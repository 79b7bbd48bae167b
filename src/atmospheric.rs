//! Atmospheric-light estimation.
//!
//! The brightest dark-channel pixels correspond to the most haze-opaque
//! regions (sky, distant objects), which best represent the pure airlight
//! color. The estimate is a statistic, not a pixel: each channel may exceed
//! any single source value and is intentionally not clamped.
use crate::image::{ImageF32, ImageRgbF32};

/// Fraction of dark-channel pixels treated as airlight candidates.
pub const AIRLIGHT_FRACTION: f32 = 0.001;

/// Estimate the atmospheric light from the source image and its dark channel.
///
/// Selection: let `num = floor(w·h·0.001)`, clamped to a minimum of 1 so the
/// estimate stays defined for small images (where the fraction rounds to
/// zero). Candidates are all pixels whose dark-channel value is at least the
/// value at ascending sort rank `count − num`; ties at the threshold are all
/// included, so the candidate set may exceed `num`. Each output channel is
/// the mean of the `num` largest candidate values of that channel,
/// independently per channel.
pub fn estimate_atmospheric_light(src: &ImageRgbF32, dark: &ImageF32) -> [f32; 3] {
    let count = dark.data.len();
    let num = ((count as f32 * AIRLIGHT_FRACTION).floor() as usize).max(1);

    let mut sorted = dark.data.clone();
    sorted.sort_by(f32::total_cmp);
    let threshold = sorted[count - num];

    let mut channels: [Vec<f32>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (i, &d) in dark.data.iter().enumerate() {
        if d >= threshold {
            let px = &src.data[i * 3..i * 3 + 3];
            for (c, values) in channels.iter_mut().enumerate() {
                values.push(px[c]);
            }
        }
    }

    let mut alight = [0.0f32; 3];
    for (c, values) in channels.iter_mut().enumerate() {
        values.sort_by(f32::total_cmp);
        // At least `num` values exceed the threshold by construction.
        let top = &values[values.len() - num..];
        let sum: f64 = top.iter().map(|&v| v as f64).sum();
        alight[c] = (sum / num as f64) as f32;
    }
    alight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dark_channel::dark_channel;

    #[test]
    fn uniform_image_yields_the_uniform_color() {
        // 3x3 all-equal case: num clamps to 1, every pixel ties at the
        // threshold, and the estimate must equal the single pixel value.
        let mut img = ImageRgbF32::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                img.set(x, y, [0.5, 0.5, 0.5]);
            }
        }
        let dark = dark_channel(&img, 1);
        let alight = estimate_atmospheric_light(&img, &dark);
        assert_eq!(alight, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn bright_haze_region_dominates_the_estimate() {
        // Dark foreground with one bright, low-saturation "sky" pixel whose
        // dark-channel value is the global maximum.
        let mut img = ImageRgbF32::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                img.set(x, y, [0.3, 0.05, 0.2]);
            }
        }
        img.set(3, 0, [0.9, 0.85, 0.8]);
        let dark = dark_channel(&img, 0);
        let alight = estimate_atmospheric_light(&img, &dark);
        assert_eq!(alight, [0.9, 0.85, 0.8]);
    }

    #[test]
    fn channels_are_ranked_independently_among_candidates() {
        // Two candidates tie at the dark-channel maximum; with num = 1 each
        // output channel takes its own largest candidate value.
        let mut img = ImageRgbF32::new(2, 1);
        img.set(0, 0, [0.9, 0.5, 0.5]);
        img.set(1, 0, [0.5, 0.8, 0.5]);
        let dark = dark_channel(&img, 0);
        // Both pixels have per-pixel min 0.5, so both are candidates.
        let alight = estimate_atmospheric_light(&img, &dark);
        assert_eq!(alight, [0.9, 0.8, 0.5]);
    }
}
