//! Edge-aware transmission refinement via the color guided filter.
//!
//! The raw transmission map is patch-quantized, which causes halos around
//! object boundaries in the recovered image. The guided filter fits, per
//! window, a local linear relation between the guidance image and the target
//! map: with Σ the 3×3 covariance of the guide channels and `cov` the
//! guide/target covariance vector,
//!
//! `a = (Σ + ε·I)⁻¹ · cov`, `b = mean(target) − a·mean(guide)`,
//!
//! then averages the per-pixel `(a, b)` planes and evaluates
//! `refined = mean(a)·guide + mean(b)`. The full covariance-matrix
//! formulation (one 3×3 solve per pixel, not three scalar filters) is what
//! gives the filter its edge sensitivity for color guides.
//!
//! All windowed means are clipped-border box means over summed-area tables,
//! so the summation order is fixed; the per-pixel solve is row-parallel.
//!
//! Complexity: 17 box filters plus one LU solve per pixel, O(W·H) total.
use crate::filters::box_mean;
use crate::image::{ImageF32, ImageRgbF32};
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

/// Seam for the refinement stage: any edge-aware smoother that follows the
/// guidance image's edges while smoothing flat regions is an acceptable
/// substitute for the guided filter.
pub trait TransmissionRefiner: Send + Sync {
    /// Refine `target` using `guide` as the structural reference. The output
    /// has the same dimensions as `target`.
    fn refine(&self, guide: &ImageRgbF32, target: &ImageF32) -> ImageF32;
}

/// The standard local-linear guided filter with a color guidance image.
#[derive(Clone, Debug)]
pub struct GuidedFilter {
    /// Box radius of the local windows.
    pub radius: usize,
    /// Regularization added to the guide covariance diagonal.
    pub eps: f32,
}

impl GuidedFilter {
    pub fn new(radius: usize, eps: f32) -> Self {
        Self { radius, eps }
    }
}

impl TransmissionRefiner for GuidedFilter {
    fn refine(&self, guide: &ImageRgbF32, target: &ImageF32) -> ImageF32 {
        guided_filter_color(guide, target, self.radius, self.eps)
    }
}

/// Indices of the six unique entries of the symmetric guide covariance.
const UPPER_PAIRS: [(usize, usize); 6] = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)];

/// Apply the color guided filter to a scalar map.
pub fn guided_filter_color(
    guide: &ImageRgbF32,
    target: &ImageF32,
    radius: usize,
    eps: f32,
) -> ImageF32 {
    let (w, h) = (target.w, target.h);
    let planes = [
        channel_plane(guide, 0),
        channel_plane(guide, 1),
        channel_plane(guide, 2),
    ];

    let mean_guide = [
        box_mean(&planes[0], radius),
        box_mean(&planes[1], radius),
        box_mean(&planes[2], radius),
    ];
    let mean_target = box_mean(target, radius);
    let corr_gt = [
        box_mean(&product(&planes[0], target), radius),
        box_mean(&product(&planes[1], target), radius),
        box_mean(&product(&planes[2], target), radius),
    ];
    let corr_gg: Vec<ImageF32> = UPPER_PAIRS
        .iter()
        .map(|&(c, d)| box_mean(&product(&planes[c], &planes[d]), radius))
        .collect();

    // Per-pixel linear coefficients, solved row-parallel. Stored interleaved
    // as [a0, a1, a2, b] so one buffer covers all four planes.
    let mut coeffs = vec![[0.0f32; 4]; w * h];
    coeffs
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                let i = y * w + x;
                let mg = Vector3::new(
                    mean_guide[0].data[i],
                    mean_guide[1].data[i],
                    mean_guide[2].data[i],
                );
                let mt = mean_target.data[i];

                let mut var = [0.0f32; 6];
                for (k, &(c, d)) in UPPER_PAIRS.iter().enumerate() {
                    var[k] = corr_gg[k].data[i] - mg[c] * mg[d];
                }
                #[rustfmt::skip]
                let sigma = Matrix3::new(
                    var[0] + eps, var[1],       var[2],
                    var[1],       var[3] + eps, var[4],
                    var[2],       var[4],       var[5] + eps,
                );
                let cov = Vector3::new(
                    corr_gt[0].data[i] - mg[0] * mt,
                    corr_gt[1].data[i] - mg[1] * mt,
                    corr_gt[2].data[i] - mg[2] * mt,
                );

                // ε > 0 keeps sigma positive definite; the fallback only
                // guards pathological float inputs.
                let a = sigma.lu().solve(&cov).unwrap_or_else(Vector3::zeros);
                let b = mt - a.dot(&mg);
                *slot = [a.x, a.y, a.z, b];
            }
        });

    let mut a_planes = [
        ImageF32::new(w, h),
        ImageF32::new(w, h),
        ImageF32::new(w, h),
    ];
    let mut b_plane = ImageF32::new(w, h);
    for (i, quad) in coeffs.iter().enumerate() {
        for (c, plane) in a_planes.iter_mut().enumerate() {
            plane.data[i] = quad[c];
        }
        b_plane.data[i] = quad[3];
    }

    let mean_a = [
        box_mean(&a_planes[0], radius),
        box_mean(&a_planes[1], radius),
        box_mean(&a_planes[2], radius),
    ];
    let mean_b = box_mean(&b_plane, radius);

    let mut refined = ImageF32::new(w, h);
    for (i, slot) in refined.data.iter_mut().enumerate() {
        let px = &guide.data[i * 3..i * 3 + 3];
        *slot = mean_a[0].data[i] * px[0]
            + mean_a[1].data[i] * px[1]
            + mean_a[2].data[i] * px[2]
            + mean_b.data[i];
    }
    refined
}

fn channel_plane(src: &ImageRgbF32, c: usize) -> ImageF32 {
    let mut out = ImageF32::new(src.w, src.h);
    for (slot, px) in out.data.iter_mut().zip(src.data.chunks_exact(3)) {
        *slot = px[c];
    }
    out
}

fn product(a: &ImageF32, b: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(a.w, a.h);
    for ((slot, &x), &y) in out.data.iter_mut().zip(a.data.iter()).zip(b.data.iter()) {
        *slot = x * y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_rgb(w: usize, h: usize, px: [f32; 3]) -> ImageRgbF32 {
        let mut img = ImageRgbF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, px);
            }
        }
        img
    }

    fn blocky_map(w: usize, h: usize) -> ImageF32 {
        let mut map = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                map.set(x, y, if (x / 4 + y / 4) % 2 == 0 { 0.2 } else { 0.8 });
            }
        }
        map
    }

    #[test]
    fn flat_guidance_degenerates_to_a_box_average() {
        // Zero guide variance makes a ≡ 0 and b = mean(target), so the
        // output is the box mean of the per-window means.
        let guide = uniform_rgb(16, 12, [0.5, 0.5, 0.5]);
        let target = blocky_map(16, 12);
        let radius = 3;
        let refined = guided_filter_color(&guide, &target, radius, 1e-3);
        let expected = box_mean(&box_mean(&target, radius), radius);
        for (r, e) in refined.data.iter().zip(expected.data.iter()) {
            assert!((r - e).abs() < 1e-4, "refined={r} expected={e}");
        }
    }

    #[test]
    fn constant_target_passes_through() {
        let mut guide = uniform_rgb(12, 12, [0.0, 0.0, 0.0]);
        for y in 0..12 {
            for x in 0..12 {
                guide.set(x, y, [x as f32 / 12.0, y as f32 / 12.0, 0.3]);
            }
        }
        let target = ImageF32::filled(12, 12, 0.42);
        let refined = guided_filter_color(&guide, &target, 2, 1e-3);
        for &v in &refined.data {
            assert!((v - 0.42).abs() < 1e-3);
        }
    }

    #[test]
    fn output_follows_guidance_edges() {
        // Guide and target share a vertical step; the refined map must keep
        // the step much sharper than a plain box blur would.
        let w = 20;
        let h = 10;
        let mut guide = ImageRgbF32::new(w, h);
        let mut target = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0.1 } else { 0.9 };
                guide.set(x, y, [v, v, v]);
                target.set(x, y, v);
            }
        }
        let refined = guided_filter_color(&guide, &target, 3, 1e-4);
        let left = refined.get(w / 2 - 2, h / 2);
        let right = refined.get(w / 2 + 1, h / 2);
        assert!(
            right - left > 0.5,
            "edge washed out: left={left} right={right}"
        );
    }
}
