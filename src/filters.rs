//! Shared windowed-filtering primitives.
//!
//! - `min_filter`: exact minimum over a clipped (2r+1)×(2r+1) window,
//!   implemented as two separable sliding-minimum passes with a monotonic
//!   deque. O(W·H) regardless of radius, identical results to the naive
//!   O(W·H·r²) window scan.
//! - `box_mean`: mean over the same clipped window via a summed-area table
//!   with f64 accumulation, fixing the floating-point reduction order.
//!
//! Border policy everywhere: windows are clipped at image bounds, never
//! padded, so the effective window shrinks at edges.
use crate::image::ImageF32;
use std::collections::VecDeque;

/// Minimum filter over a clipped square window of the given radius.
///
/// The rectangular minimum is separable: a horizontal sliding minimum per
/// row followed by a vertical pass per column.
pub fn min_filter(src: &ImageF32, radius: usize) -> ImageF32 {
    let mut horiz = ImageF32::new(src.w, src.h);
    let mut line = vec![0.0f32; src.w.max(src.h)];
    for y in 0..src.h {
        sliding_min(src.row(y), radius, &mut line[..src.w]);
        horiz.row_mut(y).copy_from_slice(&line[..src.w]);
    }

    let mut out = ImageF32::new(src.w, src.h);
    let mut column = vec![0.0f32; src.h];
    for x in 0..src.w {
        for y in 0..src.h {
            column[y] = horiz.get(x, y);
        }
        sliding_min(&column, radius, &mut line[..src.h]);
        for y in 0..src.h {
            out.set(x, y, line[y]);
        }
    }
    out
}

/// 1D sliding minimum over a clipped window `[i-r, i+r] ∩ [0, n)`.
///
/// Monotonic deque of candidate indices: values enter strictly increasing,
/// the front is always the window minimum.
fn sliding_min(values: &[f32], radius: usize, out: &mut [f32]) {
    debug_assert_eq!(values.len(), out.len());
    let n = values.len();
    let mut candidates: VecDeque<usize> = VecDeque::new();
    for i in 0..n + radius {
        if i < n {
            while candidates
                .back()
                .is_some_and(|&j| values[j] >= values[i])
            {
                candidates.pop_back();
            }
            candidates.push_back(i);
        }
        if i >= radius {
            let center = i - radius;
            while candidates.front().is_some_and(|&j| j + radius < center) {
                candidates.pop_front();
            }
            if let Some(&j) = candidates.front() {
                out[center] = values[j];
            }
        }
    }
}

/// Box-mean filter over a clipped square window of the given radius.
///
/// Uses an integral image so every window mean is O(1); the table is built
/// sequentially in f64, which fixes the summation order and keeps the
/// result deterministic under any later parallel traversal.
pub fn box_mean(src: &ImageF32, radius: usize) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut integral = vec![0.0f64; (w + 1) * (h + 1)];
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            integral[(y + 1) * (w + 1) + (x + 1)] = row[x] as f64
                + integral[y * (w + 1) + (x + 1)]
                + integral[(y + 1) * (w + 1) + x]
                - integral[y * (w + 1) + x];
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(h);
        let out_row = out.row_mut(y);
        for (x, slot) in out_row.iter_mut().enumerate() {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(w);
            let sum = integral[y1 * (w + 1) + x1] - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0]
                + integral[y0 * (w + 1) + x0];
            let count = ((y1 - y0) * (x1 - x0)) as f64;
            *slot = (sum / count) as f32;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference implementation: direct scan of the clipped window.
    fn naive_min_filter(src: &ImageF32, radius: usize) -> ImageF32 {
        let mut out = ImageF32::new(src.w, src.h);
        for y in 0..src.h {
            for x in 0..src.w {
                let y0 = y.saturating_sub(radius);
                let y1 = (y + radius).min(src.h - 1);
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(src.w - 1);
                let mut m = f32::INFINITY;
                for yy in y0..=y1 {
                    for xx in x0..=x1 {
                        m = m.min(src.get(xx, yy));
                    }
                }
                out.set(x, y, m);
            }
        }
        out
    }

    /// Deterministic pseudo-random map (no RNG dependency needed).
    fn scrambled_map(w: usize, h: usize, seed: u32) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        let mut state = seed;
        for v in img.data.iter_mut() {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            *v = (state >> 8) as f32 / (1u32 << 24) as f32;
        }
        img
    }

    #[test]
    fn sliding_min_matches_naive_window_scan() {
        for &(w, h) in &[(1usize, 1usize), (5, 3), (17, 11), (32, 32)] {
            let img = scrambled_map(w, h, 7 + w as u32);
            for radius in [0usize, 1, 2, 3, 7, 40] {
                let fast = min_filter(&img, radius);
                let naive = naive_min_filter(&img, radius);
                assert_eq!(
                    fast.data, naive.data,
                    "mismatch at {w}x{h} radius={radius}"
                );
            }
        }
    }

    #[test]
    fn min_filter_is_monotonic_in_radius() {
        let img = scrambled_map(24, 18, 42);
        let mut previous = min_filter(&img, 0);
        for radius in 1..6 {
            let current = min_filter(&img, radius);
            for (c, p) in current.data.iter().zip(previous.data.iter()) {
                assert!(c <= p, "larger window must not increase the minimum");
            }
            previous = current;
        }
    }

    #[test]
    fn box_mean_preserves_constant_maps() {
        let img = ImageF32::filled(13, 9, 0.37);
        let mean = box_mean(&img, 4);
        for &v in &mean.data {
            assert!((v - 0.37).abs() < 1e-6);
        }
    }

    #[test]
    fn box_mean_clips_windows_at_borders() {
        // 3x1 map [0, 3, 6], radius 1: corner windows hold two values.
        let img = ImageF32 {
            w: 3,
            h: 1,
            data: vec![0.0, 3.0, 6.0],
        };
        let mean = box_mean(&img, 1);
        assert!((mean.data[0] - 1.5).abs() < 1e-6);
        assert!((mean.data[1] - 3.0).abs() < 1e-6);
        assert!((mean.data[2] - 4.5).abs() < 1e-6);
    }
}
