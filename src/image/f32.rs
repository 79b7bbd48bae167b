//! Owned single-channel f32 scalar map in row-major layout.
//!
//! Used for the dark channel and the raw/refined transmission maps. Every
//! map produced by a pipeline stage shares the source image's (w, h).
#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Map width in pixels
    pub w: usize,
    /// Map height in pixels
    pub h: usize,
    /// Backing storage in row-major order (`len == w * h`)
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized map of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Construct a map filled with `v`.
    pub fn filled(w: usize, h: usize, v: f32) -> Self {
        Self {
            w,
            h,
            data: vec![v; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    /// Get the value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    /// Row slice of length `w`.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    /// Mutable row slice of length `w`.
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    /// Minimum value over the whole map (`f32::INFINITY` when empty).
    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Maximum value over the whole map (`f32::NEG_INFINITY` when empty).
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Arithmetic mean over the whole map (0 when empty).
    pub fn mean_value(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }
}
