//! Owned interleaved RGB f32 image in row-major layout.
//!
//! Channel values are normalized to [0, 1] by the I/O layer before any stage
//! runs. The buffer is immutable for the lifetime of a pipeline run; every
//! derived map shares its (w, h).
#[derive(Clone, Debug)]
pub struct ImageRgbF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage, RGB interleaved, row-major (`len == w * h * 3`)
    pub data: Vec<f32>,
}

impl ImageRgbF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h * 3],
        }
    }

    #[inline]
    /// Convert (x, y) to the linear index of the pixel's red component.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * 3
    }

    #[inline]
    /// Get the RGB triple at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    /// Set the RGB triple at (x, y).
    pub fn set(&mut self, x: usize, y: usize, px: [f32; 3]) {
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&px);
    }

    #[inline]
    /// Interleaved row slice (`w * 3` values).
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w * 3;
        &self.data[start..start + self.w * 3]
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.w * self.h
    }
}
