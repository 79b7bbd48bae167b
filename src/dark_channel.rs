//! Dark-channel estimation.
//!
//! The dark channel of a haze-free outdoor image is near zero outside sky
//! regions; haze lifts it towards the airlight. Each cell of the output is
//! the minimum channel value found anywhere within the clipped r-radius
//! window centered at that cell:
//!
//! `dark[i,j] = min over (di,dj) in [-r,r]² (in bounds) of perPixelMin[i+di,j+dj]`
//!
//! Computed as a two-step morphological erosion: collapse each pixel to the
//! minimum of its three channels, then apply the shared sliding-minimum
//! filter. Exact, not an approximation.
use crate::filters::min_filter;
use crate::image::{ImageF32, ImageRgbF32};

/// Collapse each pixel to the minimum of its three channels.
pub fn per_pixel_min(src: &ImageRgbF32) -> ImageF32 {
    let mut out = ImageF32::new(src.w, src.h);
    for (slot, px) in out.data.iter_mut().zip(src.data.chunks_exact(3)) {
        *slot = px[0].min(px[1]).min(px[2]);
    }
    out
}

/// Dark channel of `src` over a clipped window of the given radius.
pub fn dark_channel(src: &ImageRgbF32, radius: usize) -> ImageF32 {
    min_filter(&per_pixel_min(src), radius)
}
