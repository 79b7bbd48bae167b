//! I/O helpers at the codec boundary.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an `ImageRgbF32` normalized
//!   to [0, 1].
//! - `save_rgb_image`: write an `ImageRgbF32` (values in [0, 1]) to disk,
//!   scaling by 255 with saturating clamping.
//! - `save_grayscale_f32`: write a scalar map to a grayscale PNG, useful for
//!   inspecting the dark-channel and transmission maps.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageRgbF32};
use crate::error::DehazeError;
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to RGB and normalize to [0, 1].
pub fn load_rgb_image(path: &Path) -> Result<ImageRgbF32, DehazeError> {
    let decoded = image::open(path)
        .map_err(|source| DehazeError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let w = decoded.width() as usize;
    let h = decoded.height() as usize;
    if w == 0 || h == 0 {
        return Err(DehazeError::InvalidInput(format!(
            "{} decoded to a {w}x{h} image",
            path.display()
        )));
    }
    let mut out = ImageRgbF32::new(w, h);
    for (dst, &src) in out.data.iter_mut().zip(decoded.as_raw().iter()) {
        *dst = src as f32 / 255.0;
    }
    Ok(out)
}

/// Save an RGB float image, mapping [0, 1] to [0, 255] with saturation.
pub fn save_rgb_image(img: &ImageRgbF32, path: &Path) -> Result<(), DehazeError> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(img.w as u32, img.h as u32);
    for y in 0..img.h {
        for x in 0..img.w {
            let [r, g, b] = img.get(x, y);
            out.put_pixel(x as u32, y as u32, Rgb([to_u8(r), to_u8(g), to_u8(b)]));
        }
    }
    out.save(path).map_err(|source| DehazeError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a scalar map to a grayscale PNG, mapping [0, 1] to [0, 255].
pub fn save_grayscale_f32(map: &ImageF32, path: &Path) -> Result<(), DehazeError> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(map.w as u32, map.h as u32);
    for y in 0..map.h {
        for (x, &v) in map.row(y).iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([to_u8(v)]));
        }
    }
    out.save(path).map_err(|source| DehazeError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DehazeError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        DehazeError::InvalidInput(format!("failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json).map_err(|source| DehazeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn ensure_parent_dir(path: &Path) -> Result<(), DehazeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| DehazeError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
