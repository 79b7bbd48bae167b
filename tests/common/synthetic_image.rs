use dehaze::image::ImageRgbF32;

/// Uniform single-color image.
pub fn uniform_rgb(width: usize, height: usize, px: [f32; 3]) -> ImageRgbF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = ImageRgbF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, px);
        }
    }
    img
}

/// Deterministic textured scene with strong dark-channel structure: saturated
/// color blocks interleaved with near-black pixels, no haze applied.
pub fn textured_scene(width: usize, height: usize) -> ImageRgbF32 {
    let mut img = ImageRgbF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let phase = (x / 6 + y / 6) % 3;
            let px = match phase {
                0 => [0.85, 0.25, 0.05],
                1 => [0.1, 0.7, 0.2],
                _ => [0.15, 0.1, 0.6],
            };
            img.set(x, y, px);
        }
    }
    img
}

/// Composite a clear scene with haze: `I = J·t + A·(1 − t)` with constant
/// transmission and airlight.
pub fn hazy_composite(scene: &ImageRgbF32, t: f32, alight: [f32; 3]) -> ImageRgbF32 {
    let mut img = ImageRgbF32::new(scene.w, scene.h);
    for (dst, (src, a)) in img.data.iter_mut().zip(
        scene
            .data
            .iter()
            .zip(alight.iter().cycle()),
    ) {
        *dst = src * t + a * (1.0 - t);
    }
    img
}

/// A scene whose dark channel is uniformly low, so the estimated raw
/// transmission is close to 1 everywhere: constant low blue channel, a
/// regular grid of near-black red samples, and varying red/green texture.
pub fn no_haze_scene(width: usize, height: usize) -> ImageRgbF32 {
    let mut img = ImageRgbF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = if (x + y) % 4 == 0 {
                0.02
            } else {
                0.3 + 0.04 * ((x * 7 + y * 13) % 10) as f32
            };
            let g = 0.35 + 0.03 * ((x * 3 + y * 5) % 10) as f32;
            img.set(x, y, [r, g, 0.02]);
        }
    }
    img
}
