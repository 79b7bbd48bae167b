mod f32;
mod io;
mod rgb;

pub use self::f32::ImageF32;
pub use self::io::{load_rgb_image, save_grayscale_f32, save_rgb_image, write_json_file};
pub use self::rgb::ImageRgbF32;
