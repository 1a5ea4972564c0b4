use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write an opaque gradient image; the extension picks the container.
pub fn write_rgb_image(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    img.save(path).unwrap();
}

/// Write a PNG with a real alpha channel (half-transparent stripes).
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x % 2 == 0 { 128 } else { 255 };
        Rgba([200, 100, 50, alpha])
    }));
    img.save(path).unwrap();
}

/// Write something that carries a JPEG magic number but cannot decode.
pub fn write_corrupt_image(path: &Path) {
    File::create(path)
        .unwrap()
        .write_all(b"\xFF\xD8\xFF\xE0 truncated beyond repair")
        .unwrap();
}
