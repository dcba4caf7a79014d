//! Shared test utilities: on-disk image and config fixtures.
//!
//! Images are synthesized on the fly so tests never depend on checked-in
//! binaries. The `write_*` helpers return the path they wrote.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::quantity::QuantitySource;
use crate::types::CardCandidate;

/// Write an RGB gradient image, format chosen by `name`'s extension.
///
/// No pixel is pure black, so border pixels are easy to tell apart.
pub fn write_rgb_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(&path).unwrap();
    path
}

/// Write a PNG filled with a single RGBA pixel value.
pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32, pixel: Rgba<u8>) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, pixel).save(&path).unwrap();
    path
}

/// Write a config file with the given lines.
pub fn write_config(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("cards.cfg");
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Build a candidate without touching the filesystem.
pub fn candidate(path: &str, quantity: u32) -> CardCandidate {
    let path = PathBuf::from(path);
    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    CardCandidate {
        path,
        file_name,
        extension,
        quantity,
        quantity_source: QuantitySource::Default,
    }
}
