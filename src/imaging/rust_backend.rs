//! Pure Rust image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only, no full decode) |
//! | Decode (PNG, JPEG, BMP, GIF, TIFF) | `image::ImageReader`, format from extension |
//! | Border canvas | `RgbImage` / `RgbaImage::from_pixel` filled black |
//! | Composite | `image::imageops::overlay` |
//! | Encode | `DynamicImage::write_to` in the source file's format |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::PadParams;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage, Rgba, RgbaImage, imageops};
use std::io::Cursor;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Format implied by the file extension; the file is re-encoded in it.
fn format_for(path: &Path) -> Result<ImageFormat, BackendError> {
    ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Unknown image format {}: {}", path.display(), e))
    })
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Draw `img` onto an opaque black canvas.
///
/// Images with alpha keep it, everything else is flattened to RGB so JPEG
/// and BMP can encode the result.
fn compose_border(img: &DynamicImage, params: &PadParams) -> DynamicImage {
    let (x, y) = (i64::from(params.offset_x), i64::from(params.offset_y));
    let (w, h) = (params.canvas.width, params.canvas.height);

    if img.color().has_alpha() {
        let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
        imageops::overlay(&mut canvas, &img.to_rgba8(), x, y);
        DynamicImage::ImageRgba8(canvas)
    } else {
        let mut canvas = RgbImage::from_pixel(w, h, Rgb([0, 0, 0]));
        imageops::overlay(&mut canvas, &img.to_rgb8(), x, y);
        DynamicImage::ImageRgb8(canvas)
    }
}

/// Encode fully in memory before touching the file so a failed encode keeps the original.
fn save_in_place(img: &DynamicImage, path: &Path, format: ImageFormat) -> Result<(), BackendError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    std::fs::write(path, buf.into_inner())?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn pad(&self, params: &PadParams) -> Result<(), BackendError> {
        let format = format_for(&params.path)?;
        let img = load_image(&params.path)?;
        let padded = compose_border(&img, params);
        save_in_place(&padded, &params.path, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{BorderSpec, PadOutcome, pad_card};
    use crate::test_helpers::{write_rgb_image, write_rgba_png};
    use tempfile::TempDir;

    #[test]
    fn identify_synthetic_png() {
        let tmp = TempDir::new().unwrap();
        let path = write_rgb_image(tmp.path(), "card.png", 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/card.png"));
        assert!(result.is_err());
    }

    #[test]
    fn export_size_png_gets_border() {
        let tmp = TempDir::new().unwrap();
        let path = write_rgb_image(tmp.path(), "hero.png", 1500, 2100);
        let original = image::open(&path).unwrap().to_rgb8();

        let outcome = pad_card(&RustBackend::new(), &path, &BorderSpec::default()).unwrap();
        assert!(matches!(outcome, PadOutcome::Padded { .. }));

        let padded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(padded.dimensions(), (1644, 2244));

        // Black everywhere outside the composited original
        assert_eq!(padded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(padded.get_pixel(70, 70), &Rgb([0, 0, 0]));
        assert_eq!(padded.get_pixel(1643, 2243), &Rgb([0, 0, 0]));
        // Right and bottom border are one pixel wider
        assert_eq!(padded.get_pixel(71 + 1500, 71 + 2100), &Rgb([0, 0, 0]));

        // Original content starts at (71, 71)
        for (x, y) in [(0, 0), (1, 0), (17, 33), (1499, 2099), (750, 1050)] {
            assert_eq!(
                padded.get_pixel(x + 71, y + 71),
                original.get_pixel(x, y),
                "pixel ({x}, {y}) moved"
            );
        }
    }

    #[test]
    fn other_sizes_are_byte_for_byte_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = write_rgb_image(tmp.path(), "villain.png", 800, 600);
        let before = std::fs::read(&path).unwrap();

        let outcome = pad_card(&RustBackend::new(), &path, &BorderSpec::default()).unwrap();
        assert!(matches!(outcome, PadOutcome::Untouched(_)));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn alpha_is_composited_over_black() {
        let tmp = TempDir::new().unwrap();
        let path = write_rgba_png(tmp.path(), "ghost.png", 4, 4, Rgba([255, 255, 255, 0]));
        let params = PadParams {
            path: path.clone(),
            canvas: Dimensions { width: 8, height: 8 },
            offset_x: 1,
            offset_y: 1,
        };

        RustBackend::new().pad(&params).unwrap();

        let padded = image::open(&path).unwrap();
        assert!(padded.color().has_alpha());
        let padded = padded.to_rgba8();
        assert_eq!(padded.dimensions(), (8, 8));
        // Fully transparent source leaves the black canvas showing
        assert_eq!(padded.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn jpeg_is_rewritten_as_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = write_rgb_image(tmp.path(), "card.jpg", 20, 30);
        let params = PadParams {
            path: path.clone(),
            canvas: Dimensions { width: 24, height: 34 },
            offset_x: 1,
            offset_y: 1,
        };

        RustBackend::new().pad(&params).unwrap();

        let reader = ImageReader::open(&path)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Jpeg));
        assert_eq!(reader.into_dimensions().unwrap(), (24, 34));
    }

    #[test]
    fn undecodable_file_errors_and_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        let params = PadParams {
            path: path.clone(),
            canvas: Dimensions { width: 10, height: 10 },
            offset_x: 0,
            offset_y: 0,
        };

        assert!(RustBackend::new().pad(&params).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"not a png");
    }
}
