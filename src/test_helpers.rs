//! Shared test utilities for the aaa-curator test suite.
//!
//! Synthetic images with known metrics, file writers, and a corpus builder that
//! lays images out under a temp project root the way a real site does.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = corpus_with(&[
//!     ("site/assets/images/sharp.png", checkerboard(64, 64)),
//!     ("site/assets/images/flat.png", flat(64, 64, 90)),
//! ]);
//! ```

use image::{DynamicImage, GrayImage, ImageEncoder, Luma, RgbImage};
use std::path::Path;
use tempfile::TempDir;

use crate::report::ImageRecord;

// =========================================================================
// Synthetic images
// =========================================================================

/// Uniform gray image: zero contrast, zero sharpness.
pub fn flat(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
}

/// 1px black/white checkerboard: maximum contrast, very high sharpness.
pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, y| {
        Luma([if (x + y) % 2 == 0 { 255 } else { 0 }])
    }))
}

/// Left half black, right half white. `width` must be even for exact 127.5.
pub fn split_black_white(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, _| {
        Luma([if x < width / 2 { 0 } else { 255 }])
    }))
}

// =========================================================================
// File writers
// =========================================================================

pub fn write_png(path: &Path, img: &GrayImage) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a small valid JPEG with an RGB gradient.
pub fn write_gradient_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Corpus setup
// =========================================================================

/// Create a temp project root holding the given images as PNG files.
///
/// Paths are relative to the root and use `/` separators.
pub fn corpus_with(images: &[(&str, DynamicImage)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, img) in images {
        write_png(&tmp.path().join(rel), &img.to_luma8());
    }
    tmp
}

// =========================================================================
// Record builders
// =========================================================================

/// Shorthand for a measured record.
pub fn record(path: &str, contrast: f64, sharpness: f64, width: u32, height: u32) -> ImageRecord {
    ImageRecord {
        path: path.to_string(),
        contrast,
        sharpness,
        width,
        height,
    }
}
