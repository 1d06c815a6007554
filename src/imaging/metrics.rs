//! Quality metrics for a single image.
//!
//! Two scalar proxies are computed on a downscaled luminance copy:
//!
//! - **Contrast**: RMS contrast, the population standard deviation of the 8-bit
//!   luminance values. Ranges over `[0, 127.5]`.
//!
//! Luminance uses the ITU-R 601-2 weights (`L = R*299/1000 + G*587/1000 +
//! B*114/1000`) in 16-bit fixed point, rounded to nearest. Alpha is ignored.
//! - **Sharpness**: variance of the Laplacian response. Near zero for flat or
//!   blurred images, large for fine detail.
//!
//! The downscale bounds per-image cost on large photos. The reported width and
//! height are always those of the original image.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{ANALYSIS_BOUNDS, calculate_fit_dimensions};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use std::path::Path;

/// Metrics for one successfully decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    pub contrast: f64,
    pub sharpness: f64,
    /// Dimensions of the original, not the analysis copy.
    pub dimensions: Dimensions,
}

/// Decode `path` and measure it.
pub fn measure_file(
    backend: &impl ImageBackend,
    path: &Path,
) -> Result<ImageMetrics, BackendError> {
    let img = backend.decode(path)?;
    Ok(extract(backend, &img))
}

/// Measure an already decoded image.
///
/// Sharpness falls back to `0.0` when the backend cannot convolve.
pub fn extract(backend: &impl ImageBackend, img: &DynamicImage) -> ImageMetrics {
    let dimensions = Dimensions {
        width: img.width(),
        height: img.height(),
    };
    let luma = analysis_luma(img);

    let contrast = rms_contrast(&luma);
    let sharpness = match backend.laplacian(&luma) {
        Ok(response) => variance(response.iter().map(|&v| v as f64)),
        Err(e) => {
            log::debug!("sharpness unavailable, using 0.0: {e}");
            0.0
        }
    };

    ImageMetrics {
        contrast,
        sharpness,
        dimensions,
    }
}

/// Shrink into [`ANALYSIS_BOUNDS`] with Lanczos3, then reduce to luminance.
fn analysis_luma(img: &DynamicImage) -> GrayImage {
    let (w, h) = calculate_fit_dimensions((img.width(), img.height()), ANALYSIS_BOUNDS);
    let rgb = if (w, h) == (img.width(), img.height()) {
        img.to_rgb8()
    } else {
        img.resize_exact(w, h, FilterType::Lanczos3).to_rgb8()
    };
    rgb_to_luma(&rgb)
}

/// Reduce an RGB plane with [`luma_601`].
pub fn rgb_to_luma(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma_601(r, g, b)])
    })
}

/// ITU-R 601-2 luma. The weights sum to `1 << 16`, so grey maps to itself.
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
    (weighted >> 16) as u8
}

/// Population standard deviation of luminance.
pub fn rms_contrast(luma: &GrayImage) -> f64 {
    variance(luma.as_raw().iter().map(|&v| v as f64)).sqrt()
}

/// Convolve with the 4-neighbour Laplacian kernel in `f32`.
///
/// Out-of-range neighbours reflect onto the border pixel, so the response has
/// one value per input pixel.
pub fn convolve_laplacian(luma: &GrayImage) -> Vec<f32> {
    let (w, h) = luma.dimensions();
    let raw = luma.as_raw();
    let at = |x: u32, y: u32| raw[(y * w + x) as usize] as f32;

    let mut response = Vec::with_capacity(raw.len());
    for y in 0..h {
        let up = y.saturating_sub(1);
        let down = (y + 1).min(h - 1);
        for x in 0..w {
            let left = x.saturating_sub(1);
            let right = (x + 1).min(w - 1);
            let value =
                at(x, up) + at(x, down) + at(left, y) + at(right, y) - 4.0 * at(x, y);
            response.push(value);
        }
    }
    response
}

/// Population variance, `0.0` for an empty sequence.
fn variance(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let (count, sum) = values.clone().fold((0u64, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    values.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64
}
