//! Pure Rust image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` (pure Rust decoders) |
//! | Laplacian | [`convolve_laplacian`](super::metrics::convolve_laplacian) on `f32` |

use super::backend::{BackendError, ImageBackend};
use super::metrics::convolve_laplacian;
use image::{DynamicImage, GrayImage, ImageReader};
use std::path::Path;

/// Extensions the corpus walk picks up. Matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Returns true if `path` has one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Backend built on the `image` crate.
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

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        // Sniff the format from content so misnamed files still decode
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn laplacian(&self, luma: &GrayImage) -> Result<Vec<f32>, BackendError> {
        if luma.width() == 0 || luma.height() == 0 {
            return Err(BackendError::Convolution("empty image".to_string()));
        }
        Ok(convolve_laplacian(luma))
    }
}
