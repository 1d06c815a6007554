//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two raw operations metric extraction
//! needs: decoding a file and convolving a luminance plane with the Laplacian
//! kernel. Everything else (downscaling, statistics) is pure code in
//! [`metrics`](super::metrics) built on top of the backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) on the `image` crate.

use image::{DynamicImage, GrayImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Convolution unavailable: {0}")]
    Convolution(String),
}

/// Original pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// `Sync` so a single backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Decode an image file into pixels.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Convolve a luminance plane with `[[0,1,0],[1,-4,1],[0,1,0]]`.
    ///
    /// Returns the response row-major, one value per input pixel.
    fn laplacian(&self, luma: &GrayImage) -> Result<Vec<f32>, BackendError>;
}
