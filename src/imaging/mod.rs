//! Image decoding and quality measurement — pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG) |
//! | **Downscale** | `resize_exact` with Lanczos3 into 600×400 |
//! | **Contrast** | std deviation of ITU-R 601-2 luma |
//! | **Sharpness** | variance of the 3×3 Laplacian response |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Metrics**: contrast/sharpness extraction on top of a backend

pub mod backend;
mod calculations;
pub mod metrics;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{ANALYSIS_BOUNDS, calculate_fit_dimensions};
pub use metrics::{ImageMetrics, extract, luma_601, measure_file};
pub use rust_backend::{RustBackend, SUPPORTED_EXTENSIONS, is_supported_image};
