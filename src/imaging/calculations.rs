//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Bounding box every image is shrunk into before metrics are computed.
pub const ANALYSIS_BOUNDS: (u32, u32) = (600, 400);

/// Calculate dimensions that fit `source` inside `bounds`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged — this never enlarges.
/// Each output dimension is at least 1px.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum allowed (width, height)
///
/// # Examples
/// ```
/// # use aaa_curator::imaging::calculate_fit_dimensions;
/// // 2000x1500 landscape into 600x400 → height-limited
/// assert_eq!(calculate_fit_dimensions((2000, 1500), (600, 400)), (533, 400));
///
/// // Already small enough → untouched
/// assert_eq!(calculate_fit_dimensions((320, 200), (600, 400)), (320, 200));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}
