//! AAA selection: threshold, deduplicate, rank, and rewrite to web paths.
//!
//! Stage 2a of the curation pipeline. Consumes the whole quality report.
//!
//! ## Policy
//!
//! A record is selected if either rule holds (all comparisons inclusive):
//!
//! 1. **Large and decent**: `width >= 1920` and (`contrast >= 25` or `sharpness >= 50`)
//! 2. **Exceptional**: `contrast >= 80` and `sharpness >= 200`
//!
//! Selected records are deduplicated by path (the last row wins, holding the
//! slot of the first), then ranked by `contrast + sharpness / 50` descending.
//! Equal scores keep report order.
//!
//! Sentinel rows never qualify: their width is 0 and their metrics negative.

use crate::report::{ImageRecord, QualityReport, parse_report};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rule 1 minimum width.
pub const MIN_WIDTH: u32 = 1920;
/// Rule 1 contrast floor (either this or [`MIN_SHARPNESS`]).
pub const MIN_CONTRAST: f64 = 25.0;
/// Rule 1 sharpness floor.
pub const MIN_SHARPNESS: f64 = 50.0;
/// Rule 2 contrast floor.
pub const HIGH_CONTRAST: f64 = 80.0;
/// Rule 2 sharpness floor.
pub const HIGH_SHARPNESS: f64 = 200.0;
/// Sharpness is divided by this before being added to contrast.
pub const SHARPNESS_WEIGHT_DIVISOR: f64 = 50.0;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Quality report not found: {0}")]
    ReportNotFound(PathBuf),
    #[error("Failed to read quality report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// True if `record` passes either selection rule.
pub fn is_selected(record: &ImageRecord) -> bool {
    let large_and_decent = record.width >= MIN_WIDTH
        && (record.contrast >= MIN_CONTRAST || record.sharpness >= MIN_SHARPNESS);
    let exceptional = record.contrast >= HIGH_CONTRAST && record.sharpness >= HIGH_SHARPNESS;
    large_and_decent || exceptional
}

/// Ranking score. Only orders the selection; never decides inclusion.
pub fn score(record: &ImageRecord) -> f64 {
    record.contrast + record.sharpness / SHARPNESS_WEIGHT_DIVISOR
}

/// Maps report paths (relative to the project root) to site URLs.
///
/// A path under `images_dir` loses the `web_root/` prefix; anything else is
/// only made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPathRewrite {
    images_dir: String,
    strip_prefix: String,
}

impl WebPathRewrite {
    pub fn new(images_dir: &str, web_root: &str) -> Self {
        let web_root = web_root.trim_matches('/');
        Self {
            images_dir: images_dir.trim_end_matches('/').to_string(),
            strip_prefix: if web_root.is_empty() {
                String::new()
            } else {
                format!("{web_root}/")
            },
        }
    }

    /// Rewrite one report path into a web path.
    pub fn apply(&self, path: &str) -> String {
        match path
            .starts_with(&self.images_dir)
            .then(|| path.strip_prefix(&self.strip_prefix))
            .flatten()
        {
            Some(rest) => format!("/{rest}"),
            None => format!("/{path}"),
        }
    }
}

impl Default for WebPathRewrite {
    fn default() -> Self {
        Self::new("site/assets/images", "site")
    }
}

/// Apply the selection rules, keep the last row per path, rank by score.
pub fn rank(report: &[ImageRecord]) -> Vec<ImageRecord> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut selected: Vec<&ImageRecord> = Vec::new();

    for record in report.iter().filter(|r| is_selected(r)) {
        match slots.get(record.path.as_str()) {
            Some(&i) => selected[i] = record,
            None => {
                slots.insert(record.path.as_str(), selected.len());
                selected.push(record);
            }
        }
    }

    // Stable sort: equal scores keep their slot order
    selected.sort_by(|a, b| score(b).total_cmp(&score(a)));
    selected.into_iter().cloned().collect()
}

/// Full selection: rank, then rewrite each path for the web.
pub fn select(report: &[ImageRecord], rewrite: &WebPathRewrite) -> Vec<String> {
    rank(report).iter().map(|r| rewrite.apply(&r.path)).collect()
}

/// Read and parse the report at `path`. A missing file is fatal.
pub fn load_report(path: &Path) -> Result<QualityReport, SelectError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parse_report(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SelectError::ReportNotFound(path.to_path_buf()))
        }
        Err(source) => Err(SelectError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
