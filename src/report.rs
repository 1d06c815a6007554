//! Quality report: one row of metrics per corpus image.
//!
//! Stage 1 of the curation pipeline. Every image found by [`scan`](crate::scan)
//! is decoded and measured; decode failures become sentinel rows
//! (`-1,-1,0,0`) instead of aborting the batch.
//!
//! ## CSV Format
//!
//! ```text
//! path,contrast,sharpness,width,height
//! site/assets/images/a.jpg,31.77,812.4,2000,1500
//! site/assets/images/broken.jpg,-1,-1,0,0
//! ```
//!
//! No quoting: paths are assumed to be comma-free. Reading is tolerant —
//! columns are located by header name, and any numeric field that is missing
//! or malformed reads as `0`.
//!
//! ## Parallel Processing
//!
//! Images are measured in parallel using [rayon](https://docs.rs/rayon). Rows
//! keep the walk order regardless of which worker finishes first.

use crate::atomic::write_atomic;
use crate::imaging::{ImageBackend, measure_file};
use crate::scan::{self, CorpusEntry, ScanError};
use rayon::prelude::*;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const CSV_HEADER: &str = "path,contrast,sharpness,width,height";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Metrics for one corpus file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Project-root-relative and `/`-separated, e.g. `site/assets/images/a.jpg`.
    pub path: String,
    pub contrast: f64,
    pub sharpness: f64,
    pub width: u32,
    pub height: u32,
}

impl ImageRecord {
    /// Placeholder for a file that could not be decoded.
    pub fn sentinel(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contrast: -1.0,
            sharpness: -1.0,
            width: 0,
            height: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.contrast == -1.0 && self.sharpness == -1.0 && self.width == 0 && self.height == 0
    }

    fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.path, self.contrast, self.sharpness, self.width, self.height
        )
    }
}

/// Ordered rows, one per visited file.
pub type QualityReport = Vec<ImageRecord>;

/// Scan `root.join(images_dir)` and measure every image found.
pub fn build_report(
    backend: &impl ImageBackend,
    root: &Path,
    images_dir: &Path,
) -> Result<QualityReport, ReportError> {
    let entries = scan::scan_corpus(root, images_dir)?;
    Ok(measure_entries(backend, &entries))
}

/// Measure already discovered files, substituting sentinels for failures.
pub fn measure_entries(backend: &impl ImageBackend, entries: &[CorpusEntry]) -> QualityReport {
    entries
        .par_iter()
        .map(|entry| match measure_file(backend, &entry.source) {
            Ok(m) => ImageRecord {
                path: entry.relative.clone(),
                contrast: m.contrast,
                sharpness: m.sharpness,
                width: m.dimensions.width,
                height: m.dimensions.height,
            },
            Err(e) => {
                log::info!("{}: {e}", entry.relative);
                ImageRecord::sentinel(entry.relative.clone())
            }
        })
        .collect()
}

/// Render the report as CSV text with a header row and trailing newline.
pub fn to_csv(report: &[ImageRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + report.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in report {
        out.push_str(&record.to_csv_row());
        out.push('\n');
    }
    out
}

/// Write the report, creating the parent directory if needed.
pub fn write_report(path: &Path, report: &[ImageRecord]) -> Result<(), ReportError> {
    write_atomic(path, to_csv(report).as_bytes())?;
    Ok(())
}

/// Parse a field, falling back to the type's default on any failure.
pub fn parse_or_default<T: FromStr + Default>(field: Option<&str>) -> T {
    field
        .map(str::trim)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Parse CSV report text. Never fails: bad fields degrade to defaults.
///
/// An empty input (no header) yields an empty report.
pub fn parse_report(text: &str) -> QualityReport {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let index_of = |name: &str| columns.iter().position(|c| *c == name);
    let (path_i, contrast_i, sharpness_i, width_i, height_i) = (
        index_of("path"),
        index_of("contrast"),
        index_of("sharpness"),
        index_of("width"),
        index_of("height"),
    );

    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            let get = |i: Option<usize>| i.and_then(|i| fields.get(i).copied());
            ImageRecord {
                path: get(path_i).unwrap_or_default().to_string(),
                contrast: parse_or_default(get(contrast_i)),
                sharpness: parse_or_default(get(sharpness_i)),
                width: parse_or_default(get(width_i)),
                height: parse_or_default(get(height_i)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::imaging::RustBackend;
    use crate::test_helpers::{checkerboard, corpus_with, flat, record};
    use std::path::PathBuf;

    fn entry(relative: &str) -> CorpusEntry {
        CorpusEntry {
            source: PathBuf::from(format!("/root/{relative}")),
            relative: relative.to_string(),
        }
    }

    // =========================================================================
    // Building
    // =========================================================================

    #[test]
    fn failed_decode_becomes_sentinel_and_batch_continues() {
        let backend = MockBackend::new()
            .with_image("/root/imgs/a.png", flat(2000, 1000, 50))
            .with_image("/root/imgs/c.png", checkerboard(10, 10));
        let entries = [entry("imgs/a.png"), entry("imgs/b.png"), entry("imgs/c.png")];

        let report = measure_entries(&backend, &entries);

        assert_eq!(report.len(), 3);
        assert_eq!(report[0].path, "imgs/a.png");
        assert_eq!((report[0].width, report[0].height), (2000, 1000));
        assert_eq!(report[1], ImageRecord::sentinel("imgs/b.png"));
        assert!(report[2].sharpness > 200.0);
        assert_eq!(backend.decoded_paths().len(), 3);
    }

    #[test]
    fn order_follows_entries_not_completion() {
        let backend = MockBackend::new();
        let entries: Vec<CorpusEntry> = (0..50)
            .map(|i| entry(&format!("imgs/{i:03}.png")))
            .collect();

        let report = measure_entries(&backend, &entries);
        let paths: Vec<&str> = report.iter().map(|r| r.path.as_str()).collect();
        let expected: Vec<&str> = entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn build_report_reads_real_files() {
        let tmp = corpus_with(&[
            ("site/assets/images/flat.png", flat(30, 20, 100)),
            ("site/assets/images/sharp.png", checkerboard(30, 20)),
        ]);
        std::fs::write(tmp.path().join("site/assets/images/broken.jpg"), b"garbage").unwrap();

        let report =
            build_report(&RustBackend::new(), tmp.path(), Path::new("site/assets/images")).unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report[0], ImageRecord::sentinel("site/assets/images/broken.jpg"));
        assert_eq!(report[1].path, "site/assets/images/flat.png");
        assert_eq!(report[1].contrast, 0.0);
        assert_eq!((report[1].width, report[1].height), (30, 20));
        assert!(report[2].contrast > 127.0);
    }

    #[test]
    fn build_report_missing_corpus_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = build_report(&RustBackend::new(), tmp.path(), Path::new("nope"));
        assert!(matches!(result, Err(ReportError::Scan(ScanError::NotFound(_)))));
    }

    // =========================================================================
    // CSV output
    // =========================================================================

    #[test]
    fn csv_has_header_and_natural_numbers() {
        let csv = to_csv(&[
            record("site/assets/images/a.jpg", 30.5, 60.25, 2000, 1500),
            record("site/assets/images/b.jpg", 10.0, 0.0, 800, 600),
        ]);
        assert_eq!(
            csv,
            "path,contrast,sharpness,width,height\n\
             site/assets/images/a.jpg,30.5,60.25,2000,1500\n\
             site/assets/images/b.jpg,10,0,800,600\n"
        );
    }

    #[test]
    fn sentinel_row_format() {
        let csv = to_csv(&[ImageRecord::sentinel("x.png")]);
        assert!(csv.ends_with("x.png,-1,-1,0,0\n"));
    }

    #[test]
    fn empty_report_is_header_only() {
        assert_eq!(to_csv(&[]), "path,contrast,sharpness,width,height\n");
    }

    #[test]
    fn write_report_creates_parent_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("output/vision-quality-report.csv");
        write_report(&path, &[record("a.png", 1.0, 2.0, 3, 4)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("a.png,1,2,3,4"));
    }

    // =========================================================================
    // CSV input
    // =========================================================================

    #[test]
    fn parse_reads_written_report() {
        let report = vec![
            record("a.png", 31.77, 812.5, 2000, 1500),
            ImageRecord::sentinel("b.png"),
        ];
        assert_eq!(parse_report(&to_csv(&report)), report);
    }

    #[test]
    fn parse_locates_columns_by_header() {
        let text = "width,path,sharpness,contrast\n1920,a.png,55,12\n";
        let report = parse_report(text);
        assert_eq!(report, vec![record("a.png", 12.0, 55.0, 1920, 0)]);
    }

    #[test]
    fn parse_malformed_fields_default_to_zero() {
        let text = "path,contrast,sharpness,width,height\na.png,abc,,1920.5,\n";
        let report = parse_report(text);
        assert_eq!(report, vec![record("a.png", 0.0, 0.0, 0, 0)]);
    }

    #[test]
    fn parse_short_rows_default_missing_fields() {
        let text = "path,contrast,sharpness,width,height\na.png,40\n";
        assert_eq!(parse_report(text), vec![record("a.png", 40.0, 0.0, 0, 0)]);
    }

    #[test]
    fn parse_skips_blank_lines_and_trims_whitespace() {
        let text = "path,contrast,sharpness,width,height\r\n\r\na.png, 25 ,50,1920,1080\r\n\n";
        assert_eq!(parse_report(text), vec![record("a.png", 25.0, 50.0, 1920, 1080)]);
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse_report("").is_empty());
        assert!(parse_report("path,contrast,sharpness,width,height\n").is_empty());
    }

    #[test]
    fn parse_or_default_handles_types() {
        assert_eq!(parse_or_default::<f64>(Some("1.5")), 1.5);
        assert_eq!(parse_or_default::<f64>(Some("-1")), -1.0);
        assert_eq!(parse_or_default::<u32>(Some("-1")), 0);
        assert_eq!(parse_or_default::<u32>(None), 0);
    }
}
