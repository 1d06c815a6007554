//! CLI output formatting for the pipeline stages.
//!
//! # Output Format
//!
//! ## Report
//!
//! ```text
//! Measured 42 images (1 unreadable)
//!     Unreadable: site/assets/images/broken.jpg
//! Report → output/vision-quality-report.csv
//! ```
//!
//! ## Select
//!
//! ```text
//! AAA selection (2 of 42)
//! 001 /assets/images/c.jpg
//! 002 /assets/images/a.jpg
//! Manifest → site/assets/images/manifest.json
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::report::ImageRecord;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Summary of a report stage run.
pub fn format_report_output(report: &[ImageRecord], report_path: &Path) -> Vec<String> {
    let unreadable: Vec<&ImageRecord> = report.iter().filter(|r| r.is_sentinel()).collect();

    let mut lines = Vec::new();
    if unreadable.is_empty() {
        lines.push(format!("Measured {} images", report.len()));
    } else {
        lines.push(format!(
            "Measured {} images ({} unreadable)",
            report.len(),
            unreadable.len()
        ));
        for record in unreadable {
            lines.push(format!("{}Unreadable: {}", indent(1), record.path));
        }
    }
    lines.push(format!("Report → {}", report_path.display()));
    lines
}

pub fn print_report_output(report: &[ImageRecord], report_path: &Path) {
    for line in format_report_output(report, report_path) {
        println!("{}", line);
    }
}

/// Ranked selection listing. `manifest_path` is `None` for dry runs.
pub fn format_select_output(
    selection: &[String],
    report_len: usize,
    manifest_path: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "AAA selection ({} of {})",
        selection.len(),
        report_len
    )];
    for (i, path) in selection.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), path));
    }
    match manifest_path {
        Some(path) => lines.push(format!("Manifest → {}", path.display())),
        None => lines.push("Dry run: manifest not written".to_string()),
    }
    lines
}

pub fn print_select_output(selection: &[String], report_len: usize, manifest_path: Option<&Path>) {
    for line in format_select_output(selection, report_len, manifest_path) {
        println!("{}", line);
    }
}
