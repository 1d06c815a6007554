//! Stage drivers tying configuration, files, and the pure stages together.
//!
//! These are what the CLI commands call; each resolves its paths against the
//! project root and surfaces only fatal errors.

use crate::config::CuratorConfig;
use crate::imaging::ImageBackend;
use crate::manifest::{self, ManifestError};
use crate::report::{self, QualityReport, ReportError};
use crate::select::{self, SelectError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Result of the report stage.
#[derive(Debug)]
pub struct ReportOutcome {
    pub report: QualityReport,
    pub report_path: PathBuf,
}

/// Result of the select stage.
#[derive(Debug)]
pub struct SelectOutcome {
    pub selection: Vec<String>,
    pub report_len: usize,
    /// `None` when the manifest was not written (dry run).
    pub manifest_path: Option<PathBuf>,
}

/// Measure the corpus and write the quality report.
pub fn run_report(
    backend: &impl ImageBackend,
    root: &Path,
    config: &CuratorConfig,
) -> Result<ReportOutcome, PipelineError> {
    let report = report::build_report(backend, root, config.paths.images_dir())?;
    let report_path = config.paths.report_path(root);
    report::write_report(&report_path, &report)?;
    Ok(ReportOutcome {
        report,
        report_path,
    })
}

/// Select from the written report and, unless `dry_run`, update the manifest.
pub fn run_select(
    root: &Path,
    config: &CuratorConfig,
    dry_run: bool,
) -> Result<SelectOutcome, PipelineError> {
    let report = select::load_report(&config.paths.report_path(root))?;
    let selection = select::select(&report, &config.paths.web_rewrite());

    let manifest_path = if dry_run {
        None
    } else {
        let path = config.paths.manifest_path(root);
        manifest::update_manifest(&path, &selection)?;
        Some(path)
    };

    Ok(SelectOutcome {
        selection,
        report_len: report.len(),
        manifest_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::test_helpers::{checkerboard, corpus_with, flat};

    #[test]
    fn select_without_report_fails_and_leaves_manifest_alone() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = CuratorConfig::default();

        let err = run_select(tmp.path(), &config, false).unwrap_err();
        assert!(matches!(err, PipelineError::Select(SelectError::ReportNotFound(_))));
        assert!(!config.paths.manifest_path(tmp.path()).exists());
    }

    #[test]
    fn dry_run_does_not_write_manifest() {
        let tmp = corpus_with(&[("site/assets/images/sharp.png", checkerboard(64, 64))]);
        let config = CuratorConfig::default();

        run_report(&RustBackend::new(), tmp.path(), &config).unwrap();
        let outcome = run_select(tmp.path(), &config, true).unwrap();

        assert_eq!(outcome.selection, vec!["/assets/images/sharp.png"]);
        assert!(outcome.manifest_path.is_none());
        assert!(!config.paths.manifest_path(tmp.path()).exists());
    }

    #[test]
    fn report_then_select_updates_manifest() {
        let tmp = corpus_with(&[
            ("site/assets/images/sharp.png", checkerboard(64, 64)),
            ("site/assets/images/flat.png", flat(64, 64, 80)),
        ]);
        let config = CuratorConfig::default();

        let report = run_report(&RustBackend::new(), tmp.path(), &config).unwrap();
        assert_eq!(report.report.len(), 2);
        assert!(report.report_path.exists());

        let outcome = run_select(tmp.path(), &config, false).unwrap();
        assert_eq!(outcome.report_len, 2);
        let written = std::fs::read_to_string(outcome.manifest_path.unwrap()).unwrap();
        assert!(written.contains("\"aaaCount\": 1"));
    }
}
