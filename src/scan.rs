//! Corpus discovery.
//!
//! Walks the images directory recursively and returns every supported image
//! (`.png`, `.jpg`, `.jpeg`, any case). Entries are sorted by file name within
//! each directory so two scans of the same tree return the same order.
//!
//! Paths are returned twice: absolute for decoding, and relative to the
//! project root (with `/` separators) for the report.
//!
//! Only a missing images directory is an error. Subdirectories that cannot be
//! read are logged at `warn` and skipped. Symlinked files are listed like
//! regular files; a dangling link is left for the decoder to reject.

use crate::imaging::is_supported_image;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Images directory not found: {0}")]
    NotFound(PathBuf),
}

/// A discovered image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Absolute (or root-joined) path used to open the file.
    pub source: PathBuf,
    /// Path relative to the project root, `/`-separated.
    pub relative: String,
}

/// Find every supported image under `root.join(images_dir)`.
pub fn scan_corpus(root: &Path, images_dir: &Path) -> Result<Vec<CorpusEntry>, ScanError> {
    let corpus = root.join(images_dir);
    if !corpus.is_dir() {
        return Err(ScanError::NotFound(corpus));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(&corpus).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable path under {}: {e}", corpus.display());
                continue;
            }
        };
        if is_directory(&entry) || !is_supported_image(entry.path()) {
            continue;
        }
        let source = entry.into_path();
        let relative = relative_path(&source, root);
        entries.push(CorpusEntry { source, relative });
    }

    Ok(entries)
}

/// Directories, including symlinks that resolve to one. Links are not followed.
fn is_directory(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// Express `path` relative to `root`, joined with `/` on every platform.
fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
