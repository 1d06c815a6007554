//! Asset manifest update.
//!
//! Stage 2b of the curation pipeline. The manifest is a JSON object shared with
//! other producers, so it is handled as an open `serde_json::Map` rather than a
//! struct. Only two keys are ever written:
//!
//! | Key | Value |
//! |---|---|
//! | `aaa` | ranked web paths of the selection |
//! | `aaaCount` | `aaa.len()` |
//!
//! Every other key is carried through with its original value and position.
//! Numbers keep their source text, so big integers and long floats survive.
//! A missing or unreadable manifest starts from `{}`; it never blocks the write.

use crate::atomic::write_atomic;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const AAA_KEY: &str = "aaa";
pub const AAA_COUNT_KEY: &str = "aaaCount";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Manifest = Map<String, Value>;

/// Load a manifest, falling back to an empty object.
///
/// Absent files are silent. Files that exist but are not a JSON object are
/// logged at `warn` and treated as empty.
pub fn load_manifest(path: &Path) -> Manifest {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Manifest::new(),
        Err(e) => {
            log::warn!("ignoring unreadable manifest {}: {e}", path.display());
            return Manifest::new();
        }
    };
    parse_manifest(&content).unwrap_or_else(|| {
        log::warn!("ignoring malformed manifest {}", path.display());
        Manifest::new()
    })
}

/// Parse manifest text. `None` unless it is a JSON object.
pub fn parse_manifest(content: &str) -> Option<Manifest> {
    match serde_json::from_str(content) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Overlay `selection` onto `existing` under the reserved keys.
pub fn merge(mut existing: Manifest, selection: &[String]) -> Manifest {
    existing.insert(
        AAA_KEY.to_string(),
        Value::Array(selection.iter().cloned().map(Value::String).collect()),
    );
    existing.insert(AAA_COUNT_KEY.to_string(), Value::from(selection.len()));
    existing
}

/// Pretty-print with 2-space indentation and a trailing newline.
pub fn to_json(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Atomically replace the manifest file.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let json = to_json(manifest)?;
    write_atomic(path, json.as_bytes()).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load, merge, and write back. Returns the written manifest.
pub fn update_manifest(path: &Path, selection: &[String]) -> Result<Manifest, ManifestError> {
    let merged = merge(load_manifest(path), selection);
    write_manifest(path, &merged)?;
    Ok(merged)
}
