//! Curator configuration.
//!
//! Handles loading, validating, and merging `aaa-curator.toml`. Stock defaults
//! are overridden by an optional user file in the project root (or any file
//! passed with `--config`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! images = "site/assets/images"          # Corpus, relative to the project root
//! web_root = "site"                      # Stripped from image paths to form URLs
//! report = "output/vision-quality-report.csv"
//! manifest = "site/assets/images/manifest.json"
//!
//! [processing]
//! max_processes = 4                      # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [paths]
//! report = "build/quality.csv"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::select::WebPathRewrite;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root when `--config` is not given.
pub const CONFIG_FILENAME: &str = "aaa-curator.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Curator configuration loaded from `aaa-curator.toml`.
///
/// All fields have defaults matching the conventional site layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CuratorConfig {
    /// Where images, the report and the manifest live.
    pub paths: PathsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

/// Project-relative locations. All paths use `/` separators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory scanned for images.
    pub images: String,
    /// Site document root; stripped from image paths to form URLs.
    pub web_root: String,
    /// Quality report written by `report`, read by `select`.
    pub report: String,
    /// Manifest receiving the `aaa` selection.
    pub manifest: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: "site/assets/images".to_string(),
            web_root: "site".to_string(),
            report: "output/vision-quality-report.csv".to_string(),
            manifest: "site/assets/images/manifest.json".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn images_dir(&self) -> &Path {
        Path::new(&self.images)
    }

    pub fn report_path(&self, root: &Path) -> PathBuf {
        root.join(&self.report)
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }

    pub fn web_rewrite(&self) -> WebPathRewrite {
        WebPathRewrite::new(&self.images, &self.web_root)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel measurement workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl CuratorConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.paths;
        for (name, value) in [
            ("paths.images", &p.images),
            ("paths.report", &p.report),
            ("paths.manifest", &p.manifest),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        let web_root = p.web_root.trim_matches('/');
        if !web_root.is_empty() && !p.images.starts_with(&format!("{web_root}/")) {
            return Err(ConfigError::Validation(format!(
                "paths.images ({}) must be inside paths.web_root ({})",
                p.images, p.web_root
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(CuratorConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a TOML file as a raw value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CuratorConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CuratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration for a project.
///
/// With `explicit` set, that file must exist. Otherwise `aaa-curator.toml` in
/// `root` is used if present, and stock defaults if not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<CuratorConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let default_path = root.join(CONFIG_FILENAME);
            if default_path.exists() {
                Some(load_raw_config(&default_path)?)
            } else {
                None
            }
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `aaa-curator.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# aaa-curator Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to --root.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Locations
# ---------------------------------------------------------------------------
[paths]
# Directory scanned (recursively) for .png / .jpg / .jpeg images.
images = "site/assets/images"

# Site document root. Image paths under `images` lose this prefix to become
# URLs: site/assets/images/a.jpg -> /assets/images/a.jpg
web_root = "site"

# Quality report written by `report` and read by `select`.
report = "output/vision-quality-report.csv"

# JSON manifest receiving the "aaa" and "aaaCount" keys.
# All other keys in this file are left untouched.
manifest = "site/assets/images/manifest.json"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel measurement workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
