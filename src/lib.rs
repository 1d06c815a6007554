//! # aaa-curator
//!
//! Picks the best images of a site's asset directory and publishes them to the
//! asset manifest under an `aaa` key.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Report   site/assets/images/  →  output/vision-quality-report.csv
//! 2. Select   report.csv           →  site/assets/images/manifest.json  ("aaa", "aaaCount")
//! ```
//!
//! The report is plain CSV so it can be inspected, diffed, or produced by other
//! tools. Selection reads nothing but the report and the existing manifest, so
//! it can be rerun cheaply and always produces the same manifest for the same
//! inputs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive corpus walk with extension filter |
//! | [`imaging`] | Decoding, downscaling, contrast and sharpness metrics |
//! | [`report`] | Stage 1 — measures every image, sentinel rows for failures, CSV I/O |
//! | [`select`] | Stage 2a — selection rules, dedup, scoring, web paths |
//! | [`manifest`] | Stage 2b — merges the selection into the JSON manifest |
//! | [`pipeline`] | Stage drivers used by the CLI |
//! | [`config`] | `aaa-curator.toml` loading, merging with defaults, validation |
//! | [`atomic`] | Temp-file-and-rename writes |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Thumbnails Before Metrics
//!
//! Both metrics run on a copy shrunk into 600×400 (Lanczos3). Contrast barely
//! changes with scale and Laplacian variance is compared against fixed
//! thresholds, so measuring at a common scale keeps large and small originals
//! comparable and bounds the cost of 8K renders. The report still records the
//! original width and height, which the selection rules depend on.
//!
//! ## Failures Are Data
//!
//! An unreadable file becomes a `-1,-1,0,0` row rather than an error. The row
//! can never pass a selection rule, and the report still accounts for every
//! file the walk found.
//!
//! ## The Manifest Is Not Ours
//!
//! Other tools write the manifest too. It is loaded as an untyped JSON object
//! and only `aaa` / `aaaCount` are touched; key order is preserved so diffs stay
//! minimal.

pub mod atomic;
pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod select;

#[cfg(test)]
pub(crate) mod test_helpers;
