#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Asset handling for the deck.
//!
//! * [`check_integrity`] verifies the data file and slide images exist
//!   before anything is rendered. Missing data is fatal, missing images only
//!   degrade the slides.
//! * [`cache::FileCache`] memoizes anything loaded from disk, keyed by path
//!   and invalidated when the file's modification time changes.
//! * [`images`] loads slide images through that cache, fitting them to the
//!   slide frame.

pub mod cache;
pub mod images;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use cache::FileCache;
pub use images::{ImageAsset, ImageFrame, ImageStore};

/// Errors that can occur during asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more data files the deck cannot run without are missing.
    #[error("System data missing: {}", display_paths(paths))]
    MissingData {
        /// The missing data files.
        paths: Vec<PathBuf>,
    },

    /// An image could not be decoded or re-encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An asset name tried to escape the asset directory.
    #[error("Invalid asset name: {name}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of an asset integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    /// Data files that do not exist.
    pub missing_data: Vec<PathBuf>,
    /// Images that do not exist.
    pub missing_images: Vec<PathBuf>,
}

impl IntegrityReport {
    /// Returns `true` if nothing is missing.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_data.is_empty() && self.missing_images.is_empty()
    }

    /// Fails if any data file is missing. Missing images are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingData`] listing every missing data file.
    pub fn ensure_data(&self) -> Result<(), AssetError> {
        if self.missing_data.is_empty() {
            Ok(())
        } else {
            Err(AssetError::MissingData {
                paths: self.missing_data.clone(),
            })
        }
    }
}

/// Checks that every data file and image exists.
///
/// Missing data files are logged as errors and missing images as warnings;
/// the caller decides what to do with the report.
#[must_use]
pub fn check_integrity(data_files: &[PathBuf], images: &[PathBuf]) -> IntegrityReport {
    let report = IntegrityReport {
        missing_data: missing(data_files),
        missing_images: missing(images),
    };

    if !report.missing_data.is_empty() {
        log::error!(
            "Critical data files could not be found: {}",
            display_paths(&report.missing_data)
        );
    }
    if !report.missing_images.is_empty() {
        log::warn!(
            "Some visual assets are missing, placeholders will be used: {}",
            display_paths(&report.missing_images)
        );
    }

    report
}

fn missing(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !Path::new(p).exists())
        .cloned()
        .collect()
}
