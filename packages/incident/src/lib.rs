#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident table loading and top-N location ranking.
//!
//! [`load`] reads the `Location`/`Category`/`Count` table into
//! [`IncidentRecord`]s, rejecting the whole file on the first malformed row.
//! [`ranking`] turns those records into the ranked, filtered structure the
//! stacked location chart consumes.

pub mod load;
pub mod ranking;

use std::path::PathBuf;

pub use camden_incident_models::{
    CategorySeries, DEFAULT_TOP_LOCATIONS, IncidentCategory, IncidentRecord, LocationTotal,
    RankedIncidents,
};

/// Errors that can occur while loading the incident table.
#[derive(Debug, thiserror::Error)]
pub enum IncidentError {
    /// The incident table file does not exist.
    #[error("Incident table not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing or encoding error outside of a data row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Incident table is missing the `{column}` column")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },

    /// The counts sum past `u64::MAX`.
    #[error("Incident counts overflow at line {line}")]
    TotalOverflow {
        /// 1-based line number of the row that overflowed the sum.
        line: u64,
    },

    /// A data row could not be parsed.
    #[error("Malformed incident row at line {line}: {message}")]
    MalformedRow {
        /// 1-based line number of the offending row.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },
}
