//! Incident table loader.
//!
//! Parses a CSV with at least the `Location`, `Category` and `Count`
//! columns. Extra columns are ignored. A single bad row rejects the whole
//! load so that aggregate totals are never computed over a partial table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use camden_incident_models::IncidentRecord;

use crate::IncidentError;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &["Location", "Category", "Count"];

/// Loads the incident table from a CSV file.
///
/// # Errors
///
/// * [`IncidentError::NotFound`] if the file does not exist
/// * [`IncidentError::Io`] if the file cannot be opened
/// * any error returned by [`parse_incidents`]
pub fn load_incidents(path: &Path) -> Result<Vec<IncidentRecord>, IncidentError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IncidentError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(IncidentError::Io(e)),
    };

    let records = parse_incidents(file)?;
    log::info!(
        "Loaded {} incident rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parses incident rows from any CSV reader.
///
/// A header-only input is a valid, empty table.
///
/// # Errors
///
/// * [`IncidentError::MissingColumn`] if a required column is absent
/// * [`IncidentError::MalformedRow`] for the first row that fails to parse
/// * [`IncidentError::TotalOverflow`] if the counts do not fit in a `u64` sum
/// * [`IncidentError::Csv`] if the header row itself cannot be read
pub fn parse_incidents<R: Read>(reader: R) -> Result<Vec<IncidentRecord>, IncidentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(IncidentError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    let mut total: u64 = 0;
    for result in reader.records() {
        let row = result.map_err(|e| malformed_row(&e, None))?;
        let line = row.position().map(csv::Position::line);
        let record: IncidentRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| malformed_row(&e, line))?;

        total = total.checked_add(record.count).ok_or_else(|| {
            let line = line.unwrap_or(0);
            log::warn!("Rejecting incident table: counts overflow at line {line}");
            IncidentError::TotalOverflow { line }
        })?;
        records.push(record);
    }

    Ok(records)
}

fn malformed_row(e: &csv::Error, line: Option<u64>) -> IncidentError {
    let line = line
        .or_else(|| e.position().map(csv::Position::line))
        .unwrap_or(0);
    let message = match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        _ => e.to_string(),
    };
    log::warn!("Rejecting incident table: line {line}: {message}");
    IncidentError::MalformedRow { line, message }
}
