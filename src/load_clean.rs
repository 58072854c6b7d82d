use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::MalformedPolicy;
use crate::errors::{ChartError, Result};
use crate::models::{RawRow, Record, RowError, REQUIRED_COLUMNS};

/// Outcome of a bulk load: the rows that converted and the ones that didn't.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub rejected: Vec<RowError>,
}

// Load and Clean Data
pub fn load_dataset(path: &Path, policy: MalformedPolicy) -> Result<LoadReport> {
    let file = File::open(path).map_err(|source| ChartError::Fetch {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_from_reader(file, policy)?;
    log::info!(
        "Loaded {} records from {} ({} rejected)",
        report.records.len(),
        path.display(),
        report.rejected.len()
    );
    Ok(report)
}

pub fn load_from_reader<R: Read>(reader: R, policy: MalformedPolicy) -> Result<LoadReport> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ChartError::MissingColumn(missing.to_string()));
    }

    let mut report = LoadReport::default();
    for (index, result) in rdr.deserialize().enumerate() {
        let raw: RawRow = result?;
        match raw.into_record(index + 1) {
            Ok(record) => report.records.push(record),
            Err(row_error) => match policy {
                MalformedPolicy::Fail => return Err(ChartError::Parse(row_error)),
                MalformedPolicy::Skip => {
                    log::warn!("Skipping {}", row_error);
                    report.rejected.push(row_error);
                }
            },
        }
    }

    Ok(report)
}
