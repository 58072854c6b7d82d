use std::path::PathBuf;
use thiserror::Error;

use crate::models::RowError;

/// Failure modes of the chart pipeline.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    /// A row with one or more numeric fields that did not convert.
    #[error("unparseable value in {0}")]
    Parse(RowError),

    #[error("dataset is empty, cannot build scales")]
    EmptyDataset,

    #[error("region '{0}' is not in the color scale")]
    UnknownCategory(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
