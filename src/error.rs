use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a source file into a [`crate::data::model::VenueTable`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("reading workbook: {0}")]
    Excel(#[from] calamine::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("source is missing the '{0}' column")]
    MissingColumn(String),

    #[error("unexpected layout: {0}")]
    InvalidShape(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
