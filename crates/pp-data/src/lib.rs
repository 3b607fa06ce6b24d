//! pp-data: dataset ingestion and long-format frame building.
//!
//! Contains:
//! - dataset (csv/tsv/dat readers, row values, moving averages)
//! - frame (per-axis scale/offset and the wide -> long reshape)

pub mod dataset;
pub mod frame;

pub use dataset::{DataFormat, Dataset, MovingAverage, RowValue, moving_average};
pub use frame::{AxisTransform, DatasetFrameBuilder, LongRecord, LongTable};

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Data file must be in .csv, .tsv, or .dat format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("{}:{line}: cannot read {cell:?} as a number", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        cell: String,
    },

    #[error("Dataset '{dataset}': {reason}")]
    UnsupportedCombination { dataset: String, reason: String },

    #[error("Moving average window must be at least 1 (got {window})")]
    InvalidWindow { window: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
