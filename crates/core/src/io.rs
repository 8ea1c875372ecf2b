//! CSV source loading and sink writing for the reconciler.
//!
//! Both sources are materialized fully before any transformation starts;
//! required columns are validated up front so a malformed source fails
//! before any output file is touched.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableIoError {
    #[error("Failed to load CSV data from '{}'", path.display())]
    CsvLoad {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Source '{source_name}' is missing required columns: {missing:?}")]
    MissingColumns {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("Failed to create output file '{}'", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV data to '{}'", path.display())]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Load a CSV file fully into memory.
pub fn load_csv(path: &Path) -> Result<DataFrame, TableIoError> {
    LazyCsvReader::new(path)
        .finish()
        .and_then(LazyFrame::collect)
        .map_err(|source| TableIoError::CsvLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Fail fast with a named error when a loaded source lacks required columns.
pub fn require_columns(
    frame: &DataFrame,
    source_name: &str,
    required: &[&str],
) -> Result<(), TableIoError> {
    let present: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !present.iter().any(|column| column == *name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TableIoError::MissingColumns {
            source_name: source_name.to_string(),
            missing,
        })
    }
}

/// Write a DataFrame to a CSV file, overwriting any prior output.
pub fn write_csv(frame: &mut DataFrame, path: &Path) -> Result<(), TableIoError> {
    let mut file = File::create(path).map_err(|source| TableIoError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .map_err(|source| TableIoError::CsvWrite {
            path: path.to_path_buf(),
            source,
        })
}
