//! CSV Data Loader Module
//! Reads a Latin-1 encoded CSV file into a polars DataFrame.

use crate::config::AppConfig;
use crate::data::columns::rename_columns;
use crate::report::Report;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No file selected")]
    EmptyPath,
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV file has no columns")]
    NoColumns,
}

/// A freshly parsed dataset plus the naming details shown in the load report.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub df: DataFrame,
    pub raw_columns: Vec<String>,
}

/// Handles CSV file loading with Polars.
pub struct DatasetLoader {
    preview_rows: usize,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl DatasetLoader {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            preview_rows: config.preview_rows,
        }
    }

    /// Load a CSV file from disk.
    pub fn load_file(&self, path: &Path) -> Result<LoadedDataset, LoaderError> {
        if path.as_os_str().is_empty() {
            return Err(LoaderError::EmptyPath);
        }

        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.load_bytes(&bytes)
    }

    /// Parse Latin-1 encoded CSV bytes.
    ///
    /// Every column is read as text so no value is lost before cleaning.
    /// Column names are trimmed straight away and empty cells become nulls.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<LoadedDataset, LoaderError> {
        let utf8 = encoding_rs::mem::decode_latin1(bytes);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(utf8.into_owned().into_bytes()))
            .finish()?;

        if df.width() == 0 {
            return Err(LoaderError::NoColumns);
        }

        let raw_columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let trimmed: Vec<String> = raw_columns.iter().map(|c| c.trim().to_string()).collect();
        let df = rename_columns(&df, &trimmed)?;
        let df = blank_strings_to_null(df)?;

        Ok(LoadedDataset { df, raw_columns })
    }

    /// Build the report shown after a successful load.
    pub fn load_report(&self, loaded: &LoadedDataset) -> Report {
        let df = &loaded.df;
        let trimmed: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        Report::new("Dataset uploaded successfully!")
            .text("Raw Columns", format!("{:?}", loaded.raw_columns))
            .text("Cleaned Columns", format!("{:?}", trimmed))
            .table("Data Types", column_dtypes(df))
            .table("Null Counts", column_null_counts(df))
            .preformatted(
                "First few rows",
                format!("{}", df.head(Some(self.preview_rows))),
            )
            .with_footer(format!("{} rows, {} columns", df.height(), df.width()))
    }
}

/// Treat empty text cells as missing values.
fn blank_strings_to_null(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let string_cols: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype() == &DataType::String)
        .map(|col| col.name().clone())
        .collect();

    for name in string_cols {
        let values: Vec<Option<String>> = df
            .column(name.as_str())?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(|s| s.to_string()))
            .collect();
        df.with_column(Series::new(name, values))?;
    }

    Ok(df)
}

/// `(column, dtype)` pairs in column order.
pub fn column_dtypes(df: &DataFrame) -> Vec<(String, String)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.dtype().to_string()))
        .collect()
}

/// `(column, null count)` pairs in column order.
pub fn column_null_counts(df: &DataFrame) -> Vec<(String, String)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count().to_string()))
        .collect()
}
