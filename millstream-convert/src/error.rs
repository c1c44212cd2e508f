//! Error types for millstream-convert.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from JSON-to-Parquet conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file did not contain valid JSON.
    #[error("failed to parse JSON from {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON document cannot be represented as a table.
    #[error("JSON is not tabular: {0}")]
    Shape(String),

    /// Arrow array or schema construction failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet serialization failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Convenience constructor for [`ConvertError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConvertError {
    ConvertError::Io {
        path: path.into(),
        source,
    }
}
