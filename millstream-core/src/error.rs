//! Error types for millstream-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from core support operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The global tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
