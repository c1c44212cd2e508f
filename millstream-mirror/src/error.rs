//! Error types for millstream-mirror.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from the mirror service.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem watcher setup or registration failed.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    /// A sync-pair directory was missing at startup.
    #[error("{role} directory does not exist: {path}")]
    MissingDirectory { role: &'static str, path: PathBuf },

    /// A source entry is not a regular file (e.g. a subdirectory).
    #[error("source entry is not a regular file: {path}")]
    UnsupportedEntry { path: PathBuf },

    /// An internal channel or task ended unexpectedly.
    #[error("channel closed: {0}")]
    ChannelClosed(&'static str),

    /// A blocking resync task failed to join.
    #[error("resync task failure: {0}")]
    Task(String),
}

/// Convenience constructor for [`MirrorError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MirrorError {
    MirrorError::Io {
        path: path.into(),
        source,
    }
}
