//! The (source, destination) directory pair the mirror operates on.

use std::path::{Path, PathBuf};

use millstream_core::Settings;

use crate::error::MirrorError;

/// Ordered pair of directories: everything in `source` is mirrored into
/// `dest`. Resolved once at startup, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    source: PathBuf,
    dest: PathBuf,
}

impl SyncPair {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Raw drop directory mirrors into the final directory.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.raw_dir(), settings.final_dir())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Startup precondition: both directories must already exist. The
    /// service never creates them.
    pub fn ensure_exists(&self) -> Result<(), MirrorError> {
        for (role, path) in [("source", &self.source), ("destination", &self.dest)] {
            if !path.is_dir() {
                return Err(MirrorError::MissingDirectory {
                    role,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_exists_accepts_two_directories() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let pair = SyncPair::new(source.path(), dest.path());
        pair.ensure_exists().expect("both directories exist");
    }

    #[test]
    fn ensure_exists_rejects_missing_source() {
        let dest = TempDir::new().unwrap();
        let pair = SyncPair::new("/nonexistent/raw", dest.path());
        let err = pair.ensure_exists().unwrap_err();
        assert!(
            matches!(err, MirrorError::MissingDirectory { role: "source", .. }),
            "got: {err}"
        );
    }

    #[test]
    fn ensure_exists_rejects_missing_destination() {
        let source = TempDir::new().unwrap();
        let pair = SyncPair::new(source.path(), "/nonexistent/final");
        let err = pair.ensure_exists().unwrap_err();
        assert!(
            matches!(
                err,
                MirrorError::MissingDirectory {
                    role: "destination",
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn ensure_exists_rejects_file_as_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let pair = SyncPair::new(&file, dir.path());
        assert!(pair.ensure_exists().is_err());
    }

    #[test]
    fn from_settings_uses_raw_and_final_dirs() {
        let settings = Settings::from_lookup(|key| match key {
            "BASE_DIR" => Some("/srv/mill".to_string()),
            _ => None,
        });
        let pair = SyncPair::from_settings(&settings);
        assert_eq!(pair.source(), Path::new("/srv/mill/parquet_raw"));
        assert_eq!(pair.dest(), Path::new("/srv/mill/parquet_final"));
    }
}
