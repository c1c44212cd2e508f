//! Process-wide logging initialization.
//!
//! Records always go to `<log_dir>/<log_file_name>` (append across
//! restarts, no rotation). `debug` verbosity additionally mirrors records
//! to stderr. `RUST_LOG` overrides the verbosity-derived level when set.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Verbosity;
use crate::error::{io_err, CoreError};

/// Install the global tracing subscriber for this process.
///
/// Creates `log_dir` if absent. Returns the path of the log file records
/// are routed to. Call once at startup; a second call fails because the
/// global subscriber is already set.
pub fn init(
    verbosity: Verbosity,
    log_file_name: &str,
    log_dir: &Path,
) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(log_dir).map_err(|e| io_err(log_dir, e))?;
    let log_path = log_dir.join(log_file_name);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| io_err(&log_path, e))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(log_file));

    // Mirror records to the console only in debug verbosity.
    let stderr_layer = matches!(verbosity, Verbosity::Debug)
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| CoreError::Logging(e.to_string()))?;

    Ok(log_path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
