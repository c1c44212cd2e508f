//! Environment-driven configuration.
//!
//! All path values resolve against `BASE_DIR`; every key is optional and
//! falls back to a fixed default. [`Settings`] is resolved once at startup
//! and passed into the entry points — never read ad hoc from the process
//! environment after that.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_DIR: &str = "/var/lib/millstream";
pub const DEFAULT_RAW_DIR: &str = "parquet_raw";
pub const DEFAULT_FINAL_DIR: &str = "parquet_final";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_JSON_INPUT_FILE: &str = "json_input/iris.json";

// ---------------------------------------------------------------------------
// Verbosity
// ---------------------------------------------------------------------------

/// Two-level log detail flag: `debug` mirrors records to stderr, `prod`
/// writes INFO and above to the log file only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Debug,
    #[default]
    Prod,
}

impl Verbosity {
    /// The `tracing` filter directive this verbosity maps to.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Prod => "info",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Debug => write!(f, "debug"),
            Verbosity::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Verbosity::Debug),
            "prod" => Ok(Verbosity::Prod),
            other => Err(format!(
                "unknown verbosity '{other}'; expected: debug, prod"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Resolved process configuration, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    base_dir: PathBuf,
    raw_dir: PathBuf,
    final_dir: PathBuf,
    log_dir: PathBuf,
    json_input_file: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary key lookup.
    ///
    /// Relative values resolve under `BASE_DIR`; absolute values are taken
    /// as-is.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_dir = PathBuf::from(
            lookup("BASE_DIR").unwrap_or_else(|| DEFAULT_BASE_DIR.to_string()),
        );
        let resolve = |key: &str, default: &str| -> PathBuf {
            let value = PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()));
            if value.is_absolute() {
                value
            } else {
                base_dir.join(value)
            }
        };

        let raw_dir = resolve("PARQUET_RAW_DIR", DEFAULT_RAW_DIR);
        let final_dir = resolve("PARQUET_FINAL_DIR", DEFAULT_FINAL_DIR);
        let log_dir = resolve("LOG_DIR", DEFAULT_LOG_DIR);
        let json_input_file = resolve("JSON_INPUT_FILE", DEFAULT_JSON_INPUT_FILE);

        Self {
            base_dir,
            raw_dir,
            final_dir,
            log_dir,
            json_input_file,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Converter output directory and mirror source directory.
    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Mirror destination directory.
    pub fn final_dir(&self) -> &Path {
        &self.final_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// The JSON document the converter reads.
    pub fn json_input_file(&self) -> &Path {
        &self.json_input_file
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
