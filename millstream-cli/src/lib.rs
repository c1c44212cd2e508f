//! Shared argument plumbing for the millstream binaries.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use millstream_core::{Settings, Verbosity};

/// Thin wrapper so clap can parse [`Verbosity`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct VerbosityArg(pub Verbosity);

impl FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Verbosity>().map(Self)
    }
}

impl fmt::Display for VerbosityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<VerbosityArg> for Verbosity {
    fn from(v: VerbosityArg) -> Self {
        v.0
    }
}

/// Print resolved paths to stdout; debug verbosity only.
pub fn print_debug_paths(settings: &Settings, log_path: &Path) {
    println!("BASE_DIR: {}", settings.base_dir().display());
    println!("PARQUET_RAW_DIR: {}", settings.raw_dir().display());
    println!("PARQUET_FINAL_DIR: {}", settings.final_dir().display());
    println!("JSON_INPUT_FILE: {}", settings.json_input_file().display());
    println!("LOG_FILE: {}", log_path.display());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
