//! # millstream-convert
//!
//! One-shot JSON to Parquet conversion.
//!
//! Call [`convert_file`] to read a JSON document, reshape it into a
//! [`Table`](table::Table), and serialize it as a Parquet file named after
//! the input's file stem. Pure and synchronous; every failure is terminal
//! for the caller.

pub mod error;
pub mod table;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use error::io_err;
pub use error::ConvertError;
use table::Table;
pub use writer::write_parquet;

/// Convert the JSON document at `input` into a Parquet file under
/// `output_dir`.
///
/// The output directory is created if absent. The output file name is
/// `<input-file-stem>.parquet`, fixed per run — re-running overwrites the
/// previous output. Returns the output path.
pub fn convert_file(input: &Path, output_dir: &Path) -> Result<PathBuf, ConvertError> {
    tracing::info!(input = %input.display(), "reading JSON input");

    fs::create_dir_all(output_dir).map_err(|e| io_err(output_dir, e))?;

    let raw = fs::read_to_string(input).map_err(|e| io_err(input, e))?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| ConvertError::Json {
        path: input.to_path_buf(),
        source,
    })?;
    let table = Table::from_json(&document)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let output = output_dir.join(format!("{stem}.parquet"));
    write_parquet(&table, &output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = table.row_count,
        columns = table.columns.len(),
        "converted JSON to Parquet"
    );
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
