//! The resync pass: full copy + prune over a sync pair.
//!
//! Every pass recomputes both directory listings from scratch; nothing is
//! cached between passes. A pass either completes fully or fails as a
//! whole — one bad entry aborts the attempt.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::error::{io_err, MirrorError};
use crate::pair::SyncPair;

/// Counters for one completed resync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResyncOutcome {
    /// Files copied from source into destination.
    pub copied: usize,
    /// Destination entries deleted because they left the source.
    pub pruned: usize,
}

/// Run one full resync pass: copy every top-level source file into the
/// destination, then delete every destination entry absent from the
/// source. Idempotent when the source is unchanged.
pub fn resync(pair: &SyncPair) -> Result<ResyncOutcome, MirrorError> {
    let source_names = list_entries(pair.source())?;

    let mut outcome = ResyncOutcome::default();
    for name in &source_names {
        let src = pair.source().join(name);
        let dst = pair.dest().join(name);
        copy_with_mtime(&src, &dst)?;
        outcome.copied += 1;
    }

    let retained: HashSet<&OsString> = source_names.iter().collect();
    for name in list_entries(pair.dest())? {
        if retained.contains(&name) {
            continue;
        }
        let stale = pair.dest().join(&name);
        fs::remove_file(&stale).map_err(|e| io_err(&stale, e))?;
        outcome.pruned += 1;
    }

    tracing::info!(
        source = %pair.source().display(),
        dest = %pair.dest().display(),
        copied = outcome.copied,
        pruned = outcome.pruned,
        "synchronized source with destination"
    );
    Ok(outcome)
}

/// Top-level entry names of `dir`, no recursion.
fn list_entries(dir: &Path) -> Result<Vec<OsString>, MirrorError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

/// Copy `src` over `dst` and carry the source's modification time along.
fn copy_with_mtime(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    let metadata = fs::metadata(src).map_err(|e| io_err(src, e))?;
    if !metadata.is_file() {
        return Err(MirrorError::UnsupportedEntry {
            path: src.to_path_buf(),
        });
    }

    fs::copy(src, dst).map_err(|e| io_err(dst, e))?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dst, mtime).map_err(|e| io_err(dst, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
