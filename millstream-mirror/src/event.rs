//! Change events delivered by the filesystem watcher.
//!
//! The resync routine treats every event purely as a trigger — the kind
//! and path are carried for logging, not consulted to decide what to copy.

use std::path::PathBuf;

use notify::{Event, EventKind};

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

/// A single relevant filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeEvent {
    /// Map a raw notify event onto a [`ChangeEvent`].
    ///
    /// Access and metadata-only kinds return `None` and are ignored.
    pub fn from_notify(event: &Event) -> Option<Self> {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Modify(_) => ChangeKind::Modified,
            EventKind::Remove(_) => ChangeKind::Deleted,
            _ => return None,
        };
        let path = event.paths.first().cloned()?;
        Some(Self { kind, path })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
