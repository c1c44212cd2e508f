//! # millstream-mirror
//!
//! One-way directory mirror driven by filesystem change notifications.
//!
//! Call [`service::run`] with a [`SyncPair`] to watch the source directory
//! and perform a full [`resync`] pass (copy everything, prune the rest)
//! on every relevant event, until the shutdown signal fires.

pub mod error;
pub mod event;
pub mod pair;
pub mod resync;
pub mod service;

pub use error::MirrorError;
pub use event::{ChangeEvent, ChangeKind};
pub use pair::SyncPair;
pub use resync::{resync, ResyncOutcome};
