//! Millstream core library — configuration, logging setup, shutdown signal.
//!
//! Shared by both millstream executables:
//! - [`config`] — environment-driven [`Settings`] and the [`Verbosity`] flag
//! - [`logging`] — process-wide file (+ optional stderr) log initialization
//! - [`shutdown`] — cooperative [`ShutdownSignal`] fed by termination signals
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use config::{Settings, Verbosity};
pub use error::CoreError;
pub use shutdown::{spawn_signal_listener, ShutdownSignal};
