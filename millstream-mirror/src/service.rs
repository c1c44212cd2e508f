//! The mirror service runtime: watcher + serialized resync loop.
//!
//! One select loop owns both event consumption and resync execution, so
//! passes run one at a time in arrival order and can never overlap. The
//! shutdown signal is observed between passes only — an in-flight pass
//! always completes before the loop exits.

use notify::{recommended_watcher, Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use millstream_core::ShutdownSignal;

use crate::error::MirrorError;
use crate::event::ChangeEvent;
use crate::pair::SyncPair;
use crate::resync::resync;

/// Run the mirror service until shutdown is requested.
///
/// Checks the startup preconditions, registers a non-recursive watcher on
/// the source directory, and performs one full resync pass per relevant
/// change event. Returns `Ok(())` on graceful shutdown; the first failed
/// pass (or watcher registration failure) returns `Err` and the service
/// stops.
pub async fn run(pair: SyncPair, shutdown: &ShutdownSignal) -> Result<(), MirrorError> {
    pair.ensure_exists()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;
    watcher.watch(pair.source(), RecursiveMode::NonRecursive)?;

    tracing::info!(
        source = %pair.source().display(),
        dest = %pair.dest().display(),
        "watching source directory"
    );

    let mut shutdown_rx = shutdown.subscribe();
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            event = event_rx.recv() => {
                let Some(event) = event else {
                    return Err(MirrorError::ChannelClosed("watcher events"));
                };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };
                let Some(change) = ChangeEvent::from_notify(&event) else {
                    continue;
                };
                tracing::debug!(
                    kind = ?change.kind,
                    path = %change.path.display(),
                    "change event"
                );

                let pass_pair = pair.clone();
                tokio::task::spawn_blocking(move || resync(&pass_pair))
                    .await
                    .map_err(|err| MirrorError::Task(err.to_string()))??;
            }
        }
    }

    drop(watcher);
    tracing::debug!("mirror service loop exited");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
