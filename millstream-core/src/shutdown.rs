//! Cooperative shutdown signal.
//!
//! Termination signals never exit the process directly. The listener task
//! logs one shutdown notice and triggers a broadcast that long-running
//! loops observe between units of work, so an in-flight pass always
//! completes before the process winds down.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Clone-able handle used to request and observe process shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: broadcast::Sender<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Obtain a receiver that resolves once shutdown is requested.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request shutdown. Safe to call with no live subscribers.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a task that converts SIGINT/SIGTERM into a shutdown trigger.
///
/// Logs exactly one "shutting down gracefully" record at INFO when a
/// termination signal arrives.
pub fn spawn_signal_listener(shutdown: &ShutdownSignal) -> JoinHandle<()> {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_termination().await;
        tracing::info!("shutting down gracefully");
        shutdown.trigger();
    })
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{signal, SignalKind};

    match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(mut interrupt), Ok(mut terminate)) => {
            tokio::select! {
                _ = interrupt.recv() => {}
                _ = terminate.recv() => {}
            }
        }
        _ => {
            // Signal registration failed; ctrl-c still covers interactive use.
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    let _ = tokio::signal::ctrl_c().await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_wakes_a_subscriber() {
        let shutdown = ShutdownSignal::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("subscriber should wake")
            .expect("broadcast should deliver");
    }

    #[tokio::test]
    async fn trigger_wakes_every_subscriber() {
        let shutdown = ShutdownSignal::new();
        let mut first = shutdown.subscribe();
        let mut second = shutdown.subscribe();
        shutdown.trigger();
        first.recv().await.expect("first subscriber");
        second.recv().await.expect("second subscriber");
    }

    #[tokio::test]
    async fn trigger_without_subscribers_is_a_no_op() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        // A receiver subscribed after the trigger sees nothing until the
        // next trigger.
        let mut late = shutdown.subscribe();
        shutdown.trigger();
        late.recv().await.expect("late subscriber sees new trigger");
    }
}
