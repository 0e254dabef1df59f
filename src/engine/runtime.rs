// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{HashwatchError, Result};
use crate::watcher::HashWatcher;

use super::RuntimeEvent;

/// Drives a [`HashWatcher`] in response to `RuntimeEvent`s.
///
/// All semantics live in the watcher; this loop only reads the channel.
pub struct Runtime {
    watcher: HashWatcher,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(watcher: HashWatcher, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        Self { watcher, event_rx }
    }

    /// Main event loop.
    ///
    /// Returns the watcher when the channel closes or shutdown is requested,
    /// so callers can inspect its final state. Callback errors only escape
    /// under `CallbackErrorPolicy::Propagate`. A location that cannot be read
    /// is logged and the event skipped; the next event reads it again.
    pub async fn run(mut self) -> Result<HashWatcher> {
        info!("hashwatch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::LocationChanged => {
                    match self.watcher.refresh() {
                        Ok(Some(report)) => debug!(
                            fired = report.fired.len(),
                            failures = report.failures.len(),
                            "hash change handled"
                        ),
                        Ok(None) => {}
                        Err(err @ HashwatchError::Callback { .. }) => return Err(err),
                        Err(err) => {
                            warn!(error = %err, "failed to read location; skipping event");
                        }
                    }
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping runtime");
                    break;
                }
            }
        }

        Ok(self.watcher)
    }
}
