// src/watcher.rs

//! The hash watcher instance: snapshot store + handler registry + location.
//!
//! Every public entry point takes `&mut self`, so a resync and the
//! evaluation pass that follows it always run as one unit.

use tracing::{debug, info};

use crate::errors::{HashKeyAction, HashwatchError, Result};
use crate::location::LocationReader;
use crate::registry::{EvaluationReport, HandlerRegistry, WatchOptions};
use crate::snapshot::{HashSnapshotStore, fragment_of, strip_marker};
use crate::types::{CallbackErrorPolicy, HandlerId};

#[derive(Debug)]
pub struct HashWatcher {
    store: HashSnapshotStore,
    registry: HandlerRegistry,
    location: Box<dyn LocationReader>,
    policy: CallbackErrorPolicy,
}

impl HashWatcher {
    pub fn new(location: impl LocationReader + 'static) -> Self {
        Self {
            store: HashSnapshotStore::new(),
            registry: HandlerRegistry::new(),
            location: Box::new(location),
            policy: CallbackErrorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CallbackErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CallbackErrorPolicy {
        self.policy
    }

    /// Register a handler and evaluate it once against the current snapshots.
    ///
    /// A handler added after its key already appeared gets `on_appear` right
    /// away. Under `Propagate`, a failing callback during that evaluation is
    /// returned as an error but the handler stays registered; the error
    /// carries its id.
    pub fn watch(&mut self, options: WatchOptions) -> Result<HandlerId> {
        let id = self.registry.add(options)?;
        let report = self.registry.evaluate_id(id, &self.store, self.policy)?;
        debug!(%id, fired = report.fired.len(), "evaluated new handler on attach");
        Ok(id)
    }

    /// Remove one handler (`Some(id)`) or all handlers for `hash_key`.
    pub fn unwatch(&mut self, hash_key: &str, id: Option<HandlerId>) -> Result<()> {
        if hash_key.is_empty() {
            return Err(HashwatchError::MissingHashKey {
                action: HashKeyAction::Unwatch,
            });
        }
        self.registry.remove(hash_key, id);
        Ok(())
    }

    /// Establish the baseline at startup: resync and fire `on_appear` for
    /// keys already present.
    pub fn attach(&mut self) -> Result<EvaluationReport> {
        info!(handlers = self.registry.len(), "attaching hash watcher");
        self.on_navigation()
    }

    /// Entry point for one observed hash change: resync, then evaluate every
    /// registered handler.
    pub fn on_navigation(&mut self) -> Result<EvaluationReport> {
        let location = self.location.current_location()?;
        self.sync(&location)
    }

    /// Like [`HashWatcher::on_navigation`], but only when the hash differs
    /// from the current snapshot. Returns `None` when nothing changed.
    pub fn refresh(&mut self) -> Result<Option<EvaluationReport>> {
        let location = self.location.current_location()?;
        if strip_marker(fragment_of(&location)) == self.store.current().raw() {
            debug!("location changed but hash did not; skipping");
            return Ok(None);
        }
        self.sync(&location).map(Some)
    }

    pub fn snapshots(&self) -> &HashSnapshotStore {
        &self.store
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    fn sync(&mut self, location: &str) -> Result<EvaluationReport> {
        self.store.resync(fragment_of(location));
        let report = self.registry.evaluate_all(&self.store, self.policy)?;
        debug!(
            raw = %self.store.current().raw(),
            fired = report.fired.len(),
            failures = report.failures.len(),
            "evaluated handlers"
        );
        Ok(report)
    }
}
