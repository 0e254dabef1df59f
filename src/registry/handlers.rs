// src/registry/handlers.rs

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::errors::{HashKeyAction, HashwatchError, Result};
use crate::registry::entry::{HandlerEntry, WatchOptions};
use crate::registry::{EvaluationReport, FiredTransition};
use crate::snapshot::HashSnapshotStore;
use crate::types::{CallbackErrorPolicy, HandlerId, Transition};

/// Evaluate one handler against the store and invoke its matching callback.
///
/// Returns the transition when a callback actually ran, `None` when the key
/// did not move or the handler has no callback for that kind.
pub fn evaluate(
    entry: &mut HandlerEntry,
    store: &HashSnapshotStore,
) -> Result<Option<Transition>> {
    let Some(transition) = store.transition_for(entry.hash_key()) else {
        return Ok(None);
    };

    match entry.invoke(&transition) {
        None => Ok(None),
        Some(Ok(())) => {
            debug!(
                key = %entry.hash_key(),
                id = %entry.id(),
                kind = %transition.kind(),
                "handler fired"
            );
            Ok(Some(transition))
        }
        Some(Err(source)) => Err(HashwatchError::Callback {
            key: entry.hash_key().to_string(),
            id: entry.id(),
            kind: transition.kind(),
            source,
        }),
    }
}

/// Handlers indexed by hash key.
///
/// Keys are visited in sorted order; handlers for one key in the order they
/// were added.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Vec<HandlerEntry>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and return its fresh id.
    pub fn add(&mut self, options: WatchOptions) -> Result<HandlerId> {
        if options.hash_key().is_empty() {
            return Err(HashwatchError::MissingHashKey {
                action: HashKeyAction::Watch,
            });
        }

        let id = HandlerId::next();
        let entry = HandlerEntry::from_options(options, id);
        debug!(key = %entry.hash_key(), %id, "registered handler");
        self.handlers
            .entry(entry.hash_key().to_string())
            .or_default()
            .push(entry);
        Ok(id)
    }

    /// Remove one handler by id, or every handler for `hash_key` when `id`
    /// is `None`. Unknown keys and ids are ignored.
    pub fn remove(&mut self, hash_key: &str, id: Option<HandlerId>) {
        match id {
            Some(id) => {
                let Some(list) = self.handlers.get_mut(hash_key) else {
                    return;
                };
                let before = list.len();
                list.retain(|e| e.id() != id);
                if list.len() < before {
                    debug!(key = %hash_key, %id, "removed handler");
                }
                if list.is_empty() {
                    self.handlers.remove(hash_key);
                }
            }
            None => {
                if let Some(list) = self.handlers.remove(hash_key) {
                    debug!(key = %hash_key, removed = list.len(), "removed all handlers for key");
                }
            }
        }
    }

    /// Evaluate every handler of every key against `store`.
    pub fn evaluate_all(
        &mut self,
        store: &HashSnapshotStore,
        policy: CallbackErrorPolicy,
    ) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::default();
        for entry in self.handlers.values_mut().flatten() {
            record(&mut report, entry, store, policy)?;
        }
        Ok(report)
    }

    /// Evaluate the single handler registered under `id`, if it exists.
    pub fn evaluate_id(
        &mut self,
        id: HandlerId,
        store: &HashSnapshotStore,
        policy: CallbackErrorPolicy,
    ) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::default();
        if let Some(entry) = self
            .handlers
            .values_mut()
            .flatten()
            .find(|e| e.id() == id)
        {
            record(&mut report, entry, store, policy)?;
        }
        Ok(report)
    }

    pub fn handlers_for(&self, hash_key: &str) -> &[HandlerEntry] {
        self.handlers
            .get(hash_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Total number of registered handlers across all keys.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

fn record(
    report: &mut EvaluationReport,
    entry: &mut HandlerEntry,
    store: &HashSnapshotStore,
    policy: CallbackErrorPolicy,
) -> Result<()> {
    match evaluate(entry, store) {
        Ok(Some(transition)) => {
            report.fired.push(FiredTransition {
                key: entry.hash_key().to_string(),
                id: entry.id(),
                transition,
            });
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => match policy {
            CallbackErrorPolicy::Propagate => Err(err),
            CallbackErrorPolicy::Isolate => {
                warn!(error = %err, "handler callback failed; continuing");
                report.failures.push(err);
                Ok(())
            }
        },
    }
}
