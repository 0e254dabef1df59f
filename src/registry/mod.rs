// src/registry/mod.rs

//! Per-key handler registry and transition dispatch.
//!
//! Handlers are stored per hash key in registration order. On every
//! evaluation pass each handler is compared against the snapshot store and
//! the callback matching its key's transition (if any) is invoked.

pub mod entry;
pub mod handlers;

use crate::errors::HashwatchError;
use crate::types::{HandlerId, Transition};

pub use entry::{ChangeCallback, HandlerEntry, ValueCallback, WatchOptions};
pub use handlers::{HandlerRegistry, evaluate};

/// A callback that ran successfully during an evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTransition {
    pub key: String,
    pub id: HandlerId,
    pub transition: Transition,
}

/// Summary of one evaluation pass.
///
/// `failures` is only ever populated under `CallbackErrorPolicy::Isolate`;
/// with `Propagate` the first failure is returned as an error instead.
#[derive(Debug, Default)]
pub struct EvaluationReport {
    pub fired: Vec<FiredTransition>,
    pub failures: Vec<HashwatchError>,
}

impl EvaluationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
