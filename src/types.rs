use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

/// Value associated with a hash key. `None` when the key appeared without `=`.
pub type HashValue = Option<String>;

/// Process-wide handler id counter, seeded at 1.
static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of one registered handler.
///
/// Ids are unique for the lifetime of the process, across every registry
/// instance, and display as `_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Outcome of comparing one key across the previous and current snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Absent before, present now. Carries the current value.
    Appeared { value: HashValue },
    /// Present before, absent now. Carries the previous value.
    Disappeared { value: HashValue },
    /// Present in both with a different value.
    Changed {
        current: HashValue,
        previous: HashValue,
    },
}

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Transition::Appeared { .. } => TransitionKind::Appear,
            Transition::Disappeared { .. } => TransitionKind::Disappear,
            Transition::Changed { .. } => TransitionKind::Change,
        }
    }
}

/// Transition kinds, also used to select events in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Appear,
    Disappear,
    Change,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 3] = [
        TransitionKind::Appear,
        TransitionKind::Disappear,
        TransitionKind::Change,
    ];
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::Appear => f.write_str("appear"),
            TransitionKind::Disappear => f.write_str("disappear"),
            TransitionKind::Change => f.write_str("change"),
        }
    }
}

impl FromStr for TransitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "appear" => Ok(TransitionKind::Appear),
            "disappear" => Ok(TransitionKind::Disappear),
            "change" => Ok(TransitionKind::Change),
            other => Err(format!(
                "invalid event: {other} (expected \"appear\", \"disappear\" or \"change\")"
            )),
        }
    }
}

/// What to do when a user callback returns an error during evaluation.
///
/// - `Isolate`: log the failure, record it, and keep evaluating the remaining
///   handlers (default behaviour).
/// - `Propagate`: abort the evaluation pass and return the error to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackErrorPolicy {
    Isolate,
    Propagate,
}

impl Default for CallbackErrorPolicy {
    fn default() -> Self {
        CallbackErrorPolicy::Isolate
    }
}

impl FromStr for CallbackErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isolate" => Ok(CallbackErrorPolicy::Isolate),
            "propagate" => Ok(CallbackErrorPolicy::Propagate),
            other => Err(format!(
                "invalid callback_errors: {other} (expected \"isolate\" or \"propagate\")"
            )),
        }
    }
}
