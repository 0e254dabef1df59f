// src/engine/mod.rs

//! Async shell around the hash watcher.
//!
//! Sources (file watcher, stdin, Ctrl-C) push [`RuntimeEvent`]s into one
//! channel; the [`Runtime`] owns the [`crate::watcher::HashWatcher`] and
//! reacts to each event in turn.

/// Events flowing into the runtime from navigation sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// The location may have changed; re-read it and evaluate handlers.
    LocationChanged,
    /// Graceful shutdown requested (e.g. Ctrl-C, stdin closed).
    ShutdownRequested,
}

pub mod runtime;

pub use runtime::Runtime;
