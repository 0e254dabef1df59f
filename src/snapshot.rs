// src/snapshot.rs

//! Parsing of hash fragments and the two-snapshot store.
//!
//! A hash like `#!foo=1&bar` is stripped of its marker and parsed into
//! `{"foo": Some("1"), "bar": None}`. The store keeps exactly two parses:
//! the one before the latest resync and the latest one.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{HashValue, Transition};

/// Parsed key/value pairs of one hash string.
pub type ParsedHash = HashMap<String, HashValue>;

/// Remove a leading `#!` or `#` marker.
pub fn strip_marker(input: &str) -> &str {
    input
        .strip_prefix("#!")
        .or_else(|| input.strip_prefix('#'))
        .unwrap_or(input)
}

/// Fragment part of a location, including the leading `#` if any.
///
/// A location without `#` is a bare fragment (`foo=1`) unless it looks like
/// a URL or an absolute path, in which case it has no fragment and `""` is
/// returned.
pub fn fragment_of(location: &str) -> &str {
    match location.find('#') {
        Some(idx) => &location[idx..],
        None if looks_like_url(location) => "",
        None => location,
    }
}

fn looks_like_url(location: &str) -> bool {
    location.contains("://") || location.starts_with('/')
}

/// Split a marker-free hash into pairs.
///
/// Parts are separated by `&`; each part is split on its first `=`. A part
/// without `=` maps to `None`. Parsing never fails: the empty string yields
/// the single key `""`.
pub fn parse_pairs(raw: &str) -> ParsedHash {
    raw.split('&')
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_string(), Some(value.to_string())),
            None => (part.to_string(), None),
        })
        .collect()
}

/// One parsed state of the hash fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    raw: String,
    pairs: ParsedHash,
}

impl Snapshot {
    /// Parse a hash string, with or without its leading marker.
    pub fn parse(input: &str) -> Self {
        let raw = strip_marker(input);
        Self {
            raw: raw.to_string(),
            pairs: parse_pairs(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn pairs(&self) -> &ParsedHash {
        &self.pairs
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    /// Value for `key`; `None` both when absent and when present without value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).and_then(|v| v.as_deref())
    }
}

/// Holds the previous and current snapshots.
///
/// Both start empty, so every key is absent before the first resync.
#[derive(Debug, Clone, Default)]
pub struct HashSnapshotStore {
    previous: Snapshot,
    current: Snapshot,
}

impl HashSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw_hash_input` into the new current snapshot; the old current
    /// one becomes previous.
    pub fn resync(&mut self, raw_hash_input: &str) {
        let next = Snapshot::parse(raw_hash_input);
        debug!(raw = %next.raw, previous = %self.current.raw, "resync hash snapshots");
        self.previous = std::mem::replace(&mut self.current, next);
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// `(present in previous, present in current)`.
    pub fn key_presence(&self, key: &str) -> (bool, bool) {
        (self.previous.contains(key), self.current.contains(key))
    }

    /// `(current value, previous value)`.
    pub fn values_for(&self, key: &str) -> (Option<&str>, Option<&str>) {
        (self.current.value(key), self.previous.value(key))
    }

    /// Classify how `key` moved between the two snapshots.
    pub fn transition_for(&self, key: &str) -> Option<Transition> {
        let (was_present, is_present) = self.key_presence(key);
        let (curr, prev) = self.values_for(key);

        match (was_present, is_present) {
            (false, true) => Some(Transition::Appeared {
                value: curr.map(str::to_string),
            }),
            (true, false) => Some(Transition::Disappeared {
                value: prev.map(str::to_string),
            }),
            (true, true) if curr != prev => Some(Transition::Changed {
                current: curr.map(str::to_string),
                previous: prev.map(str::to_string),
            }),
            _ => None,
        }
    }
}
