// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::fmt;

use thiserror::Error;

use crate::types::{HandlerId, TransitionKind};

/// Which public operation was missing its hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKeyAction {
    Watch,
    Unwatch,
}

impl fmt::Display for HashKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKeyAction::Watch => f.write_str("watch"),
            HashKeyAction::Unwatch => f.write_str("unwatch"),
        }
    }
}

#[derive(Error, Debug)]
pub enum HashwatchError {
    #[error("Hash key is not defined, nothing to {action}.")]
    MissingHashKey { action: HashKeyAction },

    #[error("{kind} callback {id} for hash key '{key}' failed: {source}")]
    Callback {
        key: String,
        id: HandlerId,
        kind: TransitionKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, HashwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hash_key_messages() {
        let watch = HashwatchError::MissingHashKey {
            action: HashKeyAction::Watch,
        };
        let unwatch = HashwatchError::MissingHashKey {
            action: HashKeyAction::Unwatch,
        };
        assert_eq!(watch.to_string(), "Hash key is not defined, nothing to watch.");
        assert_eq!(
            unwatch.to_string(),
            "Hash key is not defined, nothing to unwatch."
        );
    }
}
