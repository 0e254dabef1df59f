// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HashwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::HashwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_watches(cfg)?;
    validate_global_config(cfg)?;
    validate_watches(cfg)?;
    Ok(())
}

fn ensure_has_watches(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.is_empty() {
        return Err(HashwatchError::ConfigError(
            "config must contain at least one [[watch]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    // callback_errors is strongly typed and validated during deserialization.
    if let Some(location) = &cfg.config.location {
        if location.trim().is_empty() {
            return Err(HashwatchError::ConfigError(
                "[config].location must not be empty (omit it to read stdin)".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_watches(cfg: &RawConfigFile) -> Result<()> {
    for (idx, watch) in cfg.watch.iter().enumerate() {
        if watch.key.is_empty() {
            return Err(HashwatchError::ConfigError(format!(
                "watch #{} has an empty `key`; nothing to watch",
                idx + 1
            )));
        }
        if watch.events.is_empty() {
            return Err(HashwatchError::ConfigError(format!(
                "watch '{}' has an empty `events` list",
                watch.key
            )));
        }
        let mut seen = HashSet::new();
        for kind in watch.events.iter() {
            if !seen.insert(kind) {
                return Err(HashwatchError::ConfigError(format!(
                    "watch '{}' lists event '{}' more than once",
                    watch.key, kind
                )));
            }
        }
    }
    Ok(())
}
