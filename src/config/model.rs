// src/config/model.rs

use serde::Deserialize;

use crate::types::{CallbackErrorPolicy, TransitionKind};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// location = "location.txt"
/// callback_errors = "isolate"
///
/// [[watch]]
/// key = "page"
/// label = "nav"
/// events = ["appear", "change"]
/// ```
///
/// `[config]` is optional; at least one `[[watch]]` entry is required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub watch: Vec<WatchConfig>,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub watch: Vec<WatchConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, watch: Vec<WatchConfig>) -> Self {
        Self { config, watch }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// File holding the current location (URL or fragment).
    ///
    /// If `None`, locations are read line by line from stdin.
    #[serde(default)]
    pub location: Option<String>,

    /// `"isolate"` (default) or `"propagate"`.
    #[serde(default)]
    pub callback_errors: CallbackErrorPolicy,
}

/// One `[[watch]]` entry: a hash key and the transitions to report.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    pub key: String,

    /// Optional prefix for output lines.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default = "default_events")]
    pub events: Vec<TransitionKind>,
}

fn default_events() -> Vec<TransitionKind> {
    TransitionKind::ALL.to_vec()
}

impl WatchConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            events: default_events(),
        }
    }

    pub fn reports(&self, kind: TransitionKind) -> bool {
        self.events.contains(&kind)
    }
}
