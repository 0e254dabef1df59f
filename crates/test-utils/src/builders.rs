#![allow(dead_code)]

use hashwatch::config::{ConfigFile, ConfigSection, RawConfigFile, WatchConfig};
use hashwatch::types::{CallbackErrorPolicy, TransitionKind};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                watch: Vec::new(),
            },
        }
    }

    pub fn with_watch(mut self, watch: WatchConfig) -> Self {
        self.config.watch.push(watch);
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.config.config.location = Some(location.to_string());
        self
    }

    pub fn with_callback_errors(mut self, policy: CallbackErrorPolicy) -> Self {
        self.config.config.callback_errors = policy;
        self
    }

    /// The unvalidated config, for exercising validation failures.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `WatchConfig`.
pub struct WatchConfigBuilder {
    watch: WatchConfig,
}

impl WatchConfigBuilder {
    pub fn new(key: &str) -> Self {
        Self {
            watch: WatchConfig::new(key),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.watch.label = Some(label.to_string());
        self
    }

    /// Replace the default "all events" list.
    pub fn events(mut self, events: &[TransitionKind]) -> Self {
        self.watch.events = events.to_vec();
        self
    }

    pub fn build(self) -> WatchConfig {
        self.watch
    }
}
