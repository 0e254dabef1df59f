// src/registry/entry.rs

use std::fmt;

use crate::types::{HandlerId, Transition};

/// Callback for appear/disappear transitions. Receives the relevant value.
pub type ValueCallback = Box<dyn FnMut(Option<&str>) -> anyhow::Result<()> + Send>;

/// Callback for change transitions. Receives `(current, previous)`.
pub type ChangeCallback =
    Box<dyn FnMut(Option<&str>, Option<&str>) -> anyhow::Result<()> + Send>;

/// What a caller hands to `watch`: a hash key plus up to three callbacks.
///
/// ```
/// use hashwatch::registry::WatchOptions;
///
/// let options = WatchOptions::new("page")
///     .on_appear(|value| {
///         println!("page is {value:?}");
///         Ok(())
///     })
///     .on_change(|current, previous| {
///         println!("page {previous:?} -> {current:?}");
///         Ok(())
///     });
/// assert_eq!(options.hash_key(), "page");
/// ```
#[derive(Default)]
pub struct WatchOptions {
    hash_key: String,
    on_appear: Option<ValueCallback>,
    on_disappear: Option<ValueCallback>,
    on_change: Option<ChangeCallback>,
}

impl WatchOptions {
    pub fn new(hash_key: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
            ..Self::default()
        }
    }

    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    pub fn on_appear<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<&str>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_appear = Some(Box::new(f));
        self
    }

    pub fn on_disappear<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<&str>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_disappear = Some(Box::new(f));
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<&str>, Option<&str>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for WatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchOptions")
            .field("hash_key", &self.hash_key)
            .field("on_appear", &self.on_appear.is_some())
            .field("on_disappear", &self.on_disappear.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// A registered handler. Never mutated after registration, only removed.
pub struct HandlerEntry {
    hash_key: String,
    id: HandlerId,
    on_appear: Option<ValueCallback>,
    on_disappear: Option<ValueCallback>,
    on_change: Option<ChangeCallback>,
}

impl HandlerEntry {
    pub(crate) fn from_options(options: WatchOptions, id: HandlerId) -> Self {
        Self {
            hash_key: options.hash_key,
            id,
            on_appear: options.on_appear,
            on_disappear: options.on_disappear,
            on_change: options.on_change,
        }
    }

    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Call the callback matching `transition`.
    ///
    /// Returns `None` when no callback is registered for that kind; a missing
    /// callback is a no-op for every kind, `on_change` included.
    pub(crate) fn invoke(&mut self, transition: &Transition) -> Option<anyhow::Result<()>> {
        match transition {
            Transition::Appeared { value } => {
                self.on_appear.as_mut().map(|cb| cb(value.as_deref()))
            }
            Transition::Disappeared { value } => {
                self.on_disappear.as_mut().map(|cb| cb(value.as_deref()))
            }
            Transition::Changed { current, previous } => self
                .on_change
                .as_mut()
                .map(|cb| cb(current.as_deref(), previous.as_deref())),
        }
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("hash_key", &self.hash_key)
            .field("id", &self.id)
            .field("on_appear", &self.on_appear.is_some())
            .field("on_disappear", &self.on_disappear.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
