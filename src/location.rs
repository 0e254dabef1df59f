// src/location.rs

//! Sources of the "current location" a watcher reads on every navigation.
//!
//! Readers return a whole location (a URL or a bare fragment); the watcher
//! extracts the fragment itself.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::fs::{FileSystem, RealFileSystem, is_not_found};

/// Supplies the current location on demand.
pub trait LocationReader: Send + Debug {
    fn current_location(&self) -> Result<String>;
}

impl<L: LocationReader + ?Sized> LocationReader for Box<L> {
    fn current_location(&self) -> Result<String> {
        (**self).current_location()
    }
}

/// In-memory location that can be updated from anywhere holding a clone.
#[derive(Debug, Clone, Default)]
pub struct SharedLocation {
    inner: Arc<Mutex<String>>,
}

impl SharedLocation {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial.into())),
        }
    }

    pub fn set(&self, location: impl Into<String>) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = location.into();
        }
    }
}

impl LocationReader for SharedLocation {
    fn current_location(&self) -> Result<String> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| anyhow!("shared location lock poisoned"))
    }
}

/// Location stored in a file, one URL or fragment, surrounding whitespace
/// ignored. A missing file reads as an empty location.
#[derive(Debug, Clone)]
pub struct FileLocation {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl FileLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, Arc::new(RealFileSystem))
    }

    pub fn with_fs(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored location.
    pub fn set(&self, location: &str) -> Result<()> {
        self.fs
            .write(&self.path, format!("{location}\n").as_bytes())
    }
}

impl LocationReader for FileLocation {
    fn current_location(&self) -> Result<String> {
        match self.fs.read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(err) if is_not_found(&err) => Ok(String::new()),
            Err(err) => Err(err),
        }
    }
}
