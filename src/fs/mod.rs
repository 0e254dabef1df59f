// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

pub mod mock;

/// Abstract filesystem interface used by file-backed location readers.
///
/// A missing file must surface from `read_to_string` as an
/// `io::Error` of kind `NotFound` somewhere in the error chain.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Replace the file contents. Readers never observe a partial write.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Whether `err` was caused by a missing file.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
    })
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).with_context(|| format!("creating dir {:?}", dir))?;

        // Stage next to the target so the rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {:?}", dir))?;
        staged
            .write_all(contents)
            .and_then(|()| staged.as_file().sync_all())
            .with_context(|| format!("writing temp file for {:?}", path))?;
        staged
            .persist(path)
            .with_context(|| format!("replacing file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_contents_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("location.txt");
        let real = RealFileSystem;

        real.write(&path, b"#a=1\n").unwrap();
        real.write(&path, b"#b=2\n").unwrap();

        assert_eq!(real.read_to_string(&path).unwrap(), "#b=2\n");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("location.txt")]);
    }

    #[test]
    fn missing_file_reads_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = RealFileSystem
            .read_to_string(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(is_not_found(&err));

        let other = anyhow::anyhow!("something else");
        assert!(!is_not_found(&other));
    }
}
