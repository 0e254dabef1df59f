// src/source.rs

//! Navigation-change sources feeding the runtime.
//!
//! None of them carry a payload: they only say "the location may have
//! changed". The watcher re-reads the location itself.

use std::path::{Path, PathBuf};

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::location::SharedLocation;

/// Handle for the location file watcher.
///
/// Dropping this handle stops watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `path` and send `LocationChanged` whenever it is touched.
///
/// The parent directory is watched (non-recursively) so the file may be
/// created, replaced or removed after startup.
pub fn spawn_location_watcher(
    path: impl AsRef<Path>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let path = path.as_ref();
    let dir = watch_dir_of(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| anyhow::anyhow!("location path {:?} has no file name", path))?;

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let touches_file = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if !touches_file {
                    return;
                }
                match runtime_tx.try_send(RuntimeEvent::LocationChanged) {
                    // A pending event already makes the runtime re-read.
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => {
                        debug!("runtime channel closed; dropping location event");
                    }
                }
            }
            Err(err) => warn!("location watch error: {err}"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("location watcher started on {:?}", path);

    Ok(WatcherHandle { _inner: watcher })
}

fn watch_dir_of(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    parent.canonicalize().unwrap_or(parent)
}

/// Read locations from stdin, one per line.
pub fn spawn_stdin_source(location: SharedLocation, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    spawn_line_source(BufReader::new(tokio::io::stdin()), location, runtime_tx);
}

/// Read locations from `reader`, one per line.
///
/// Each line replaces the shared location and triggers `LocationChanged`;
/// EOF requests shutdown.
pub fn spawn_line_source<R>(
    reader: R,
    location: SharedLocation,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> tokio::task::JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    location.set(line.trim());
                    if runtime_tx.send(RuntimeEvent::LocationChanged).await.is_err() {
                        return;
                    }
                }
                Ok(None) => {
                    debug!("location input closed");
                    break;
                }
                Err(err) => {
                    warn!("failed to read location line: {err}");
                    break;
                }
            }
        }
        let _ = runtime_tx.send(RuntimeEvent::ShutdownRequested).await;
    })
}

/// Ctrl-C → graceful shutdown.
pub fn spawn_ctrl_c(runtime_tx: mpsc::Sender<RuntimeEvent>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = runtime_tx.send(RuntimeEvent::ShutdownRequested).await;
    });
}
