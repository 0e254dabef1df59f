// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod location;
pub mod logging;
pub mod registry;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod types;
pub mod watcher;

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_and_validate};
use crate::engine::{Runtime, RuntimeEvent};
use crate::location::{FileLocation, LocationReader, SharedLocation};
use crate::report::Reporter;
use crate::source::WatcherHandle;

pub use crate::registry::WatchOptions;
pub use crate::types::{CallbackErrorPolicy, HandlerId, Transition};
pub use crate::watcher::HashWatcher;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the location reader (file or stdin)
/// - one reporting handler per `[[watch]]` entry
/// - the navigation sources and the runtime loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let location_path: Option<PathBuf> = args
        .location
        .clone()
        .or_else(|| cfg.config.location.as_ref().map(PathBuf::from));

    // Keep the file watcher alive for the lifetime of the runtime.
    let mut _watcher_handle: Option<WatcherHandle> = None;

    let location: Box<dyn LocationReader> = match location_path {
        Some(path) => {
            if !args.once {
                _watcher_handle = Some(source::spawn_location_watcher(&path, rt_tx.clone())?);
            }
            Box::new(FileLocation::new(path))
        }
        None => {
            let shared = SharedLocation::default();
            if args.once {
                let mut line = String::new();
                BufReader::new(tokio::io::stdin())
                    .read_line(&mut line)
                    .await?;
                shared.set(line.trim());
            } else {
                source::spawn_stdin_source(shared.clone(), rt_tx.clone());
            }
            Box::new(shared)
        }
    };

    let reporter = Reporter::stdout();
    let mut watcher = HashWatcher::new(location).with_policy(cfg.config.callback_errors);
    for spec in cfg.watch.iter() {
        let id = watcher.watch(reporter.watch_options(spec))?;
        debug!(key = %spec.key, %id, "watching hash key");
    }

    let report = watcher.attach()?;
    info!(fired = report.fired.len(), "baseline evaluated");

    if args.once {
        return Ok(());
    }

    source::spawn_ctrl_c(rt_tx.clone());
    drop(rt_tx);

    let runtime = Runtime::new(watcher, rt_rx);
    runtime.run().await?;
    Ok(())
}

/// Simple dry-run output: print the global config and every watch.
fn print_dry_run(cfg: &ConfigFile) {
    println!("hashwatch dry-run");
    match cfg.config.location {
        Some(ref location) => println!("  config.location = {location}"),
        None => println!("  config.location = <stdin>"),
    }
    println!("  config.callback_errors = {:?}", cfg.config.callback_errors);
    println!();

    println!("watches ({}):", cfg.watch.len());
    for watch in cfg.watch.iter() {
        println!("  - {}", watch.key);
        if let Some(ref label) = watch.label {
            println!("      label: {label}");
        }
        let events: Vec<String> = watch.events.iter().map(|e| e.to_string()).collect();
        println!("      events: {}", events.join(", "));
    }

    debug!("dry-run complete (no location read)");
}
