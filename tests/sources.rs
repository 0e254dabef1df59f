mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use hashwatch::engine::RuntimeEvent;
use hashwatch::location::{FileLocation, LocationReader, SharedLocation};
use hashwatch::source::{spawn_line_source, spawn_location_watcher};

type TestResult = Result<(), Box<dyn Error>>;

const SETTLE: Duration = Duration::from_millis(300);

#[tokio::test]
async fn location_watcher_reports_writes_to_the_watched_file_only() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("location.txt");
    let (tx, mut rx) = mpsc::channel(8);
    let _handle = spawn_location_watcher(&path, tx)?;

    std::fs::write(dir.path().join("other.txt"), "#k=1\n")?;
    tokio::time::sleep(SETTLE).await;
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

    FileLocation::new(&path).set("#k=1")?;
    let event = with_timeout(rx.recv()).await;
    assert_eq!(event, Some(RuntimeEvent::LocationChanged));
    Ok(())
}

#[tokio::test]
async fn location_watcher_coalesces_bursts_into_a_full_channel() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("location.txt");
    let (tx, mut rx) = mpsc::channel(1);
    let _handle = spawn_location_watcher(&path, tx)?;

    let location = FileLocation::new(&path);
    for step in 0..5 {
        location.set(&format!("#step={step}"))?;
    }

    let event = with_timeout(rx.recv()).await;
    assert_eq!(event, Some(RuntimeEvent::LocationChanged));
    tokio::time::sleep(SETTLE).await;
    // Everything after the first pending event was dropped, not queued.
    let mut extra = 0;
    while rx.try_recv().is_ok() {
        extra += 1;
    }
    assert!(extra <= 1, "expected at most one pending event, got {extra}");
    assert_eq!(location.current_location()?, "#step=4");
    Ok(())
}

#[tokio::test]
async fn line_source_sets_location_per_line_then_shuts_down() -> TestResult {
    init_tracing();
    let input: &'static [u8] = b"#a=1\n  foo=2  \n";
    let location = SharedLocation::default();
    let (tx, mut rx) = mpsc::channel(8);

    let task = spawn_line_source(BufReader::new(input), location.clone(), tx);
    with_timeout(task).await?;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            RuntimeEvent::LocationChanged,
            RuntimeEvent::LocationChanged,
            RuntimeEvent::ShutdownRequested,
        ]
    );
    assert_eq!(location.current_location()?, "foo=2");
    Ok(())
}

#[tokio::test]
async fn line_source_stops_when_runtime_is_gone() -> TestResult {
    init_tracing();
    let input: &'static [u8] = b"#a=1\n#a=2\n";
    let location = SharedLocation::default();
    let (tx, rx) = mpsc::channel(8);
    drop(rx);

    let task = spawn_line_source(BufReader::new(input), location.clone(), tx);
    with_timeout(task).await?;

    assert_eq!(location.current_location()?, "#a=1");
    Ok(())
}
