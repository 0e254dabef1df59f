#![allow(dead_code)]

pub use hashwatch_test_utils::{builders, init_tracing, recorder, with_timeout};

use hashwatch::HashWatcher;
use hashwatch::location::SharedLocation;

/// A watcher over an in-memory location, plus the handle used to navigate.
pub fn shared_watcher(initial: &str) -> (HashWatcher, SharedLocation) {
    let location = SharedLocation::new(initial);
    (HashWatcher::new(location.clone()), location)
}

/// Point the location at `hash` and run one navigation pass.
pub fn navigate(watcher: &mut HashWatcher, location: &SharedLocation, hash: &str) {
    location.set(hash);
    watcher.on_navigation().expect("navigation pass failed");
}
