mod common;
use crate::common::init_tracing;
use crate::common::recorder::{Call, Recorder};
use crate::common::{navigate, shared_watcher};

use hashwatch::WatchOptions;
use hashwatch::errors::{HashKeyAction, HashwatchError};

#[test]
fn appear_fires_with_current_value() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("");
    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();

    navigate(&mut watcher, &location, "");
    navigate(&mut watcher, &location, "#foo=1");

    assert_eq!(rec.calls(), vec![Call::appear("1")]);
}

#[test]
fn change_fires_with_current_then_previous() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("#foo=1");
    watcher.attach().unwrap();
    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();
    rec.take();

    navigate(&mut watcher, &location, "#foo=2");

    assert_eq!(rec.calls(), vec![Call::change("2", "1")]);
}

#[test]
fn disappear_fires_with_previous_value_and_untouched_keys_stay_quiet() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("#foo=1&bar=2");
    watcher.attach().unwrap();

    let foo = Recorder::new();
    let bar = Recorder::new();
    watcher.watch(foo.options("foo")).unwrap();
    watcher.watch(bar.options("bar")).unwrap();
    foo.take();
    bar.take();

    navigate(&mut watcher, &location, "#bar=2");

    assert_eq!(foo.calls(), vec![Call::disappear("1")]);
    assert!(bar.calls().is_empty());
}

#[test]
fn valueless_key_gaining_a_value_is_a_change_not_an_appear() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("#foo");
    watcher.attach().unwrap();
    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();
    rec.take();

    navigate(&mut watcher, &location, "#foo=1");

    assert_eq!(
        rec.calls(),
        vec![Call::Change(Some("1".to_string()), None)]
    );
}

#[test]
fn watching_an_already_present_key_fires_appear_immediately() {
    init_tracing();
    let (mut watcher, _location) = shared_watcher("#!foo=1");
    watcher.attach().unwrap();

    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();

    assert_eq!(rec.calls(), vec![Call::appear("1")]);
}

#[test]
fn watch_without_hash_key_is_rejected_and_registers_nothing() {
    init_tracing();
    let (mut watcher, _location) = shared_watcher("");

    let err = watcher.watch(WatchOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        HashwatchError::MissingHashKey {
            action: HashKeyAction::Watch
        }
    ));
    assert_eq!(err.to_string(), "Hash key is not defined, nothing to watch.");
    assert!(watcher.registry().is_empty());

    let err = watcher.unwatch("", None).unwrap_err();
    assert_eq!(err.to_string(), "Hash key is not defined, nothing to unwatch.");
}

#[test]
fn unwatch_by_id_leaves_siblings_running() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("");
    watcher.attach().unwrap();

    let first = Recorder::new();
    let second = Recorder::new();
    let first_id = watcher.watch(first.options("foo")).unwrap();
    let second_id = watcher.watch(second.options("foo")).unwrap();
    assert_ne!(first_id, second_id);

    watcher.unwatch("foo", Some(first_id)).unwrap();

    navigate(&mut watcher, &location, "#foo=1");
    navigate(&mut watcher, &location, "#foo=2");
    navigate(&mut watcher, &location, "#");

    assert!(first.calls().is_empty());
    assert_eq!(
        second.calls(),
        vec![Call::appear("1"), Call::change("2", "1"), Call::disappear("2")]
    );
}

#[test]
fn unwatch_without_id_silences_every_handler_for_the_key() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("");
    watcher.attach().unwrap();

    let a = Recorder::new();
    let b = Recorder::new();
    let other = Recorder::new();
    watcher.watch(a.options("foo")).unwrap();
    watcher.watch(b.options("foo")).unwrap();
    watcher.watch(other.options("bar")).unwrap();

    watcher.unwatch("foo", None).unwrap();
    // Unknown keys are fine.
    watcher.unwatch("never-watched", None).unwrap();

    navigate(&mut watcher, &location, "#foo=1&bar=1");

    assert!(a.calls().is_empty());
    assert!(b.calls().is_empty());
    assert_eq!(other.calls(), vec![Call::appear("1")]);
    assert!(watcher.registry().handlers_for("foo").is_empty());
}

#[test]
fn unchanged_hash_fires_nothing() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("#foo=1");
    watcher.attach().unwrap();
    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();
    rec.take();

    navigate(&mut watcher, &location, "#foo=1");
    navigate(&mut watcher, &location, "foo=1");

    assert!(rec.calls().is_empty());
    assert_eq!(
        watcher.snapshots().previous(),
        watcher.snapshots().current()
    );
}

#[test]
fn bare_fragment_without_marker_is_parsed() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("foo=1&bar");
    let rec = Recorder::new();
    watcher.watch(rec.options("foo")).unwrap();
    watcher.watch(rec.options("bar")).unwrap();

    watcher.attach().unwrap();
    assert_eq!(watcher.snapshots().current().value("foo"), Some("1"));
    assert!(watcher.snapshots().current().contains("bar"));

    navigate(&mut watcher, &location, "foo=2");

    assert_eq!(
        rec.take(),
        vec![
            Call::Appear(None),
            Call::appear("1"),
            Call::Disappear(None),
            Call::change("2", "1"),
        ]
    );
}

#[test]
fn full_urls_are_reduced_to_their_fragment() {
    init_tracing();
    let (mut watcher, location) = shared_watcher("https://example.test/app?x=1#!tab=2");
    let rec = Recorder::new();
    watcher.watch(rec.options("tab")).unwrap();
    watcher.watch(rec.options("x")).unwrap();

    watcher.attach().unwrap();
    navigate(&mut watcher, &location, "https://example.test/app?x=1");

    assert_eq!(rec.calls(), vec![Call::appear("2"), Call::disappear("2")]);
}

#[test]
fn independent_watchers_do_not_share_state() {
    init_tracing();
    let (mut left, left_loc) = shared_watcher("");
    let (mut right, _right_loc) = shared_watcher("");
    let rec_left = Recorder::new();
    let rec_right = Recorder::new();
    let id_left = left.watch(rec_left.options("k")).unwrap();
    let id_right = right.watch(rec_right.options("k")).unwrap();

    navigate(&mut left, &left_loc, "#k=1");
    right.on_navigation().unwrap();

    assert_eq!(rec_left.calls(), vec![Call::appear("1")]);
    assert!(rec_right.calls().is_empty());
    // Ids stay unique across instances.
    assert_ne!(id_left, id_right);
}
