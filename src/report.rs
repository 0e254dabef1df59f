// src/report.rs

//! Turns transitions into output lines for the `hashwatch` binary.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::config::WatchConfig;
use crate::registry::WatchOptions;
use crate::types::{Transition, TransitionKind};

/// Format one transition of `key`.
///
/// - `appear foo=1` / `appear foo` when the key has no value
/// - `disappear foo=1`
/// - `change foo: 1 -> 2`, a missing value shown as `(none)`
pub fn format_transition(label: Option<&str>, key: &str, transition: &Transition) -> String {
    let body = match transition {
        Transition::Appeared { value } | Transition::Disappeared { value } => {
            match value.as_deref() {
                Some(v) => format!("{} {key}={v}", transition.kind()),
                None => format!("{} {key}", transition.kind()),
            }
        }
        Transition::Changed { current, previous } => format!(
            "change {key}: {} -> {}",
            previous.as_deref().unwrap_or("(none)"),
            current.as_deref().unwrap_or("(none)"),
        ),
    };
    match label {
        Some(label) => format!("[{label}] {body}"),
        None => body,
    }
}

/// Line writer shared by every handler built from the config.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

impl Reporter {
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn emit(&self, line: &str) -> anyhow::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| anyhow!("reporter sink lock poisoned"))?;
        writeln!(sink, "{line}")?;
        sink.flush()?;
        Ok(())
    }

    /// Build watch options whose callbacks print the transitions `spec`
    /// asks for; other kinds are left without a callback.
    pub fn watch_options(&self, spec: &WatchConfig) -> WatchOptions {
        let mut options = WatchOptions::new(spec.key.clone());

        if spec.reports(TransitionKind::Appear) {
            let (reporter, label, key) = self.parts(spec);
            options = options.on_appear(move |value| {
                let t = Transition::Appeared {
                    value: value.map(str::to_string),
                };
                reporter.emit(&format_transition(label.as_deref(), &key, &t))
            });
        }
        if spec.reports(TransitionKind::Disappear) {
            let (reporter, label, key) = self.parts(spec);
            options = options.on_disappear(move |value| {
                let t = Transition::Disappeared {
                    value: value.map(str::to_string),
                };
                reporter.emit(&format_transition(label.as_deref(), &key, &t))
            });
        }
        if spec.reports(TransitionKind::Change) {
            let (reporter, label, key) = self.parts(spec);
            options = options.on_change(move |current, previous| {
                let t = Transition::Changed {
                    current: current.map(str::to_string),
                    previous: previous.map(str::to_string),
                };
                reporter.emit(&format_transition(label.as_deref(), &key, &t))
            });
        }

        options
    }

    fn parts(&self, spec: &WatchConfig) -> (Reporter, Option<String>, String) {
        (self.clone(), spec.label.clone(), spec.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn formats_each_transition_kind() {
        let appear = Transition::Appeared {
            value: Some("1".into()),
        };
        let bare = Transition::Appeared { value: None };
        let gone = Transition::Disappeared {
            value: Some("1".into()),
        };
        let change = Transition::Changed {
            current: Some("1".into()),
            previous: None,
        };

        assert_eq!(format_transition(None, "foo", &appear), "appear foo=1");
        assert_eq!(format_transition(None, "foo", &bare), "appear foo");
        assert_eq!(
            format_transition(Some("nav"), "foo", &gone),
            "[nav] disappear foo=1"
        );
        assert_eq!(
            format_transition(None, "foo", &change),
            "change foo: (none) -> 1"
        );
    }

    #[test]
    fn watch_options_only_report_selected_events() {
        let buffer = Buffer::default();
        let reporter = Reporter::new(buffer.clone());
        let mut spec = WatchConfig::new("foo");
        spec.events = vec![TransitionKind::Change];

        let options = reporter.watch_options(&spec);
        let rendered = format!("{options:?}");
        assert!(rendered.contains("on_appear: false"));
        assert!(rendered.contains("on_change: true"));

        reporter.emit("hello").unwrap();
        assert_eq!(String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap(), "hello\n");
    }
}
