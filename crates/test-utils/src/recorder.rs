use std::io::Write;
use std::sync::{Arc, Mutex};

use hashwatch::registry::WatchOptions;

/// One observed callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Appear(Option<String>),
    Disappear(Option<String>),
    Change(Option<String>, Option<String>),
}

impl Call {
    pub fn appear(value: &str) -> Self {
        Call::Appear(Some(value.to_string()))
    }

    pub fn disappear(value: &str) -> Self {
        Call::Disappear(Some(value.to_string()))
    }

    pub fn change(current: &str, previous: &str) -> Self {
        Call::Change(Some(current.to_string()), Some(previous.to_string()))
    }
}

/// Records callback invocations; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for `key` with all three callbacks recording into this log.
    pub fn options(&self, key: &str) -> WatchOptions {
        let appear = self.clone();
        let disappear = self.clone();
        let change = self.clone();
        WatchOptions::new(key)
            .on_appear(move |v| {
                appear.push(Call::Appear(v.map(str::to_string)));
                Ok(())
            })
            .on_disappear(move |v| {
                disappear.push(Call::Disappear(v.map(str::to_string)));
                Ok(())
            })
            .on_change(move |c, p| {
                change.push(Call::Change(c.map(str::to_string), p.map(str::to_string)));
                Ok(())
            })
    }

    pub fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Return and clear the recorded calls.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

/// In-memory `Write` sink whose clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
