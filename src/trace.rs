//! In-memory diagnostic sink with line-buffered capture.
//!
//! [`TraceSink`] collects ambient trace output for inclusion in failure
//! diagnostics. Partial writes accumulate in a line buffer and are only
//! promoted to the recorded message list when a line terminator arrives, so
//! interleaved partial writes are neither lost nor duplicated. Reading the
//! sink flushes whatever remains buffered.
//!
//! The sink is an explicit dependency injected into the executor, not a
//! process-wide listener. Concurrent scenario runs must not share one
//! instance; clone handles only within a single run.

use std::sync::{Arc, Mutex};

/// Cloneable handle to a line-buffered capture of diagnostic output.
#[derive(Clone, Debug)]
pub struct TraceSink {
    inner: Arc<Mutex<SinkInner>>,
}

#[derive(Debug)]
struct SinkInner {
    buffer: String,
    messages: Vec<String>,
    strip_prefix: Option<String>,
}

impl TraceSink {
    /// Construct a sink that strips the invoking process's executable name
    /// from the start of writes.
    #[must_use]
    pub fn new() -> Self {
        let exe_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()));
        Self::with_stripped_prefix(exe_name)
    }

    /// Construct a sink stripping `prefix` from the start of writes.
    ///
    /// Useful in tests, where the harness executable name is not stable.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self::with_stripped_prefix(Some(prefix.to_owned()))
    }

    fn with_stripped_prefix(strip_prefix: Option<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SinkInner {
                buffer: String::new(),
                messages: Vec::new(),
                strip_prefix,
            })),
        }
    }

    /// Append `text` to the sink.
    ///
    /// Complete lines are promoted to the message list immediately; a
    /// trailing fragment stays buffered until a later write terminates it or
    /// the sink is drained.
    pub fn write(&self, text: &str) {
        let mut inner = self.inner.lock().expect("trace sink poisoned");
        let text = inner.stripped(text);
        inner.buffer.push_str(text);
        inner.flush_complete_lines();
    }

    /// Append `text` followed by a line terminator.
    pub fn writeln(&self, text: &str) {
        let mut inner = self.inner.lock().expect("trace sink poisoned");
        let text = inner.stripped(text);
        inner.buffer.push_str(text);
        inner.buffer.push('\n');
        inner.flush_complete_lines();
    }

    /// Take all recorded messages, flushing any buffered fragment first.
    ///
    /// Flushing is decided by the buffer's content, never its capacity.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        let mut inner = self.inner.lock().expect("trace sink poisoned");
        if !inner.buffer.is_empty() {
            let residue = std::mem::take(&mut inner.buffer);
            inner.messages.push(residue);
        }
        std::mem::take(&mut inner.messages)
    }
}

impl Default for TraceSink {
    fn default() -> Self { Self::new() }
}

impl SinkInner {
    /// Strip the configured executable-name prefix from the start of one
    /// write, along with a following `: ` separator if present.
    fn stripped<'a>(&self, text: &'a str) -> &'a str {
        let Some(prefix) = self.strip_prefix.as_deref() else {
            return text;
        };
        let Some(rest) = text.strip_prefix(prefix) else {
            return text;
        };
        rest.strip_prefix(": ").unwrap_or(rest)
    }

    fn flush_complete_lines(&mut self) {
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.messages
                .push(line.trim_end_matches(['\n', '\r']).to_owned());
        }
    }
}
