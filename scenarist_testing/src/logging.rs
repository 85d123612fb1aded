//! Drain-and-search access to the captured log stream.

use std::sync::{Mutex, MutexGuard, OnceLock};

use logtest::Logger;
use rstest::fixture;

static CAPTURE: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Exclusive view over the process-wide log capture.
///
/// `logtest` installs a single global logger, so tests asserting on emitted
/// records serialise through this handle. Records are drained as they are
/// searched; call [`clear`](LogCapture::clear) first to discard leftovers
/// from earlier activity.
pub struct LogCapture {
    records: MutexGuard<'static, Logger>,
}

impl LogCapture {
    /// Take exclusive ownership of the capture, starting it on first use.
    #[must_use]
    pub fn acquire() -> Self {
        let capture = CAPTURE.get_or_init(|| Mutex::new(Logger::start()));
        Self {
            records: capture.lock().expect("log capture poisoned"),
        }
    }

    /// Discard every record captured so far.
    pub fn clear(&mut self) {
        while self.records.pop().is_some() {}
    }

    /// Drain the captured records, reporting whether any contains `needle`.
    pub fn contains(&mut self, needle: &str) -> bool {
        std::iter::from_fn(|| self.records.pop()).any(|record| record.args().contains(needle))
    }
}

#[fixture]
pub fn log_capture() -> LogCapture {
    LogCapture::acquire()
}
