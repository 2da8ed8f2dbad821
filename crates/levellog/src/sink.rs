//! crates/levellog/src/sink.rs
//! Serialized, fire-and-forget line output.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// Writer that receives each rendered line with a single `write_all` call.
///
/// The writer sits behind a mutex so concurrent callers never interleave
/// within a line; cross-caller ordering is whatever order the lock is
/// acquired in. Every line is flushed immediately, so dropping the sink needs
/// no teardown. Write failures are swallowed: they are never retried and
/// never surfaced to the caller. With the `tracing` feature the first failure
/// is reported once as a `tracing` warning after the lock has been released.
pub struct LineSink<W> {
    writer: Mutex<W>,
    failure_reported: AtomicBool,
}

impl<W> LineSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            failure_reported: AtomicBool::new(false),
        }
    }

    /// Runs `f` with exclusive access to the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Reports whether a write has failed at least once.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failure_reported.load(Ordering::Relaxed)
    }

    // A panic while holding the lock (for example inside a user writer)
    // must not silence every later line.
    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> LineSink<W>
where
    W: Write,
{
    /// Writes one complete line and flushes it.
    pub fn write_line(&self, line: &str) {
        let result = {
            let mut writer = self.lock();
            writer
                .write_all(line.as_bytes())
                .and_then(|()| writer.flush())
        };

        if let Err(error) = result {
            self.record_failure(&error);
        }
    }

    fn record_failure(&self, error: &io::Error) {
        if self.failure_reported.swap(true, Ordering::Relaxed) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "levellog::sink",
            error = %error,
            "log sink rejected a write; further failures are suppressed"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = error;
    }
}

impl<W> fmt::Debug for LineSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LineSink");
        // Formatting from inside `with_writer` must not wait on our own lock.
        match self.writer.try_lock() {
            Ok(writer) => debug.field("writer", &*writer),
            Err(TryLockError::Poisoned(poisoned)) => debug.field("writer", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => debug.field("writer", &format_args!("<locked>")),
        };
        debug
            .field("failure_reported", &self.has_failed())
            .finish()
    }
}
