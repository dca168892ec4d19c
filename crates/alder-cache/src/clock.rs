//! Time source abstraction.
//!
//! The cache never reads the wall clock directly; it goes through [`Clock`]
//! so tests and embedding servers control time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache timestamps: seconds on an opaque, totally ordered axis.
pub type Timestamp = u64;

/// A source of timestamps and rendered time strings.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;

    /// Returns the current time rendered for log lines.
    fn timestr(&self) -> String;
}

/// The real clock: Unix time, RFC 3339 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // The Unix clock does not go negative on any supported platform.
        chrono::Utc::now().timestamp().max(0) as u64
    }

    fn timestr(&self) -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

/// A settable clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a manual clock starting at the given timestamp.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Sets the current timestamp.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advances the clock by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }

    fn timestr(&self) -> String {
        format!("t+{}", self.now())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn timestr(&self) -> String {
        (**self).timestr()
    }
}
