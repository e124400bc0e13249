#![forbid(unsafe_code)]

//! Monotonic time sources.
//!
//! Toasts never read the wall clock. The host reports elapsed time to the
//! toaster and stamps pointer events with its own monotonic time, which keeps
//! every countdown and velocity estimate reproducible under test.

use std::time::Duration;

/// A monotonic clock measured from an arbitrary host epoch.
pub trait MonotonicClock {
    /// Time since the clock's epoch.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl MonotonicClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}
