#![forbid(unsafe_code)]

//! Per-toast countdown.
//!
//! A [`Countdown`] decrements its remaining time by one fixed period on every
//! tick, except while its toast is being dragged. Reaching zero expires the
//! countdown, which reports [`TickOutcome::Expired`] exactly once and then
//! stays inert.
//!
//! The host does not deliver individual ticks. It reports elapsed time, and
//! [`Countdown::advance`] runs every whole period contained in it. Each
//! countdown keeps its own phase, so two toasts shown 7ms apart tick 7ms apart,
//! just as two independent interval timers would.
//!
//! # Example
//!
//! ```rust
//! use ftoast_widgets::timer::{Countdown, TickOutcome};
//! use std::time::Duration;
//!
//! let mut countdown = Countdown::new(Duration::from_millis(40), Duration::from_millis(20));
//! assert_eq!(countdown.advance(Duration::from_millis(20), false), TickOutcome::Continue);
//! assert_eq!(countdown.advance(Duration::from_millis(20), false), TickOutcome::Expired);
//! assert_eq!(countdown.advance(Duration::from_millis(20), false), TickOutcome::Inactive);
//! ```

use std::time::Duration;

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    /// Ticking.
    #[default]
    Running,
    /// Stopped before reaching zero.
    Stopped,
    /// Reached zero.
    Expired,
}

/// Result of driving a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running.
    Continue,
    /// Reached zero during this call. Reported once per countdown.
    Expired,
    /// Was already stopped or expired; nothing happened.
    Inactive,
}

/// Countdown state for one toast.
#[derive(Debug, Clone)]
pub struct Countdown {
    display_length: Duration,
    remaining: Duration,
    period: Duration,
    phase: Duration,
    state: CountdownState,
}

impl Countdown {
    /// Start a countdown of `display_length` ticking every `period`.
    ///
    /// A zero `period` is treated as one millisecond so that `advance` always
    /// terminates.
    pub fn new(display_length: Duration, period: Duration) -> Self {
        Self {
            display_length,
            remaining: display_length,
            period: if period.is_zero() {
                Duration::from_millis(1)
            } else {
                period
            },
            phase: Duration::ZERO,
            state: CountdownState::Running,
        }
    }

    /// The length the countdown started from.
    pub fn display_length(&self) -> Duration {
        self.display_length
    }

    /// Time left before expiry.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current state.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Whether the countdown is still ticking.
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Stop the countdown. Idempotent; an expired countdown stays expired.
    pub fn stop(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Stopped;
        }
    }

    /// Run exactly one tick.
    ///
    /// `dragged` is the toast's drag flag at the moment of the tick: a dragged
    /// toast keeps its remaining time. The zero check runs either way, so a
    /// zero-length countdown expires on its first tick even mid-drag.
    pub fn tick(&mut self, dragged: bool) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Inactive;
        }
        if !dragged {
            self.remaining = self.remaining.saturating_sub(self.period);
        }
        if self.remaining.is_zero() {
            self.state = CountdownState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Continue
        }
    }

    /// Feed `dt` of elapsed time and run every whole period it completes.
    ///
    /// Leftover time carries over to the next call.
    pub fn advance(&mut self, dt: Duration, dragged: bool) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Inactive;
        }
        self.phase = self.phase.saturating_add(dt);
        while self.phase >= self.period {
            self.phase -= self.period;
            if self.tick(dragged) == TickOutcome::Expired {
                self.phase = Duration::ZERO;
                return TickOutcome::Expired;
            }
        }
        TickOutcome::Continue
    }
}
