#![forbid(unsafe_code)]

//! Toaster configuration.
//!
//! [`ToastDefaults`] are the per-toast options every `show` call starts from;
//! [`ToasterConfig`] adds the system-wide constants (tick period, gesture
//! thresholds, exit choreography) that are not overridable per toast.

use std::time::Duration;

use ftoast_core::animation::Easing;

/// Fixed countdown tick period.
pub const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Default entrance animation length.
pub const DEFAULT_IN_DURATION: Duration = Duration::from_millis(300);

/// Default exit animation length.
pub const DEFAULT_OUT_DURATION: Duration = Duration::from_millis(375);

/// Default fraction of the toast width a drag must cover to dismiss.
pub const DEFAULT_ACTIVATION_FRACTION: f32 = 0.8;

/// Per-toast defaults merged with caller overrides at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastDefaults {
    /// How long the toast stays up. `None` means it never expires.
    pub display_length: Option<Duration>,
    /// Entrance animation length.
    pub in_duration: Duration,
    /// Exit animation length.
    pub out_duration: Duration,
    /// Fraction of the toast width that counts as a dismissing drag.
    pub activation_fraction: f32,
}

impl Default for ToastDefaults {
    fn default() -> Self {
        Self {
            display_length: None,
            in_duration: DEFAULT_IN_DURATION,
            out_duration: DEFAULT_OUT_DURATION,
            activation_fraction: DEFAULT_ACTIVATION_FRACTION,
        }
    }
}

impl ToastDefaults {
    /// Set the default display length.
    #[must_use]
    pub fn display_length(mut self, length: Duration) -> Self {
        self.display_length = Some(length);
        self
    }

    /// Make toasts persistent unless a caller says otherwise.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.display_length = None;
        self
    }

    /// Set the entrance animation length.
    #[must_use]
    pub fn in_duration(mut self, duration: Duration) -> Self {
        self.in_duration = duration;
        self
    }

    /// Set the exit animation length.
    #[must_use]
    pub fn out_duration(mut self, duration: Duration) -> Self {
        self.out_duration = duration;
        self
    }

    /// Set the activation fraction, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn activation_fraction(mut self, fraction: f32) -> Self {
        self.activation_fraction = clamp_fraction(fraction);
        self
    }
}

/// Clamp an activation fraction into `[0.0, 1.0]`; non-finite input falls
/// back to the default.
pub(crate) fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        DEFAULT_ACTIVATION_FRACTION
    }
}

/// System-wide toaster configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToasterConfig {
    /// Defaults for new toasts.
    pub defaults: ToastDefaults,
    /// Countdown tick period.
    pub tick_period: Duration,
    /// Release velocity (px/ms) above which a drag dismisses regardless of
    /// distance.
    pub dismiss_velocity: f32,
    /// Transition used when a released toast snaps back.
    pub snap_back: Duration,
    /// Length of the slide-and-fade exit after a swipe.
    pub swipe_exit: Duration,
    /// Top margin the standard exit collapses to.
    pub exit_lift: f32,
    /// Top offset a new toast starts its entrance from.
    pub entrance_offset: f32,
    /// Entrance easing.
    pub entrance_easing: Easing,
    /// Exit easing (standard and swipe).
    pub exit_easing: Easing,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            defaults: ToastDefaults::default(),
            tick_period: TICK_PERIOD,
            dismiss_velocity: 1.0,
            snap_back: Duration::from_millis(200),
            swipe_exit: Duration::from_millis(50),
            exit_lift: -40.0,
            entrance_offset: 35.0,
            entrance_easing: Easing::EaseOutCubic,
            exit_easing: Easing::EaseOutExpo,
        }
    }
}

impl ToasterConfig {
    /// Set the per-toast defaults.
    #[must_use]
    pub fn defaults(mut self, defaults: ToastDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the countdown tick period. A zero period falls back to
    /// [`TICK_PERIOD`].
    #[must_use]
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period = if period.is_zero() { TICK_PERIOD } else { period };
        self
    }

    /// Set the dismiss velocity threshold in px/ms.
    #[must_use]
    pub fn dismiss_velocity(mut self, px_per_ms: f32) -> Self {
        self.dismiss_velocity = px_per_ms;
        self
    }

    /// Set the snap-back transition length.
    #[must_use]
    pub fn snap_back(mut self, duration: Duration) -> Self {
        self.snap_back = duration;
        self
    }

    /// Set the swipe exit length.
    #[must_use]
    pub fn swipe_exit(mut self, duration: Duration) -> Self {
        self.swipe_exit = duration;
        self
    }

    /// Set the standard exit collapse margin.
    #[must_use]
    pub fn exit_lift(mut self, px: f32) -> Self {
        self.exit_lift = px;
        self
    }

    /// Set the entrance start offset.
    #[must_use]
    pub fn entrance_offset(mut self, px: f32) -> Self {
        self.entrance_offset = px;
        self
    }

    /// Set the entrance easing.
    #[must_use]
    pub fn entrance_easing(mut self, easing: Easing) -> Self {
        self.entrance_easing = easing;
        self
    }

    /// Set the exit easing.
    #[must_use]
    pub fn exit_easing(mut self, easing: Easing) -> Self {
        self.exit_easing = easing;
        self
    }
}
