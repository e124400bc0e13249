#![forbid(unsafe_code)]

//! Animation vocabulary shared by toasts and their hosts.
//!
//! A toast never animates anything itself. It asks the host's animator to
//! move a node towards a target [`NodeStyle`] over a duration with a named
//! [`Easing`], and receives an [`AnimationTicket`] it can later match against
//! the host's completion report.
//!
//! [`Tween`] is the time-based progression a host (or the simulated host in
//! the harness) uses to drive such a request. It produces normalized `f32`
//! values in `[0.0, 1.0]` and tracks elapsed time as [`Duration`] so that
//! repeated small ticks do not drift.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out (slow end).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Exponential ease-out (very fast start, long tail).
#[inline]
pub fn ease_out_expo(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

/// Named easing curve carried in an [`AnimationRequest`].
///
/// Hosts that animate through a CSS-like engine use [`Easing::name`]; hosts
/// that interpolate themselves use [`Easing::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Quadratic S-curve.
    EaseInOut,
    /// Cubic deceleration; used for toast entrance.
    #[default]
    EaseOutCubic,
    /// Exponential deceleration; used for toast exit.
    EaseOutExpo,
}

impl Easing {
    /// Host-facing easing name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInOut => "easeInOut",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseOutExpo => "easeOutExpo",
        }
    }

    /// The easing function for this curve.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseInOut => ease_in_out,
            Self::EaseOutCubic => ease_out_cubic,
            Self::EaseOutExpo => ease_out_expo,
        }
    }

    /// Apply the easing to a progress value.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

// ---------------------------------------------------------------------------
// Node styles
// ---------------------------------------------------------------------------

/// Inline style properties a toast writes to its node.
///
/// `None` means "not set": the property falls back to the container's
/// stylesheet. Writing a style with every property `None` therefore clears
/// any inline transform/opacity left over from a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeStyle {
    /// Horizontal translation in pixels.
    pub translate_x: Option<f32>,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: Option<f32>,
    /// Top offset in pixels.
    pub top: Option<f32>,
    /// Top margin in pixels (negative collapses the slot).
    pub margin_top: Option<f32>,
    /// Transition applied by the host when these values change.
    /// `None` means changes apply immediately.
    pub transition: Option<Duration>,
}

impl NodeStyle {
    /// An empty style (every property unset).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            translate_x: None,
            opacity: None,
            top: None,
            margin_top: None,
            transition: None,
        }
    }

    /// Set the horizontal translation.
    #[must_use]
    pub fn translate_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    /// Set the opacity, clamped to `[0.0, 1.0]`.
    ///
    /// Non-finite input is treated as fully transparent.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        });
        self
    }

    /// Set the top offset.
    #[must_use]
    pub fn top(mut self, px: f32) -> Self {
        self.top = Some(px);
        self
    }

    /// Set the top margin.
    #[must_use]
    pub fn margin_top(mut self, px: f32) -> Self {
        self.margin_top = Some(px);
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub fn transition(mut self, duration: Duration) -> Self {
        self.transition = Some(duration);
        self
    }

    /// Whether no property is set.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.translate_x.is_none()
            && self.opacity.is_none()
            && self.top.is_none()
            && self.margin_top.is_none()
    }

    /// Overlay `other` on top of `self`: properties set in `other` win.
    #[must_use]
    pub fn merged(self, other: &NodeStyle) -> Self {
        Self {
            translate_x: other.translate_x.or(self.translate_x),
            opacity: other.opacity.or(self.opacity),
            top: other.top.or(self.top),
            margin_top: other.margin_top.or(self.margin_top),
            transition: other.transition.or(self.transition),
        }
    }

    /// Interpolate every property set in `target` from `self` at eased
    /// progress `t`. Properties missing in `self` start from their resting
    /// value (`0` offsets, opacity `1`).
    #[must_use]
    pub fn lerp_towards(&self, target: &NodeStyle, t: f32) -> Self {
        fn mix(from: Option<f32>, to: Option<f32>, rest: f32, t: f32) -> Option<f32> {
            to.map(|to| {
                let from = from.unwrap_or(rest);
                from + (to - from) * t
            })
            .or(from)
        }
        Self {
            translate_x: mix(self.translate_x, target.translate_x, 0.0, t),
            opacity: mix(self.opacity, target.opacity, 1.0, t),
            top: mix(self.top, target.top, 0.0, t),
            margin_top: mix(self.margin_top, target.margin_top, 0.0, t),
            transition: self.transition,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests and tickets
// ---------------------------------------------------------------------------

/// Identifies one animation handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationTicket(pub u64);

/// "Animate this node to `target` over `duration` using `easing`."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    /// Final style.
    pub target: NodeStyle,
    /// Animation length.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationRequest {
    /// Create a request.
    #[must_use]
    pub const fn new(target: NodeStyle, duration: Duration, easing: Easing) -> Self {
        Self {
            target,
            duration,
            easing,
        }
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Eased progression from 0.0 to 1.0 over a duration.
///
/// A zero duration completes on the first tick (including a zero-length one).
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
    ticked: bool,
}

impl Tween {
    /// Create a tween with linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing: Easing::Linear,
            ticked: false,
        }
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Create a tween matching an [`AnimationRequest`].
    #[must_use]
    pub fn for_request(request: &AnimationRequest) -> Self {
        Self::new(request.duration).easing(request.easing)
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.ticked { 1.0 } else { 0.0 };
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Time left until completion.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.ticked = true;
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        if self.duration.is_zero() {
            self.ticked
        } else {
            self.elapsed >= self.duration
        }
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.raw_progress())
    }

}
