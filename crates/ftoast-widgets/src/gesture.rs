#![forbid(unsafe_code)]

//! Swipe-to-dismiss gesture recognition.
//!
//! One [`GestureTracker`] serves every toast of a toaster. It is a two-state
//! machine:
//!
//! ```text
//!            press over toast                move (same pointer)
//!   Idle ─────────────────────────▶ Dragging ◀──────────┐
//!    ▲                                 │  └──────────────┘
//!    └──────── release / cancel ───────┘
//! ```
//!
//! While dragging, the bound toast follows the pointer horizontally and fades
//! in proportion to the distance covered. On release the tracker decides
//! between dismissing the toast and snapping it back.
//!
//! # Invariants
//!
//! 1. At most one toast is bound, recorded in the [`ContainerRegistry`].
//! 2. Only the pointer that started the gesture moves or releases it; other
//!    touch points and presses are ignored until the gesture ends.
//! 3. Moves and releases while idle are no-ops.
//! 4. Every transition to `Dragging` is matched by exactly one transition
//!    back to `Idle`: a release, or [`GestureTracker::abandon`] when the
//!    toast starts leaving for another reason.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | No toast under the press | Press on empty space or an exiting toast | Stays idle |
//! | Zero elapsed time between moves | Coalesced host events | Previous velocity kept |
//! | Zero activation distance | Unmeasurable node width | Any movement counts as full distance |

use std::time::Duration;

use ftoast_core::animation::NodeStyle;
use ftoast_core::event::{PointerEvent, PointerEventKind, PointerId};
use ftoast_core::geometry::Point;

use crate::host::NodeId;
use crate::registry::ContainerRegistry;
use crate::toast::ToastId;

/// A toast a press may bind to, as resolved by the toaster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTarget {
    /// The toast under the pointer.
    pub toast: ToastId,
    /// Its node.
    pub node: NodeId,
    /// Drag distance (px) that counts as a dismiss: node width times the
    /// toast's activation fraction, measured when the gesture starts.
    pub activation_distance: f32,
}

/// Bookkeeping for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Bound target.
    pub target: DragTarget,
    /// Pointer that owns the gesture.
    pub pointer: PointerId,
    /// Horizontal press position.
    pub start_x: f32,
    /// Horizontal position of the latest move.
    pub last_x: f32,
    /// Timestamp of the latest move.
    pub last_timestamp: Duration,
    /// Horizontal speed between the last two moves, px/ms.
    pub velocity_x: f32,
}

impl DragSession {
    fn new(target: DragTarget, event: &PointerEvent) -> Self {
        Self {
            target,
            pointer: event.pointer,
            start_x: event.x(),
            last_x: event.x(),
            last_timestamp: event.timestamp,
            velocity_x: 0.0,
        }
    }

    /// Signed displacement from the press position.
    pub fn total_delta_x(&self) -> f32 {
        self.last_x - self.start_x
    }

    fn track(&mut self, x: f32, timestamp: Duration) {
        let delta_x = (x - self.last_x).abs();
        let elapsed = timestamp.saturating_sub(self.last_timestamp);
        if !elapsed.is_zero() {
            let elapsed_ms = elapsed.as_secs_f32() * 1_000.0;
            self.velocity_x = delta_x / elapsed_ms;
        }
        self.last_x = x;
        self.last_timestamp = timestamp;
    }

    /// Fraction of the activation distance covered, in `[0.0, ∞)`.
    fn progress(&self) -> f32 {
        let total = self.total_delta_x().abs();
        let activation = self.target.activation_distance;
        if activation > 0.0 {
            total / activation
        } else if total > 0.0 {
            f32::INFINITY
        } else {
            0.0
        }
    }

    fn feedback(&self) -> DragFeedback {
        DragFeedback {
            translate_x: self.total_delta_x(),
            opacity: (1.0 - self.progress()).clamp(0.0, 1.0),
        }
    }
}

/// Visual state of a toast mid-drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    /// Horizontal translation, px.
    pub translate_x: f32,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl DragFeedback {
    /// Inline style that renders this feedback without transition.
    pub fn style(&self) -> NodeStyle {
        NodeStyle::new()
            .translate_x(self.translate_x)
            .opacity(self.opacity)
    }
}

/// What a released gesture does to its toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    /// The toast leaves, continuing the swipe.
    Dismiss,
    /// The toast returns to its resting position.
    SnapBack,
}

/// Summary of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Dismiss or snap back.
    pub decision: DragDecision,
    /// Signed displacement at release, px.
    pub total_delta_x: f32,
    /// Horizontal speed at release, px/ms.
    pub velocity_x: f32,
    /// Activation distance the displacement was compared against, px.
    pub activation_distance: f32,
}

impl DragRelease {
    /// Direction of the swipe: `1.0` right, `-1.0` left.
    pub fn direction(&self) -> f32 {
        if self.total_delta_x < 0.0 { -1.0 } else { 1.0 }
    }
}

/// Result of feeding one pointer event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing changed.
    Ignored,
    /// A gesture bound `target`.
    Started(DragTarget),
    /// The bound toast should render `feedback`.
    Moved {
        /// Bound target.
        target: DragTarget,
        /// New visual state.
        feedback: DragFeedback,
    },
    /// The gesture ended.
    Released {
        /// Target that was bound.
        target: DragTarget,
        /// Release summary.
        release: DragRelease,
    },
}

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A toast is bound and follows the pointer.
    Dragging(DragSession),
}

/// Process-wide swipe tracker.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    dismiss_velocity: f32,
}

impl GestureTracker {
    /// Idle tracker dismissing on releases faster than `dismiss_velocity`
    /// px/ms.
    pub fn new(dismiss_velocity: f32) -> Self {
        Self {
            state: GestureState::Idle,
            dismiss_velocity,
        }
    }

    /// Current state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Session of the gesture in progress.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            GestureState::Idle => None,
        }
    }

    /// Release velocity threshold, px/ms.
    pub fn dismiss_velocity(&self) -> f32 {
        self.dismiss_velocity
    }

    /// Feed one pointer event.
    ///
    /// `resolve` maps a press position to the topmost bindable toast; it is
    /// only consulted for presses that may start a gesture while idle.
    pub fn handle<F>(
        &mut self,
        event: &PointerEvent,
        registry: &mut ContainerRegistry,
        resolve: F,
    ) -> GestureOutcome
    where
        F: FnOnce(Point) -> Option<DragTarget>,
    {
        match self.state {
            GestureState::Idle => self.press(event, registry, resolve),
            GestureState::Dragging(mut session) => {
                if event.pointer != session.pointer {
                    return GestureOutcome::Ignored;
                }
                match event.kind {
                    PointerEventKind::Down => GestureOutcome::Ignored,
                    PointerEventKind::Move => {
                        session.track(event.x(), event.timestamp);
                        self.state = GestureState::Dragging(session);
                        GestureOutcome::Moved {
                            target: session.target,
                            feedback: session.feedback(),
                        }
                    }
                    PointerEventKind::Up | PointerEventKind::Cancel => {
                        self.release(session, registry)
                    }
                }
            }
        }
    }

    fn press<F>(
        &mut self,
        event: &PointerEvent,
        registry: &mut ContainerRegistry,
        resolve: F,
    ) -> GestureOutcome
    where
        F: FnOnce(Point) -> Option<DragTarget>,
    {
        if !event.can_start_gesture() {
            return GestureOutcome::Ignored;
        }
        let Some(target) = resolve(event.position) else {
            return GestureOutcome::Ignored;
        };
        if !registry.bind_drag(target.toast) {
            return GestureOutcome::Ignored;
        }
        ftoast_core::debug!(
            toast = target.toast.0,
            x = event.x(),
            activation_distance = target.activation_distance,
            "drag started"
        );
        self.state = GestureState::Dragging(DragSession::new(target, event));
        GestureOutcome::Started(target)
    }

    fn release(&mut self, session: DragSession, registry: &mut ContainerRegistry) -> GestureOutcome {
        self.state = GestureState::Idle;
        registry.unbind_drag();

        let total_delta_x = session.total_delta_x();
        let activation_distance = session.target.activation_distance;
        let decision = if session.progress() > 1.0 || session.velocity_x > self.dismiss_velocity
        {
            DragDecision::Dismiss
        } else {
            DragDecision::SnapBack
        };
        ftoast_core::debug!(
            toast = session.target.toast.0,
            total_delta_x,
            velocity_x = session.velocity_x,
            activation_distance,
            decision = ?decision,
            "drag released"
        );
        GestureOutcome::Released {
            target: session.target,
            release: DragRelease {
                decision,
                total_delta_x,
                velocity_x: session.velocity_x,
                activation_distance,
            },
        }
    }

    /// Drop the gesture bound to `toast` without a decision.
    ///
    /// Used when the bound toast starts leaving for another reason. Returns
    /// whether a gesture was abandoned.
    pub fn abandon(&mut self, toast: ToastId, registry: &mut ContainerRegistry) -> bool {
        match self.state {
            GestureState::Dragging(session) if session.target.toast == toast => {
                self.state = GestureState::Idle;
                registry.unbind_drag();
                ftoast_core::debug!(toast = toast.0, "drag abandoned");
                true
            }
            _ => false,
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(1.0)
    }
}
