#![forbid(unsafe_code)]

//! Deterministic driver: virtual clock, frame stepping and pointer scripts.
//!
//! A [`Simulation`] owns a [`Toaster`] wired to the simulated host and a
//! [`DeterministicClock`]. Time only moves when the caller advances it, in
//! frames of [`Simulation::step`]; each frame ticks the toaster, plays
//! animations and forwards their completions, in that order.
//!
//! Pointer helpers stamp events with the simulated clock, so a scripted drag
//! produces exactly the velocities its timing implies.

use std::time::Duration;

use ftoast_core::clock::{DeterministicClock, MonotonicClock};
use ftoast_core::event::{PointerEvent, PointerEventKind, PointerId, TouchPoint};
use ftoast_core::geometry::Point;
use ftoast_widgets::{
    GestureOutcome, NodeId, ShowOptions, SurfaceError, ToastHandle, ToastId, ToastMessage,
    ToastPhase, Toaster, ToasterConfig,
};
use serde::Serialize;

use crate::animator::SimAnimator;
use crate::surface::{SimSurface, SurfaceLayout};

/// Default frame length.
pub const DEFAULT_STEP: Duration = Duration::from_millis(16);

/// The toaster type the harness drives.
pub type SimToaster = Toaster<SimSurface, SimAnimator>;

/// Deterministic toast simulation.
#[derive(Debug)]
pub struct Simulation {
    clock: DeterministicClock,
    toaster: SimToaster,
    step: Duration,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(ToasterConfig::default())
    }
}

impl Simulation {
    /// Simulation with the default surface layout.
    pub fn new(config: ToasterConfig) -> Self {
        Self::with_layout(config, SurfaceLayout::default())
    }

    /// Simulation with an explicit surface layout.
    pub fn with_layout(config: ToasterConfig, layout: SurfaceLayout) -> Self {
        Self {
            clock: DeterministicClock::new(),
            toaster: Toaster::with_config(SimSurface::with_layout(layout), SimAnimator::new(), config),
            step: DEFAULT_STEP,
        }
    }

    /// Use frames of `step`. A zero step falls back to [`DEFAULT_STEP`].
    #[must_use]
    pub fn step(mut self, step: Duration) -> Self {
        self.step = if step.is_zero() { DEFAULT_STEP } else { step };
        self
    }

    /// Frame length.
    pub fn frame(&self) -> Duration {
        self.step
    }

    /// Simulated time.
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// The toaster.
    pub fn toaster(&self) -> &SimToaster {
        &self.toaster
    }

    /// The toaster, mutably.
    pub fn toaster_mut(&mut self) -> &mut SimToaster {
        &mut self.toaster
    }

    /// Simulated surface.
    pub fn surface(&self) -> &SimSurface {
        self.toaster.surface()
    }

    /// Simulated animator.
    pub fn animator(&self) -> &SimAnimator {
        self.toaster.animator()
    }

    /// Show a toast.
    pub fn show(
        &mut self,
        message: impl Into<ToastMessage>,
        options: ShowOptions,
    ) -> Result<Option<ToastHandle>, SurfaceError> {
        self.toaster.show(message, options)
    }

    /// Node of a live toast.
    pub fn node_of(&self, id: ToastId) -> Option<NodeId> {
        self.toaster.toast(id).map(|t| t.node())
    }

    /// Centre of a live toast's node.
    pub fn center_of(&self, id: ToastId) -> Option<Point> {
        self.node_of(id).and_then(|node| self.surface().center(node))
    }

    /// Advance simulated time by `dt` in frames.
    pub fn advance(&mut self, dt: Duration) {
        let mut left = dt;
        while !left.is_zero() {
            let frame = left.min(self.step);
            self.frame_once(frame);
            left -= frame;
        }
    }

    /// Advance by `n` whole frames.
    pub fn advance_frames(&mut self, n: u32) {
        for _ in 0..n {
            self.frame_once(self.step);
        }
    }

    fn frame_once(&mut self, frame: Duration) {
        self.clock.advance(frame);
        self.toaster.advance(frame);
        self.play_animations(frame);
    }

    /// Play animations by `dt` without ticking countdowns.
    pub fn play_animations(&mut self, dt: Duration) {
        let (surface, animator) = self.toaster.host_mut();
        let finished = animator.advance(dt, surface);
        for ticket in finished {
            self.toaster.animation_finished(ticket);
        }
    }

    /// Report completions the animator was told to withhold.
    pub fn release_held_animations(&mut self) -> usize {
        let held = self.toaster.animator_mut().release_held();
        let count = held.len();
        for ticket in held {
            self.toaster.animation_finished(ticket);
        }
        count
    }

    /// Advance until no toast is left or `limit` has elapsed. Returns the
    /// elapsed time.
    pub fn run_until_idle(&mut self, limit: Duration) -> Duration {
        let start = self.now();
        while !self.toaster.toasts().is_empty() && self.now() - start < limit {
            self.frame_once(self.step);
        }
        self.now() - start
    }

    /// Deliver a pointer event stamped with the current time.
    pub fn pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        let event = PointerEvent {
            timestamp: self.now(),
            ..event
        };
        self.toaster.handle_pointer(&event)
    }

    /// Mouse press.
    pub fn press(&mut self, at: Point) -> GestureOutcome {
        self.pointer(PointerEvent::down(at.x, at.y, self.now()))
    }

    /// Mouse move.
    pub fn move_to(&mut self, at: Point) -> GestureOutcome {
        self.pointer(PointerEvent::moved(at.x, at.y, self.now()))
    }

    /// Mouse release.
    pub fn release(&mut self, at: Point) -> GestureOutcome {
        self.pointer(PointerEvent::up(at.x, at.y, self.now()))
    }

    /// Touch event built from the contacts still down and the contact that
    /// changed; see [`PointerEvent::from_touches`].
    ///
    /// Returns `None` if the list could not produce an event.
    pub fn touch(
        &mut self,
        kind: PointerEventKind,
        touches: &[TouchPoint],
        changed: u32,
    ) -> Option<GestureOutcome> {
        let event = PointerEvent::from_touches(kind, touches, PointerId(changed), self.now())?;
        Some(self.pointer(event))
    }

    /// Scripted mouse drag: press at `from`, move horizontally by `dx` in
    /// `moves` evenly spaced steps over `duration`, release. Time advances
    /// (and countdowns tick) between moves.
    pub fn drag(&mut self, from: Point, dx: f32, duration: Duration, moves: u32) -> GestureOutcome {
        self.press(from);
        let moves = moves.max(1);
        let interval = duration / moves;
        let mut at = from;
        for i in 1..=moves {
            self.advance(interval);
            at = Point::new(from.x + dx * i as f32 / moves as f32, from.y);
            self.move_to(at);
        }
        self.release(at)
    }

    /// Drag the toast `id` from its centre by `dx` over `duration`.
    ///
    /// Returns `None` if the toast has no node on screen.
    pub fn drag_toast(
        &mut self,
        id: ToastId,
        dx: f32,
        duration: Duration,
        moves: u32,
    ) -> Option<GestureOutcome> {
        let from = self.center_of(id)?;
        Some(self.drag(from, dx, duration, moves))
    }

    /// Snapshot for reports.
    pub fn report(&self) -> SimulationReport {
        let stats = self.toaster.stats();
        SimulationReport {
            now_ms: self.now().as_millis() as u64,
            live_count: self.toaster.live_count(),
            has_container: self.toaster.has_container(),
            dragged_toast: self.toaster.dragged_toast().map(|id| id.0),
            shown: stats.shown,
            expired: stats.expired,
            swiped: stats.swiped,
            forced: stats.forced,
            completed: stats.completed,
            surface_ops: self.surface().journal().len(),
            animations: self.animator().history().len(),
            toasts: self
                .toaster
                .toasts()
                .iter()
                .map(|t| ToastReport {
                    id: t.id().0,
                    phase: match t.phase() {
                        ToastPhase::Entering { .. } => "entering",
                        ToastPhase::Visible => "visible",
                        ToastPhase::Exiting { .. } => "exiting",
                    },
                    remaining_ms: t.remaining().map(|d| d.as_millis() as u64),
                    dragged: t.is_being_dragged(),
                    swiped: t.was_swipe_dismissed(),
                    classes: t.options().classes(),
                })
                .collect(),
        }
    }
}

/// One toast in a [`SimulationReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastReport {
    /// Toast id.
    pub id: u64,
    /// Lifecycle phase.
    pub phase: &'static str,
    /// Countdown remaining, absent for persistent toasts.
    pub remaining_ms: Option<u64>,
    /// Whether a gesture holds it.
    pub dragged: bool,
    /// Whether it left by swipe.
    pub swiped: bool,
    /// Node classes.
    pub classes: Vec<String>,
}

/// Serializable snapshot of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Simulated time.
    pub now_ms: u64,
    /// Live toast count.
    pub live_count: usize,
    /// Whether the container exists.
    pub has_container: bool,
    /// Toast bound to the gesture.
    pub dragged_toast: Option<u64>,
    /// Toasts created.
    pub shown: u64,
    /// Removals by expiry.
    pub expired: u64,
    /// Removals by swipe.
    pub swiped: u64,
    /// Removals by caller.
    pub forced: u64,
    /// Toasts fully removed.
    pub completed: u64,
    /// Surface journal length.
    pub surface_ops: usize,
    /// Animations requested.
    pub animations: usize,
    /// Toasts still live.
    pub toasts: Vec<ToastReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_splits_into_frames() {
        let mut sim = Simulation::default().step(Duration::from_millis(20));
        sim.advance(Duration::from_millis(50));
        assert_eq!(sim.now(), Duration::from_millis(50));
    }

    #[test]
    fn entrance_finishes_after_in_duration() {
        let mut sim = Simulation::default();
        let h = sim
            .show("hi", ShowOptions::new())
            .expect("mount")
            .expect("non-empty");
        sim.advance(Duration::from_millis(288));
        assert!(matches!(
            sim.toaster().toast(h.id()).map(|t| t.phase()),
            Some(ToastPhase::Entering { .. })
        ));
        sim.advance(Duration::from_millis(16));
        assert_eq!(sim.toaster().toast(h.id()).map(|t| t.phase()), Some(ToastPhase::Visible));
    }

    #[test]
    fn pointer_events_use_simulated_time() {
        let mut sim = Simulation::default();
        let h = sim
            .show("hi", ShowOptions::new())
            .expect("mount")
            .expect("non-empty");
        sim.advance(Duration::from_millis(400));
        let at = sim.center_of(h.id()).expect("on screen");
        assert!(matches!(sim.press(at), GestureOutcome::Started(_)));
        let session = sim.toaster().gesture().session().copied().expect("dragging");
        assert_eq!(session.last_timestamp, Duration::from_millis(400));
    }

    #[test]
    fn report_serializes() {
        let mut sim = Simulation::default();
        sim.show("hi", ShowOptions::new().class_name("big"))
            .expect("mount");
        let json = serde_json::to_value(sim.report()).expect("serialize");
        assert_eq!(json["live_count"], 1);
        assert_eq!(json["toasts"][0]["phase"], "entering");
        assert_eq!(json["toasts"][0]["classes"][1], "big");
        assert!(json["toasts"][0]["remaining_ms"].is_null());
    }
}
