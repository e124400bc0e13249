#![forbid(unsafe_code)]

//! Public entry point: show, drive and dismiss toasts.
//!
//! A [`Toaster`] owns every toast it shows, the shared [`ContainerRegistry`],
//! the [`GestureTracker`] and the host collaborators. All mutation happens on
//! four kinds of host events:
//!
//! | Host event | Call |
//! |------------|------|
//! | Elapsed time | [`Toaster::advance`] |
//! | Pointer input | [`Toaster::handle_pointer`] |
//! | Animation completion | [`Toaster::animation_finished`] |
//! | Caller request | [`Toaster::show`], [`Toaster::remove`], [`Toaster::dismiss_all`] |
//!
//! Expiry, swipe and forced dismissal all funnel into one removal routine
//! guarded by the toast's `Exiting` phase, so whichever trigger comes first
//! wins and the others are no-ops.
//!
//! # Example
//!
//! ```rust
//! use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};
//! use ftoast_core::geometry::Point;
//! use ftoast_widgets::{
//!     Animator, ContainerId, Markup, NodeId, ShowOptions, Surface, SurfaceError, Toaster,
//! };
//! use std::time::Duration;
//!
//! # #[derive(Default)]
//! # struct Nodes(u64);
//! # impl Surface for Nodes {
//! #     fn create_container(&mut self) -> ContainerId { ContainerId(1) }
//! #     fn destroy_container(&mut self, _: ContainerId) {}
//! #     fn mount(&mut self, _: ContainerId, _: &Markup, _: &[String]) -> Result<NodeId, SurfaceError> {
//! #         self.0 += 1;
//! #         Ok(NodeId(self.0))
//! #     }
//! #     fn detach(&mut self, _: NodeId) {}
//! #     fn set_style(&mut self, _: NodeId, _: &NodeStyle) {}
//! #     fn node_style(&self, _: NodeId) -> NodeStyle { NodeStyle::new() }
//! #     fn node_width(&self, _: NodeId) -> f32 { 300.0 }
//! #     fn hit_test(&self, _: Point) -> Option<NodeId> { None }
//! # }
//! # #[derive(Default)]
//! # struct Tickets(u64);
//! # impl Animator for Tickets {
//! #     fn animate(&mut self, _: NodeId, _: AnimationRequest) -> AnimationTicket {
//! #         self.0 += 1;
//! #         AnimationTicket(self.0)
//! #     }
//! # }
//! let mut toaster = Toaster::new(Nodes::default(), Tickets::default());
//! let handle = toaster
//!     .show("Saved", ShowOptions::new().display_length(Duration::from_secs(4)))?
//!     .expect("non-empty message");
//! toaster.advance(Duration::from_millis(20));
//! assert!(toaster.is_live(handle));
//!
//! handle.dismiss(&mut toaster);
//! assert_eq!(toaster.live_count(), 1, "still animating out");
//! # Ok::<(), SurfaceError>(())
//! ```

use std::time::Duration;

use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};
use ftoast_core::event::PointerEvent;

use crate::config::{ToastDefaults, ToasterConfig};
use crate::gesture::{DragDecision, DragTarget, GestureOutcome, GestureTracker};
use crate::host::{Animator, NodeId, Surface, SurfaceError};
use crate::message::ToastMessage;
use crate::registry::ContainerRegistry;
use crate::timer::TickOutcome;
use crate::toast::{RemovalTrigger, ShowOptions, Toast, ToastId, ToastPhase};

/// Caller's handle to a shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastHandle {
    id: ToastId,
}

impl ToastHandle {
    /// The toast this handle refers to.
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Force the toast out. Returns `false` if it was already leaving or gone.
    pub fn dismiss<S: Surface, A: Animator>(&self, toaster: &mut Toaster<S, A>) -> bool {
        toaster.remove(self.id)
    }

    /// Whether the toast has not been fully removed yet.
    pub fn is_live<S: Surface, A: Animator>(&self, toaster: &Toaster<S, A>) -> bool {
        toaster.toast(self.id).is_some()
    }
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToasterStats {
    /// Toasts created.
    pub shown: u64,
    /// Removals started by countdown expiry.
    pub expired: u64,
    /// Removals started by a swipe.
    pub swiped: u64,
    /// Removals started by the caller.
    pub forced: u64,
    /// Toasts fully removed.
    pub completed: u64,
}

impl ToasterStats {
    fn record(&mut self, trigger: RemovalTrigger) {
        match trigger {
            RemovalTrigger::Expired => self.expired += 1,
            RemovalTrigger::Swiped => self.swiped += 1,
            RemovalTrigger::Forced => self.forced += 1,
        }
    }
}

/// Toast factory and coordinator.
#[derive(Debug)]
pub struct Toaster<S: Surface, A: Animator> {
    config: ToasterConfig,
    surface: S,
    animator: A,
    registry: ContainerRegistry,
    gesture: GestureTracker,
    toasts: Vec<Toast>,
    next_id: u64,
    stats: ToasterStats,
}

impl<S: Surface, A: Animator> Toaster<S, A> {
    /// Toaster with the default configuration.
    pub fn new(surface: S, animator: A) -> Self {
        Self::with_config(surface, animator, ToasterConfig::default())
    }

    /// Toaster with an explicit configuration.
    pub fn with_config(surface: S, animator: A, config: ToasterConfig) -> Self {
        Self {
            gesture: GestureTracker::new(config.dismiss_velocity),
            config,
            surface,
            animator,
            registry: ContainerRegistry::new(),
            toasts: Vec::new(),
            next_id: 1,
            stats: ToasterStats::default(),
        }
    }

    /// Show a toast.
    ///
    /// Returns `Ok(None)` without touching any state if the message is empty.
    /// A surface failure is returned after the container acquisition has been
    /// rolled back.
    pub fn show(
        &mut self,
        message: impl Into<ToastMessage>,
        options: ShowOptions,
    ) -> Result<Option<ToastHandle>, SurfaceError> {
        let message = message.into();
        if message.is_empty() {
            ftoast_core::debug!("empty toast message ignored");
            return Ok(None);
        }
        let options = options.resolve(&self.config.defaults);
        let classes = options.classes();
        let content = message.render();

        let container = self.registry.acquire(&mut self.surface);
        let node = match self.surface.mount(container, &content, &classes) {
            Ok(node) => node,
            Err(err) => {
                ftoast_core::warn!(error = %err, "toast mount failed");
                self.registry.release(&mut self.surface);
                return Err(err);
            }
        };

        self.surface.set_style(
            node,
            &NodeStyle::new()
                .top(self.config.entrance_offset)
                .opacity(0.0),
        );
        let entrance = self.animator.animate(
            node,
            AnimationRequest::new(
                NodeStyle::new().top(0.0).opacity(1.0),
                options.in_duration,
                self.config.entrance_easing,
            ),
        );

        let id = ToastId(self.next_id);
        self.next_id += 1;
        ftoast_core::info!(
            toast = id.0,
            display_length_ms = options.display_length.map(|d| d.as_millis() as u64),
            classes = ?classes,
            "toast shown"
        );
        let toast = Toast::new(id, message, options, node, entrance, self.config.tick_period);
        self.toasts.push(toast);
        self.stats.shown += 1;
        Ok(Some(ToastHandle { id }))
    }

    /// Force a toast out. Idempotent: returns `false` if the toast is unknown
    /// or already leaving.
    pub fn remove(&mut self, id: ToastId) -> bool {
        self.begin_removal(id, RemovalTrigger::Forced)
    }

    /// Force out the toast behind `handle`.
    pub fn dismiss(&mut self, handle: ToastHandle) -> bool {
        self.remove(handle.id)
    }

    /// Force out every toast that is not already leaving. Returns how many
    /// started leaving.
    pub fn dismiss_all(&mut self) -> usize {
        let ids: Vec<ToastId> = self
            .toasts
            .iter()
            .filter(|t| !t.is_exiting())
            .map(Toast::id)
            .collect();
        ids.into_iter()
            .filter(|&id| self.begin_removal(id, RemovalTrigger::Forced))
            .count()
    }

    /// Report `dt` of elapsed host time to every countdown. Returns how many
    /// toasts expired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "toaster_advance",
            dt_us = dt.as_micros() as u64,
            toasts = self.toasts.len()
        )
        .entered();

        let expired: Vec<ToastId> = self
            .toasts
            .iter_mut()
            .filter_map(|toast| (toast.advance(dt) == TickOutcome::Expired).then(|| toast.id()))
            .collect();
        for &id in &expired {
            ftoast_core::debug!(toast = id.0, "toast countdown expired");
            self.begin_removal(id, RemovalTrigger::Expired);
        }
        expired.len()
    }

    /// Feed one pointer event to the gesture tracker and apply the result.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "toaster_pointer",
            kind = ?event.kind,
            x = event.position.x,
            y = event.position.y
        )
        .entered();

        let surface = &self.surface;
        let toasts = &self.toasts;
        let outcome = self.gesture.handle(event, &mut self.registry, |point| {
            let node = surface.hit_test(point)?;
            let toast = toasts.iter().find(|t| t.node() == node && !t.is_exiting())?;
            Some(DragTarget {
                toast: toast.id(),
                node,
                activation_distance: surface.node_width(node)
                    * toast.options().activation_fraction,
            })
        });

        match outcome {
            GestureOutcome::Ignored => {}
            GestureOutcome::Started(target) => {
                if let Some(toast) = self.toast_mut(target.toast) {
                    toast.set_dragged(true);
                }
                self.restyle(target.node, |style| NodeStyle {
                    transition: None,
                    ..style
                });
            }
            GestureOutcome::Moved { target, feedback } => {
                self.restyle(target.node, |style| NodeStyle {
                    transition: None,
                    ..style.merged(&feedback.style())
                });
            }
            GestureOutcome::Released { target, release } => {
                if let Some(toast) = self.toast_mut(target.toast) {
                    toast.set_dragged(false);
                }
                match release.decision {
                    DragDecision::Dismiss => {
                        if let Some(toast) = self.toast_mut(target.toast) {
                            toast.mark_swipe_dismissed(
                                release.direction() * release.activation_distance,
                            );
                        }
                        self.begin_removal(target.toast, RemovalTrigger::Swiped);
                    }
                    DragDecision::SnapBack => {
                        let snap_back = self.config.snap_back;
                        self.restyle(target.node, |style| NodeStyle {
                            translate_x: None,
                            opacity: None,
                            transition: Some(snap_back),
                            ..style
                        });
                    }
                }
            }
        }
        outcome
    }

    /// The host finished the animation behind `ticket`.
    ///
    /// Completing an exit drops the toast: its callback runs, its node is
    /// detached and the registry is released. Unknown or stale tickets are
    /// ignored; returns whether the ticket was recognised.
    pub fn animation_finished(&mut self, ticket: AnimationTicket) -> bool {
        let Some(index) = self
            .toasts
            .iter()
            .position(|t| t.pending_ticket() == Some(ticket))
        else {
            ftoast_core::trace!(ticket = ticket.0, "animation completion without a waiting toast");
            return false;
        };

        match self.toasts[index].phase() {
            ToastPhase::Entering { .. } => self.toasts[index].finish_entrance(ticket),
            ToastPhase::Exiting { .. } => {
                let mut toast = self.toasts.remove(index);
                if let Some(on_complete) = toast.take_on_complete() {
                    on_complete();
                }
                self.surface.detach(toast.node());
                self.registry.release(&mut self.surface);
                self.stats.completed += 1;
                ftoast_core::info!(
                    toast = toast.id().0,
                    swiped = toast.was_swipe_dismissed(),
                    live = self.registry.live_count(),
                    "toast removed"
                );
                true
            }
            ToastPhase::Visible => false,
        }
    }

    fn begin_removal(&mut self, id: ToastId, trigger: RemovalTrigger) -> bool {
        let Some(index) = self.toasts.iter().position(|t| t.id() == id) else {
            ftoast_core::debug!(toast = id.0, trigger = trigger.as_str(), "removal of unknown toast ignored");
            return false;
        };
        if self.toasts[index].is_exiting() {
            ftoast_core::debug!(toast = id.0, trigger = trigger.as_str(), "toast already leaving");
            return false;
        }

        self.gesture.abandon(id, &mut self.registry);
        let node = self.toasts[index].node();
        let request = self.toasts[index].exit_request(&self.config);
        let ticket = self.animator.animate(node, request);
        self.toasts[index].begin_exit(ticket, trigger);
        self.stats.record(trigger);
        ftoast_core::debug!(
            toast = id.0,
            trigger = trigger.as_str(),
            ticket = ticket.0,
            "toast removal started"
        );
        true
    }

    /// Replace the defaults for toasts shown from now on.
    pub fn set_defaults(&mut self, defaults: ToastDefaults) {
        self.config.defaults = defaults;
    }

    /// Current configuration.
    pub fn config(&self) -> &ToasterConfig {
        &self.config
    }

    /// Toasts that are active or leaving, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Look up a live toast.
    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    fn toast_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|t| t.id() == id)
    }

    /// Rewrite a node's inline style from its current one, so properties a
    /// running animation owns survive.
    fn restyle(&mut self, node: NodeId, f: impl FnOnce(NodeStyle) -> NodeStyle) {
        let style = f(self.surface.node_style(node));
        self.surface.set_style(node, &style);
    }

    /// Whether the toast behind `handle` is still live.
    pub fn is_live(&self, handle: ToastHandle) -> bool {
        self.toast(handle.id).is_some()
    }

    /// Number of toasts that are active or leaving.
    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    /// Whether the shared container exists.
    pub fn has_container(&self) -> bool {
        self.registry.has_container()
    }

    /// Toast bound to the gesture in progress.
    pub fn dragged_toast(&self) -> Option<ToastId> {
        self.registry.dragged_toast()
    }

    /// Shared container bookkeeping.
    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    /// Gesture tracker.
    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// Lifetime counters.
    pub fn stats(&self) -> ToasterStats {
        self.stats
    }

    /// Host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Host animator.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Host animator, mutably.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Both host collaborators at once, for hosts whose animator writes
    /// into the surface.
    pub fn host_mut(&mut self) -> (&mut S, &mut A) {
        (&mut self.surface, &mut self.animator)
    }
}
