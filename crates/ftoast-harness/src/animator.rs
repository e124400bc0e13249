#![forbid(unsafe_code)]

//! Tween-driven animator with explicit completion reporting.
//!
//! [`SimAnimator`] queues every request it receives and plays it forward only
//! when [`SimAnimator::advance`] is called with elapsed time. Each frame
//! writes the interpolated style into the [`SimSurface`]; finished tickets are
//! returned to the caller, which forwards them to
//! [`Toaster::animation_finished`](ftoast_widgets::Toaster::animation_finished).
//!
//! Animations whose node has been detached are dropped without a completion,
//! as the completion contract allows.

use std::time::Duration;

use ftoast_core::animation::{Animation, AnimationRequest, AnimationTicket, NodeStyle, Tween};
use ftoast_widgets::{Animator, NodeId};

use crate::surface::SimSurface;

#[derive(Debug, Clone)]
struct Running {
    ticket: AnimationTicket,
    node: NodeId,
    request: AnimationRequest,
    tween: Tween,
    from: Option<NodeStyle>,
}

/// A request the animator received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRecord {
    /// Ticket handed back to the toaster.
    pub ticket: AnimationTicket,
    /// Animated node.
    pub node: NodeId,
    /// Request as received.
    pub request: AnimationRequest,
}

/// Simulated animation engine.
#[derive(Debug, Default)]
pub struct SimAnimator {
    next: u64,
    running: Vec<Running>,
    history: Vec<AnimationRecord>,
    held: Vec<AnimationTicket>,
}

impl SimAnimator {
    /// Idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received, in order.
    pub fn history(&self) -> &[AnimationRecord] {
        &self.history
    }

    /// Latest request for `node`.
    pub fn last_for(&self, node: NodeId) -> Option<&AnimationRecord> {
        self.history.iter().rev().find(|r| r.node == node)
    }

    /// Number of animations still playing.
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Whether `ticket` is still playing.
    pub fn is_running(&self, ticket: AnimationTicket) -> bool {
        self.running.iter().any(|r| r.ticket == ticket)
    }

    /// Finish `ticket` visually but withhold its completion report until
    /// [`SimAnimator::release_held`].
    pub fn hold(&mut self, ticket: AnimationTicket) {
        self.held.push(ticket);
    }

    /// Completions withheld so far; they are reported by the caller.
    pub fn release_held(&mut self) -> Vec<AnimationTicket> {
        let held = std::mem::take(&mut self.held);
        held.into_iter()
            .filter(|t| !self.running.iter().any(|r| r.ticket == *t))
            .collect()
    }

    /// Play every running animation forward by `dt`, writing frames into
    /// `surface`. Returns the tickets that completed, in start order.
    pub fn advance(&mut self, dt: Duration, surface: &mut SimSurface) -> Vec<AnimationTicket> {
        let mut finished = Vec::new();
        let held = &self.held;
        self.running.retain_mut(|anim| {
            let Some(current) = surface.style(anim.node) else {
                tracing::trace!(ticket = anim.ticket.0, node = anim.node.0, "animation target detached");
                return false;
            };
            let from = *anim.from.get_or_insert(current);
            anim.tween.tick(dt);
            let frame = from.lerp_towards(&anim.request.target, anim.tween.value());
            surface.apply_animated(anim.node, &frame);
            if anim.tween.is_complete() {
                if !held.contains(&anim.ticket) {
                    finished.push(anim.ticket);
                }
                false
            } else {
                true
            }
        });
        finished
    }
}

impl Animator for SimAnimator {
    fn animate(&mut self, node: NodeId, request: AnimationRequest) -> AnimationTicket {
        self.next += 1;
        let ticket = AnimationTicket(self.next);
        self.running.push(Running {
            ticket,
            node,
            request,
            tween: Tween::for_request(&request),
            from: None,
        });
        self.history.push(AnimationRecord {
            ticket,
            node,
            request,
        });
        ticket
    }
}
