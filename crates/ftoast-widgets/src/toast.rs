#![forbid(unsafe_code)]

//! The toast entity.
//!
//! A [`Toast`] couples one rendered node with its countdown, its drag flag
//! and its removal state. Toasts are owned by the
//! [`Toaster`](crate::toaster::Toaster) that showed them; only the toaster's
//! timer, gesture and removal paths mutate them.
//!
//! # Lifecycle
//!
//! ```text
//! Entering ──entrance done──▶ Visible
//!    │                          │
//!    └──────── remove ──────────┴──▶ Exiting ──exit done──▶ (dropped)
//! ```
//!
//! `Exiting` is terminal for every trigger: once a toast has started leaving,
//! further removal requests are ignored.

use std::fmt;
use std::time::Duration;

use ftoast_core::animation::{AnimationRequest, AnimationTicket, NodeStyle};

use crate::config::{ToastDefaults, ToasterConfig, clamp_fraction};
use crate::host::NodeId;
use crate::message::ToastMessage;
use crate::timer::{Countdown, TickOutcome};

/// Unique identifier for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

/// Completion callback run once the exit animation has finished.
pub type OnComplete = Box<dyn FnOnce()>;

/// Caller overrides for a new toast. Every field falls back to the
/// toaster's [`ToastDefaults`].
#[derive(Default)]
pub struct ShowOptions {
    display_length: Option<Option<Duration>>,
    in_duration: Option<Duration>,
    out_duration: Option<Duration>,
    activation_fraction: Option<f32>,
    class_name: Option<String>,
    on_complete: Option<OnComplete>,
}

impl ShowOptions {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire after `length`.
    pub fn display_length(mut self, length: Duration) -> Self {
        self.display_length = Some(Some(length));
        self
    }

    /// Never expire; only a swipe or an explicit dismiss removes the toast.
    pub fn persistent(mut self) -> Self {
        self.display_length = Some(None);
        self
    }

    /// Entrance animation length.
    pub fn in_duration(mut self, duration: Duration) -> Self {
        self.in_duration = Some(duration);
        self
    }

    /// Exit animation length.
    pub fn out_duration(mut self, duration: Duration) -> Self {
        self.out_duration = Some(duration);
        self
    }

    /// Fraction of the toast width a drag must cover to dismiss.
    pub fn activation_fraction(mut self, fraction: f32) -> Self {
        self.activation_fraction = Some(fraction);
        self
    }

    /// Whitespace-separated extra classes for the node.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Callback run after the toast has fully left.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Merge with `defaults` into immutable toast options.
    pub fn resolve(self, defaults: &ToastDefaults) -> ToastOptions {
        ToastOptions {
            display_length: self.display_length.unwrap_or(defaults.display_length),
            in_duration: self.in_duration.unwrap_or(defaults.in_duration),
            out_duration: self.out_duration.unwrap_or(defaults.out_duration),
            activation_fraction: self
                .activation_fraction
                .map_or(defaults.activation_fraction, clamp_fraction),
            class_names: self
                .class_name
                .as_deref()
                .map(parse_class_names)
                .unwrap_or_default(),
            on_complete: self.on_complete,
        }
    }
}

impl fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowOptions")
            .field("display_length", &self.display_length)
            .field("in_duration", &self.in_duration)
            .field("out_duration", &self.out_duration)
            .field("activation_fraction", &self.activation_fraction)
            .field("class_name", &self.class_name)
            .field("on_complete", &self.on_complete.as_ref().map(|_| ".."))
            .finish()
    }
}

fn parse_class_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_owned).collect()
}

/// Resolved per-toast options.
pub struct ToastOptions {
    /// How long the toast stays up. `None` means it never expires.
    pub display_length: Option<Duration>,
    /// Entrance animation length.
    pub in_duration: Duration,
    /// Exit animation length.
    pub out_duration: Duration,
    /// Fraction of the node width a drag must cover to dismiss.
    pub activation_fraction: f32,
    /// Extra classes, in the order given.
    pub class_names: Vec<String>,
    on_complete: Option<OnComplete>,
}

impl ToastOptions {
    /// Whether a completion callback is pending.
    pub fn has_on_complete(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Node classes: the base `toast` class followed by the custom ones.
    pub fn classes(&self) -> Vec<String> {
        std::iter::once("toast".to_owned())
            .chain(self.class_names.iter().cloned())
            .collect()
    }
}

impl fmt::Debug for ToastOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastOptions")
            .field("display_length", &self.display_length)
            .field("in_duration", &self.in_duration)
            .field("out_duration", &self.out_duration)
            .field("activation_fraction", &self.activation_fraction)
            .field("class_names", &self.class_names)
            .field("on_complete", &self.on_complete.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Why a toast started leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalTrigger {
    /// Its countdown reached zero.
    Expired,
    /// A drag was released past the dismiss threshold.
    Swiped,
    /// The caller dismissed it.
    Forced,
}

impl RemovalTrigger {
    /// Stable name for logs and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Swiped => "swiped",
            Self::Forced => "forced",
        }
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Entrance animation playing.
    Entering {
        /// Entrance animation.
        ticket: AnimationTicket,
    },
    /// At rest.
    Visible,
    /// Exit animation playing; the toast is dropped when it completes.
    Exiting {
        /// Exit animation.
        ticket: AnimationTicket,
        /// What started the removal.
        trigger: RemovalTrigger,
    },
}

/// One live toast.
pub struct Toast {
    id: ToastId,
    message: ToastMessage,
    options: ToastOptions,
    countdown: Option<Countdown>,
    node: NodeId,
    dragged: bool,
    swipe_offset: Option<f32>,
    phase: ToastPhase,
}

impl Toast {
    /// A toast whose node is mounted and whose entrance is `entrance`.
    ///
    /// The countdown starts immediately unless the toast never expires.
    pub(crate) fn new(
        id: ToastId,
        message: ToastMessage,
        options: ToastOptions,
        node: NodeId,
        entrance: AnimationTicket,
        tick_period: Duration,
    ) -> Self {
        let countdown = options
            .display_length
            .map(|length| Countdown::new(length, tick_period));
        Self {
            id,
            message,
            options,
            countdown,
            node,
            dragged: false,
            swipe_offset: None,
            phase: ToastPhase::Entering { ticket: entrance },
        }
    }

    /// Identifier.
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Payload.
    pub fn message(&self) -> &ToastMessage {
        &self.message
    }

    /// Resolved options.
    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    /// Rendered node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Countdown, absent for toasts that never expire.
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Time left before expiry, `None` for toasts that never expire.
    pub fn remaining(&self) -> Option<Duration> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// Whether a gesture currently holds this toast.
    pub fn is_being_dragged(&self) -> bool {
        self.dragged
    }

    /// Whether this toast was removed by a swipe.
    pub fn was_swipe_dismissed(&self) -> bool {
        self.swipe_offset.is_some()
    }

    /// Whether removal has begun.
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, ToastPhase::Exiting { .. })
    }

    /// Animation this toast is waiting on, if any.
    pub fn pending_ticket(&self) -> Option<AnimationTicket> {
        match self.phase {
            ToastPhase::Entering { ticket } | ToastPhase::Exiting { ticket, .. } => Some(ticket),
            ToastPhase::Visible => None,
        }
    }

    pub(crate) fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }

    /// Record a swipe dismissal continuing `offset` px from rest.
    pub(crate) fn mark_swipe_dismissed(&mut self, offset: f32) {
        self.swipe_offset = Some(offset);
    }

    /// Drive the countdown by `dt`, reading the drag flag as it is now.
    pub(crate) fn advance(&mut self, dt: Duration) -> TickOutcome {
        if self.is_exiting() {
            return TickOutcome::Inactive;
        }
        let dragged = self.dragged;
        match self.countdown.as_mut() {
            Some(countdown) => countdown.advance(dt, dragged),
            None => TickOutcome::Inactive,
        }
    }

    /// Entrance finished. Returns `false` if `ticket` is not the entrance.
    pub(crate) fn finish_entrance(&mut self, ticket: AnimationTicket) -> bool {
        match self.phase {
            ToastPhase::Entering { ticket: entrance } if entrance == ticket => {
                self.phase = ToastPhase::Visible;
                true
            }
            _ => false,
        }
    }

    /// Exit animation this toast should play.
    pub(crate) fn exit_request(&self, config: &ToasterConfig) -> AnimationRequest {
        match self.swipe_offset {
            Some(offset) => AnimationRequest::new(
                NodeStyle::new().translate_x(offset).opacity(0.0),
                config.swipe_exit,
                config.exit_easing,
            ),
            None => AnimationRequest::new(
                NodeStyle::new().opacity(0.0).margin_top(config.exit_lift),
                self.options.out_duration,
                config.exit_easing,
            ),
        }
    }

    /// Enter `Exiting`, stopping the countdown. Returns `false` if removal
    /// had already begun.
    pub(crate) fn begin_exit(&mut self, ticket: AnimationTicket, trigger: RemovalTrigger) -> bool {
        if self.is_exiting() {
            return false;
        }
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }
        self.dragged = false;
        self.phase = ToastPhase::Exiting { ticket, trigger };
        true
    }

    /// Take the completion callback. Yields it at most once.
    pub(crate) fn take_on_complete(&mut self) -> Option<OnComplete> {
        self.options.on_complete.take()
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("options", &self.options)
            .field("countdown", &self.countdown)
            .field("node", &self.node)
            .field("dragged", &self.dragged)
            .field("swipe_offset", &self.swipe_offset)
            .field("phase", &self.phase)
            .finish()
    }
}
