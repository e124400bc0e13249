#![forbid(unsafe_code)]

//! Toast notifications: countdowns, swipe gestures and the shared container.
//!
//! The host supplies a [`Surface`] and an [`Animator`] and reports time,
//! pointer input and animation completions to a [`Toaster`]. Everything else
//! (stacking, expiry, drag-to-dismiss, container lifetime) happens here.

pub mod config;
pub mod gesture;
pub mod host;
pub mod message;
pub mod registry;
#[cfg(test)]
mod testing;
pub mod timer;
pub mod toast;
pub mod toaster;

pub use config::{TICK_PERIOD, ToastDefaults, ToasterConfig};
pub use gesture::{
    DragDecision, DragFeedback, DragRelease, DragSession, DragTarget, GestureOutcome,
    GestureState, GestureTracker,
};
pub use host::{Animator, ContainerId, NodeId, Surface, SurfaceError};
pub use message::{Markup, RichContent, ToastIcon, ToastMessage};
pub use registry::ContainerRegistry;
pub use timer::{Countdown, CountdownState, TickOutcome};
pub use toast::{OnComplete, RemovalTrigger, ShowOptions, Toast, ToastId, ToastOptions, ToastPhase};
pub use toaster::{ToastHandle, Toaster, ToasterStats};
