#![forbid(unsafe_code)]

//! FrankenToast public facade crate.
//!
//! Re-exports the types a host needs to show toasts, plus the simulated host
//! (with the `sim` feature) and a small prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use ftoast_core::animation::{AnimationRequest, AnimationTicket, Easing, NodeStyle};
pub use ftoast_core::clock::{DeterministicClock, MonotonicClock};
pub use ftoast_core::event::{
    PointerButtons, PointerEvent, PointerEventKind, PointerId, PointerSource, TouchPoint,
};
pub use ftoast_core::geometry::{Point, Rect};

// --- Widget re-exports -----------------------------------------------------

pub use ftoast_widgets::{
    Animator, ContainerId, DragDecision, GestureOutcome, Markup, NodeId, RemovalTrigger,
    RichContent, ShowOptions, Surface, SurfaceError, ToastDefaults, ToastHandle, ToastIcon,
    ToastId, ToastMessage, ToastPhase, Toaster, ToasterConfig, ToasterStats,
};

// --- Simulation re-exports -------------------------------------------------

#[cfg(feature = "sim")]
pub use ftoast_harness::{SimAnimator, SimSurface, Simulation, SimulationReport};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ftoast hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The host surface refused an operation.
    Surface(SurfaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
        }
    }
}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

/// Standard result type for ftoast APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Animator, Error, GestureOutcome, Markup, PointerEvent, Result, RichContent, ShowOptions,
        Surface, ToastHandle, ToastIcon, ToastMessage, Toaster, ToasterConfig,
    };

    #[cfg(feature = "sim")]
    pub use crate::Simulation;

    pub use crate::{core, widgets};
}

pub use ftoast_core as core;
#[cfg(feature = "sim")]
pub use ftoast_harness as harness;
pub use ftoast_widgets as widgets;
