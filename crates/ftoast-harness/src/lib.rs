#![forbid(unsafe_code)]

//! Deterministic host for FrankenToast.
//!
//! - **Simulated surface**: an in-memory node tree with stacking layout,
//!   hit testing and a mutation journal.
//! - **Simulated animator**: tween playback with explicit completion
//!   reporting, including withheld completions.
//! - **Simulation**: a virtual clock that drives countdowns, animations and
//!   scripted pointer input frame by frame.
//!
//! # Quick Start
//!
//! ```ignore
//! use ftoast_harness::Simulation;
//! use ftoast_widgets::ShowOptions;
//!
//! let mut sim = Simulation::default();
//! sim.show("Saved", ShowOptions::new().display_length(Duration::from_secs(2)))?;
//! sim.run_until_idle(Duration::from_secs(10));
//! assert_eq!(sim.report().live_count, 0);
//! ```

pub mod animator;
pub mod scenario;
pub mod simulation;
pub mod surface;

pub use animator::{AnimationRecord, SimAnimator};
pub use simulation::{DEFAULT_STEP, SimToaster, Simulation, SimulationReport, ToastReport};
pub use surface::{SimNode, SimSurface, SurfaceLayout, SurfaceOp};
