#![forbid(unsafe_code)]

//! Named end-to-end scenarios.
//!
//! Each scenario scripts a [`Simulation`] from an empty toaster to idle and
//! returns its final report. The harness binary runs them by name; the
//! integration tests run them to check the end state.

use std::time::Duration;

use ftoast_widgets::{RichContent, ShowOptions, SurfaceError, ToastIcon, ToasterConfig};

use crate::simulation::{Simulation, SimulationReport};

/// Upper bound on the idle wait of every scenario.
const IDLE_LIMIT: Duration = Duration::from_secs(30);

/// Scenario names accepted by [`run`].
pub const SCENARIOS: [&str; 4] = ["hello", "stack", "swipe", "race"];

/// Run the scenario called `name`. Returns `None` for unknown names.
pub fn run(name: &str, step: Duration) -> Option<Result<SimulationReport, SurfaceError>> {
    let sim = Simulation::new(ToasterConfig::default()).step(step);
    let result = match name {
        "hello" => hello(sim),
        "stack" => stack(sim),
        "swipe" => swipe(sim),
        "race" => race(sim),
        _ => return None,
    };
    Some(result)
}

/// One toast shown for four seconds, then left to expire.
pub fn hello(mut sim: Simulation) -> Result<SimulationReport, SurfaceError> {
    sim.show(
        "Hello, toast!",
        ShowOptions::new().display_length(Duration::from_secs(4)),
    )?;
    sim.run_until_idle(IDLE_LIMIT);
    Ok(sim.report())
}

/// Three toasts with staggered lengths plus a persistent one cleared by
/// `dismiss_all`.
pub fn stack(mut sim: Simulation) -> Result<SimulationReport, SurfaceError> {
    for (i, secs) in [1u64, 2, 3].into_iter().enumerate() {
        sim.show(
            format!("Toast #{}", i + 1),
            ShowOptions::new().display_length(Duration::from_secs(secs)),
        )?;
        sim.advance(Duration::from_millis(100));
    }
    sim.show(
        RichContent::new("Stays until dismissed")
            .with_title("Pinned")
            .with_icon(ToastIcon::Warning),
        ShowOptions::new().persistent().class_name("pinned"),
    )?;
    sim.advance(Duration::from_secs(4));
    sim.toaster_mut().dismiss_all();
    sim.run_until_idle(IDLE_LIMIT);
    Ok(sim.report())
}

/// A fast fling dismisses one toast; a short drag on another snaps back
/// and the toast later expires.
pub fn swipe(mut sim: Simulation) -> Result<SimulationReport, SurfaceError> {
    let flung = sim.show("Fling me", ShowOptions::new().persistent())?;
    let held = sim.show(
        "Hold me",
        ShowOptions::new().display_length(Duration::from_secs(2)),
    )?;
    sim.advance(Duration::from_millis(400));

    if let Some(handle) = held {
        sim.drag_toast(handle.id(), 40.0, Duration::from_millis(800), 20);
    }
    if let Some(handle) = flung {
        sim.drag_toast(handle.id(), 120.0, Duration::from_millis(64), 4);
    }
    sim.run_until_idle(IDLE_LIMIT);
    Ok(sim.report())
}

/// Removal triggers colliding on one toast, and an exit completion reported
/// late.
pub fn race(mut sim: Simulation) -> Result<SimulationReport, SurfaceError> {
    let blink = sim.show("Blink", ShowOptions::new().display_length(Duration::ZERO))?;
    let late = sim.show("Late", ShowOptions::new().persistent())?;
    sim.advance_frames(1);
    if let Some(handle) = blink {
        handle.dismiss(sim.toaster_mut());
    }
    if let Some(handle) = late {
        handle.dismiss(sim.toaster_mut());
        let exit = sim
            .toaster()
            .toast(handle.id())
            .and_then(|t| t.pending_ticket());
        if let Some(ticket) = exit {
            sim.toaster_mut().animator_mut().hold(ticket);
        }
    }
    sim.advance(Duration::from_secs(1));
    sim.release_held_animations();
    sim.run_until_idle(IDLE_LIMIT);
    Ok(sim.report())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!(run("nope", Duration::from_millis(16)).is_none());
    }

    #[test]
    fn every_scenario_ends_idle() {
        for name in SCENARIOS {
            let report = run(name, Duration::from_millis(16))
                .expect("known scenario")
                .expect("surface accepts mounts");
            assert_eq!(report.live_count, 0, "{name}");
            assert!(!report.has_container, "{name}");
            assert_eq!(report.completed, report.shown, "{name}");
        }
    }
}
