//! Property-based checks for the swipe decision and countdown pausing.
//!
//! - A release dismisses iff the displacement exceeds the activation
//!   distance or the last velocity exceeds the threshold
//! - Drag feedback opacity stays in `[0, 1]`
//! - Each countdown expires exactly once, and only dragged-free ticks count

use std::time::Duration;

use ftoast_core::event::PointerEvent;
use ftoast_widgets::{
    ContainerRegistry, Countdown, DragDecision, DragTarget, GestureOutcome, GestureTracker,
    NodeId, TickOutcome, ToastId,
};
use proptest::prelude::*;

fn target(width: f32, fraction: f32) -> DragTarget {
    DragTarget {
        toast: ToastId(1),
        node: NodeId(1),
        activation_distance: width * fraction,
    }
}

proptest! {
    #[test]
    fn release_decision_matches_rule(
        width in 50.0f32..800.0,
        fraction in 0.05f32..1.0,
        moves in proptest::collection::vec((-40.0f32..40.0, 1u64..50), 1..30),
    ) {
        let mut tracker = GestureTracker::default();
        let mut reg = ContainerRegistry::new();
        let t = target(width, fraction);
        let start = PointerEvent::down(400.0, 10.0, Duration::ZERO);
        let started = tracker.handle(&start, &mut reg, |_| Some(t));
        prop_assert!(matches!(started, GestureOutcome::Started(_)), "press binds");

        let mut x = 400.0f32;
        let mut now = 0u64;
        let mut last_velocity = 0.0f32;
        for (dx, dt) in moves {
            let prev = x;
            x += dx;
            now += dt;
            last_velocity = (x - prev).abs() / dt as f32;
            let outcome = tracker.handle(&PointerEvent::moved(x, 10.0, Duration::from_millis(now)), &mut reg, |_| None);
            let GestureOutcome::Moved { feedback, .. } = outcome else {
                return Err(TestCaseError::fail("move while dragging must report feedback"));
            };
            prop_assert!((0.0..=1.0).contains(&feedback.opacity));
        }

        let outcome = tracker.handle(&PointerEvent::up(x, 10.0, Duration::from_millis(now + 1)), &mut reg, |_| None);
        let GestureOutcome::Released { release, .. } = outcome else {
            return Err(TestCaseError::fail("release must end the gesture"));
        };
        let total = x - 400.0;
        let expected = if total.abs() > t.activation_distance || last_velocity > 1.0 {
            DragDecision::Dismiss
        } else {
            DragDecision::SnapBack
        };
        // Velocities within rounding of the threshold are ambiguous.
        if (last_velocity - 1.0).abs() > 1e-3 && (total.abs() - t.activation_distance).abs() > 1e-3 {
            prop_assert_eq!(release.decision, expected);
        }
        prop_assert!(reg.dragged_toast().is_none());
        prop_assert!(!tracker.is_dragging());
    }

    #[test]
    fn countdown_expires_once_after_undragged_ticks(
        length_ticks in 0u64..200,
        pattern in proptest::collection::vec(any::<bool>(), 1..400),
    ) {
        let tick = Duration::from_millis(20);
        let mut countdown = Countdown::new(tick * length_ticks as u32, tick);
        let mut undragged = 0u64;
        let mut expirations = 0;
        for dragged in pattern {
            match countdown.tick(dragged) {
                TickOutcome::Expired => {
                    if !dragged {
                        undragged += 1;
                    }
                    expirations += 1;
                    prop_assert_eq!(undragged.max(1), length_ticks.max(1));
                }
                TickOutcome::Continue => {
                    if !dragged {
                        undragged += 1;
                    }
                }
                TickOutcome::Inactive => {}
            }
        }
        prop_assert!(expirations <= 1);
    }
}
