//! Integration tests for the animation module.

use ftoast_core::animation::*;
use proptest::prelude::*;
use std::time::Duration;

const MS_375: Duration = Duration::from_millis(375);

#[test]
fn tween_duration_tracking() {
    let mut tween = Tween::new(MS_375).easing(Easing::EaseOutExpo);
    for _ in 0..374 {
        tween.tick(Duration::from_millis(1));
    }
    assert!(!tween.is_complete(), "374x1ms should not complete 375ms tween");
    tween.tick(Duration::from_millis(1));
    assert!(tween.is_complete(), "375x1ms should complete 375ms tween");
}

#[test]
fn easing_functions_are_monotonic() {
    for easing in [linear, ease_in_out, ease_out_cubic, ease_out_expo] {
        let mut prev = 0.0f32;
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let v = easing(t);
            assert!(v >= prev - 0.001, "easing should be monotonic at t={}", t);
            prev = v;
        }
    }
}

#[test]
fn exit_request_collapses_and_fades() {
    let request = AnimationRequest::new(
        NodeStyle::new().opacity(0.0).margin_top(-40.0),
        MS_375,
        Easing::EaseOutExpo,
    );
    let mut tween = Tween::for_request(&request);
    tween.tick(MS_375);
    let end = NodeStyle::new().lerp_towards(&request.target, tween.value());
    assert_eq!(end.opacity, Some(0.0));
    assert_eq!(end.margin_top, Some(-40.0));
}

proptest! {
    #[test]
    fn easing_output_stays_in_unit_range(t in -2.0f32..3.0) {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EaseOutCubic, Easing::EaseOutExpo] {
            let v = easing.apply(t);
            prop_assert!((0.0..=1.0).contains(&v), "{} produced {} for t={}", easing.name(), v, t);
        }
    }

    #[test]
    fn tween_progress_never_exceeds_one(ms in 0u64..2_000, steps in proptest::collection::vec(0u64..200, 0..40)) {
        let mut tween = Tween::new(Duration::from_millis(ms));
        for step in steps {
            tween.tick(Duration::from_millis(step));
            let p = tween.raw_progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn node_opacity_always_clamped(raw in proptest::num::f32::ANY) {
        let style = NodeStyle::new().opacity(raw);
        let o = style.opacity.unwrap_or(-1.0);
        prop_assert!((0.0..=1.0).contains(&o));
    }
}
