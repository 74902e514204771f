// Sanity checks on scene constants and their relationships.

use app_core::constants::*;
use app_core::ease;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(PARTICLE_COUNT > 0);
    assert!(FIELD_LATERAL_EXTENT > 0.0);
    assert!(FIELD_DEPTH > 0.0);
    assert!(WANDER_AMPLITUDE > 0.0);
    assert!(REPULSION_RADIUS > 0.0);
    assert!(REPULSION_MAX_PUSH > 0.0);
    assert!(PARTICLE_SMOOTHING_RATE > 0.0);
    assert!(ROPE_SMOOTHING_RATE > 0.0);
    assert!(RIDE_THRESHOLD > 0.0 && RIDE_THRESHOLD < 1.0);
    assert!(VORTEX_MAX_OPACITY > 0.0 && VORTEX_MAX_OPACITY <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fade_windows_are_ordered() {
    // The particle fade finishes before the scroll range ends
    assert!(PARTICLE_FADE_START < PARTICLE_FADE_END);
    assert!(PARTICLE_FADE_END < 1.0);

    // The vortex fade starts where the camera mounts the curve
    assert!(VORTEX_FADE_START >= RIDE_THRESHOLD);
    assert!(VORTEX_FADE_START + VORTEX_FADE_SPAN < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn vortex_curve_starts_at_the_free_travel_depth() {
    // The camera's free travel hands off exactly onto the curve start
    assert_eq!(VORTEX_CONTROL_POINTS[0], [0.0, 0.0, -FREE_TRAVEL_DEPTH]);
    // Control points descend monotonically in z
    for w in VORTEX_CONTROL_POINTS.windows(2) {
        assert!(w[1][2] < w[0][2]);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn colors_are_normalized() {
    for c in PARTICLE_COLOR.iter().chain(VORTEX_COLOR.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
    for stop in ROPE_GRADIENT.iter() {
        for c in stop.iter() {
            assert!((0.0..=1.0).contains(c));
        }
    }
    for c in EXPERIENCE_CLEAR_COLOR.iter() {
        assert!((0.0..=1.0).contains(c));
    }
}

#[test]
fn smoothing_rates_match_frame_factors() {
    // At 60 Hz the per-frame smoothing factors land near the intended values
    let particle_alpha = ease::smoothing_alpha(1.0 / 60.0, PARTICLE_SMOOTHING_RATE);
    assert!((particle_alpha - 0.05).abs() < 0.01);

    let rope_alpha = ease::smoothing_alpha(1.0 / 60.0, ROPE_SMOOTHING_RATE);
    assert!((rope_alpha - 0.1).abs() < 0.01);
}

#[test]
fn ease_helpers_hit_their_endpoints() {
    assert_eq!(ease::smoothstep01(0.0), 0.0);
    assert_eq!(ease::smoothstep01(1.0), 1.0);
    assert_eq!(ease::smoothstep01(0.5), 0.5);
    assert_eq!(ease::fade_out_window(0.0, 0.38, 0.48), 1.0);
    assert_eq!(ease::fade_out_window(0.48, 0.38, 0.48), 0.0);
    assert_eq!(ease::ease_in_window(0.2, 0.2, 0.25), 0.0);
    assert!((ease::ease_in_window(0.45, 0.2, 0.25) - 1.0).abs() < 1e-5);
}

#[test]
fn smoothing_alpha_is_bounded_and_monotone() {
    let mut prev = 0.0;
    for i in 1..=10 {
        let dt = i as f32 * 0.01;
        let a = ease::smoothing_alpha(dt, 3.0);
        assert!(a > prev && a < 1.0);
        prev = a;
    }
    assert_eq!(ease::smoothing_alpha(0.0, 3.0), 0.0);
    assert_eq!(ease::smoothing_alpha(-1.0, 3.0), 0.0);
}
