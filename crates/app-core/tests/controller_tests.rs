use app_core::constants::{POINTER_OFFSET_SCALE, VORTEX_MAX_OPACITY};
use app_core::{vortex_opacity_for_scroll, ExperienceController, FrameInput};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

#[test]
fn vortex_opacity_window() {
    assert_eq!(vortex_opacity_for_scroll(0.0), 0.0);
    assert_eq!(vortex_opacity_for_scroll(0.20), 0.0);
    let mid = vortex_opacity_for_scroll(0.325);
    assert!((mid - VORTEX_MAX_OPACITY * 0.5).abs() < 1e-4);
    assert!((vortex_opacity_for_scroll(0.45) - VORTEX_MAX_OPACITY).abs() < 1e-6);
    assert!((vortex_opacity_for_scroll(1.0) - VORTEX_MAX_OPACITY).abs() < 1e-6);
}

#[test]
fn vortex_opacity_never_decreases_with_scroll() {
    let mut prev = -1.0;
    for i in 0..=100 {
        let o = vortex_opacity_for_scroll(i as f32 / 100.0);
        assert!(o >= prev);
        prev = o;
    }
}

#[test]
fn update_reports_consistent_opacities() {
    let mut controller = ExperienceController::new(7);
    let input = FrameInput {
        scroll_fraction: 0.43,
        pointer_ndc: Vec2::ZERO,
    };
    let pose = controller.update(DT, &input);
    assert!((pose.particle_opacity - 0.5).abs() < 1e-4);
    assert!(pose.vortex_opacity > 0.0 && pose.vortex_opacity < VORTEX_MAX_OPACITY);
}

#[test]
fn out_of_range_scroll_is_clamped() {
    let mut a = ExperienceController::new(7);
    let mut b = ExperienceController::new(7);
    let low = FrameInput {
        scroll_fraction: -5.0,
        pointer_ndc: Vec2::ZERO,
    };
    let zero = FrameInput {
        scroll_fraction: 0.0,
        pointer_ndc: Vec2::ZERO,
    };
    let pa = a.update(DT, &low);
    let pb = b.update(DT, &zero);
    assert_eq!(pa.eye, pb.eye);
    assert_eq!(pa.target, pb.target);
}

#[test]
fn pointer_offset_converges_to_scaled_ndc() {
    let mut controller = ExperienceController::new(7);
    let input = FrameInput {
        scroll_fraction: 0.0,
        pointer_ndc: Vec2::new(0.6, -0.4),
    };
    let mut pose = controller.update(DT, &input);
    for _ in 0..600 {
        pose = controller.update(DT, &input);
    }
    let expected = Vec2::new(0.6, -0.4) * POINTER_OFFSET_SCALE;
    assert!((pose.eye.x - expected.x).abs() < 1e-3);
    assert!((pose.eye.y - expected.y).abs() < 1e-3);
}

#[test]
fn pointer_offset_moves_gradually() {
    let mut controller = ExperienceController::new(7);
    let input = FrameInput {
        scroll_fraction: 0.0,
        pointer_ndc: Vec2::new(1.0, 0.0),
    };
    let pose = controller.update(DT, &input);
    // One frame gets only a fraction of the way to the full offset
    assert!(pose.eye.x > 0.0);
    assert!(pose.eye.x < POINTER_OFFSET_SCALE * 0.5);
}

#[test]
fn deep_scroll_rides_to_the_curve_end() {
    let mut controller = ExperienceController::new(7);
    let input = FrameInput {
        scroll_fraction: 1.0,
        pointer_ndc: Vec2::ZERO,
    };
    let mut pose = controller.update(DT, &input);
    for _ in 0..10 {
        pose = controller.update(DT, &input);
    }
    let end = controller.path().point(1.0);
    assert!((pose.eye - end).length() < 1e-3);
}

#[test]
fn particles_react_to_the_pointer() {
    let mut with_pointer = ExperienceController::new(7);
    let mut without = ExperienceController::new(7);
    let centered = FrameInput {
        scroll_fraction: 0.0,
        pointer_ndc: Vec2::ZERO,
    };
    let cornered = FrameInput {
        scroll_fraction: 0.0,
        pointer_ndc: Vec2::new(0.9, 0.9),
    };
    for _ in 0..60 {
        with_pointer.update(DT, &cornered);
        without.update(DT, &centered);
    }
    assert_ne!(
        with_pointer.particle_positions(),
        without.particle_positions()
    );
}

#[test]
fn updates_are_deterministic_for_a_seed() {
    let mut a = ExperienceController::new(42);
    let mut b = ExperienceController::new(42);
    let input = FrameInput {
        scroll_fraction: 0.3,
        pointer_ndc: Vec2::new(0.1, 0.2),
    };
    for _ in 0..30 {
        let pa = a.update(DT, &input);
        let pb = b.update(DT, &input);
        assert_eq!(pa.eye, pb.eye);
    }
    assert_eq!(a.particle_positions(), b.particle_positions());
}
