use app_core::{vortex_points, CatmullRom3};
use glam::Vec3;

fn close(a: Vec3, b: Vec3, tol: f32) -> bool {
    (a - b).length() < tol
}

#[test]
fn endpoints_are_first_and_last_control_points() {
    let curve = CatmullRom3::new(vortex_points());
    assert!(close(curve.point(0.0), Vec3::new(0.0, 0.0, -60.0), 1e-3));
    assert!(close(curve.point(1.0), Vec3::new(0.0, 0.0, -140.0), 1e-3));
}

#[test]
fn passes_through_interior_control_points() {
    let points = vortex_points();
    let curve = CatmullRom3::new(points.clone());
    let n = points.len();
    for (i, p) in points.iter().enumerate() {
        let t = i as f32 / (n - 1) as f32;
        assert!(
            close(curve.point(t), *p, 1e-3),
            "control point {i} not on curve"
        );
    }
}

#[test]
fn sampling_is_deterministic() {
    let curve = CatmullRom3::new(vortex_points());
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        assert_eq!(curve.point(t), curve.point(t));
    }
}

#[test]
fn parameter_is_clamped() {
    let curve = CatmullRom3::new(vortex_points());
    assert_eq!(curve.point(-0.5), curve.point(0.0));
    assert_eq!(curve.point(1.5), curve.point(1.0));
}

#[test]
fn tangent_is_unit_length() {
    let curve = CatmullRom3::new(vortex_points());
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let tangent = curve.tangent(t);
        assert!((tangent.length() - 1.0).abs() < 1e-4, "t={t}");
    }
}

#[test]
fn straight_segment_tangent_points_forward() {
    // The first two vortex control points lie on the -Z axis
    let curve = CatmullRom3::new(vortex_points());
    let tangent = curve.tangent(0.0);
    assert!(tangent.z < -0.9);
}

#[test]
fn two_point_curve_is_usable() {
    let curve = CatmullRom3::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)]);
    assert!(close(curve.point(0.0), Vec3::ZERO, 1e-3));
    assert!(close(curve.point(1.0), Vec3::new(0.0, 0.0, -10.0), 1e-3));
    let mid = curve.point(0.5);
    assert!(mid.z < 0.0 && mid.z > -10.0);
}

#[test]
fn duplicated_control_points_stay_finite() {
    let p = Vec3::new(1.0, 2.0, -3.0);
    let curve = CatmullRom3::new(vec![p, p, Vec3::new(0.0, 0.0, -10.0)]);
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!(curve.point(t).is_finite(), "t={t}");
    }
}
