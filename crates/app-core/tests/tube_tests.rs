use app_core::{CatmullRom3, TubeGeometry};
use glam::Vec3;

fn straight_curve() -> CatmullRom3 {
    CatmullRom3::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0)])
}

#[test]
fn vertex_and_index_counts() {
    let tubular = 16;
    let radial = 8;
    let geo = TubeGeometry::new(&straight_curve(), tubular, 2.0, radial);
    assert_eq!(geo.vertices.len(), (tubular + 1) * (radial + 1));
    assert_eq!(geo.indices.len(), tubular * radial * 6);
}

#[test]
fn indices_stay_in_range() {
    let geo = TubeGeometry::new(&straight_curve(), 10, 1.0, 6);
    let max = geo.vertices.len() as u32;
    assert!(geo.indices.iter().all(|&i| i < max));
}

#[test]
fn ring_vertices_sit_at_the_tube_radius() {
    let radius = 2.5;
    let geo = TubeGeometry::new(&straight_curve(), 8, radius, 12);
    // Every ring of a straight -Z tube is a circle in an XY plane
    for v in &geo.vertices {
        let d = (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt();
        assert!((d - radius).abs() < 1e-3, "distance {d}");
    }
}

#[test]
fn uv_spans_unit_square() {
    let geo = TubeGeometry::new(&straight_curve(), 10, 1.0, 6);
    for v in &geo.vertices {
        assert!((0.0..=1.0).contains(&v.uv[0]));
        assert!((0.0..=1.0).contains(&v.uv[1]));
    }
    let first = geo.vertices.first().unwrap();
    let last = geo.vertices.last().unwrap();
    assert_eq!(first.uv, [0.0, 0.0]);
    assert_eq!(last.uv, [1.0, 1.0]);
}

#[test]
fn bending_curve_produces_finite_mesh() {
    // A curve that bends through the vertical, where a fixed up-vector frame
    // would degenerate
    let curve = CatmullRom3::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 10.0, -10.0),
        Vec3::new(0.0, 20.0, 0.0),
        Vec3::new(0.0, 10.0, 10.0),
    ]);
    let geo = TubeGeometry::new(&curve, 32, 1.0, 8);
    for v in &geo.vertices {
        assert!(v.position.iter().all(|c| c.is_finite()));
    }
}
