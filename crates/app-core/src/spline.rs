use glam::Vec3;

/// Centripetal Catmull-Rom curve through a fixed set of control points.
///
/// Sampling is pure: the same `t` always yields the same point. The curve
/// passes through every control point (at `t = i / (n - 1)`) and the end
/// segments are extrapolated by mirroring, so `point(0)` and `point(1)` are
/// exactly the first and last control points.
pub struct CatmullRom3 {
    points: Vec<Vec3>,
}

impl CatmullRom3 {
    /// Panics if fewer than two control points are given.
    pub fn new(points: Vec<Vec3>) -> Self {
        assert!(points.len() >= 2, "curve needs at least two control points");
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Sample the curve at `t` in [0, 1] (clamped).
    pub fn point(&self, t: f32) -> Vec3 {
        let l = self.points.len();
        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut i = p.floor() as usize;
        let mut w = p - i as f32;
        if w == 0.0 && i == l - 1 {
            i = l - 2;
            w = 1.0;
        }

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i > 0 { self.points[i - 1] } else { p1 + (p1 - p2) };
        let p3 = if i + 2 < l {
            self.points[i + 2]
        } else {
            p2 + (p2 - p1)
        };

        // Centripetal knot spacing; degenerate (coincident) knots fall back
        // to uniform spacing to keep the tangents finite.
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        sample_nonuniform(p0, p1, p2, p3, dt0, dt1, dt2, w)
    }

    /// Unit tangent at `t`, by central differences. Falls back to -Z when the
    /// local segment is degenerate (e.g. duplicated control points).
    pub fn tangent(&self, t: f32) -> Vec3 {
        let h = 1e-3;
        let a = self.point((t - h).max(0.0));
        let b = self.point((t + h).min(1.0));
        (b - a).try_normalize().unwrap_or(Vec3::NEG_Z)
    }
}

/// Cubic Hermite segment with non-uniform (Barry-Goldman) tangents,
/// evaluated at local parameter `w` in [0, 1].
#[allow(clippy::too_many_arguments)]
fn sample_nonuniform(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    dt0: f32,
    dt1: f32,
    dt2: f32,
    w: f32,
) -> Vec3 {
    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    let c2 = (p2 - p1) * 3.0 - t1 * 2.0 - t2;
    let c3 = (p1 - p2) * 2.0 + t1 + t2;

    let w2 = w * w;
    p1 + t1 * w + c2 * w2 + c3 * (w2 * w)
}
