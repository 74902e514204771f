use glam::Vec3;

use crate::constants::ROPE_SMOOTHING_RATE;
use crate::ease;

/// Control points for the rope curve, derived from the viewport so the shape
/// scales with the window. Coordinates are in the rope scene's orthographic
/// space (origin at the viewport center, +Y up, z = 0).
pub fn rope_control_points(viewport_w: f32, viewport_h: f32, scroll_height: f32) -> Vec<Vec3> {
    let w = viewport_w;
    let h = viewport_h;
    vec![
        Vec3::new(-w / 2.0, h / 3.0, 0.0),
        Vec3::new(-w / 4.0, h / 6.0, 0.0),
        Vec3::new(-w / 4.0, -h / 6.0, 0.0),
        Vec3::new(w / 4.0, -h / 6.0, 0.0),
        Vec3::new(w / 4.0, h / 6.0, 0.0),
        Vec3::new(w / 6.0, h / 6.0, 0.0),
        Vec3::new(w / 3.0, -h / 3.0, 0.0),
        Vec3::new(w / 2.0, -scroll_height / 2.0, 0.0),
    ]
}

/// Scroll-driven reveal of a polyline prefix. The revealed length is a real
/// number of control points: the integer part selects a prefix, the
/// fractional part interpolates one extra point partway toward the next.
#[derive(Clone, Copy, Debug, Default)]
pub struct RopeReveal {
    target_length: f32,
    current_length: f32,
}

impl RopeReveal {
    pub fn current_length(&self) -> f32 {
        self.current_length
    }

    /// Set the reveal target from a scroll fraction over `num_points` points.
    pub fn set_scroll(&mut self, fraction: f32, num_points: usize) {
        self.target_length = fraction.clamp(0.0, 1.0) * num_points as f32;
    }

    /// Ease the revealed length toward the target. Returns false once the
    /// reveal has settled, so callers can skip rebuilding geometry.
    pub fn advance(&mut self, dt: f32) -> bool {
        let delta = self.target_length - self.current_length;
        if delta.abs() < 1e-3 {
            self.current_length = self.target_length;
            return false;
        }
        let alpha = ease::smoothing_alpha(dt.max(0.0), ROPE_SMOOTHING_RATE);
        self.current_length += delta * alpha;
        true
    }

    /// Visible prefix of the control polyline at the current reveal length,
    /// including the interpolated partial point. Returns `None` when fewer
    /// than two points are visible (no curve can be built yet).
    pub fn visible_points(&self, points: &[Vec3]) -> Option<Vec<Vec3>> {
        if points.is_empty() {
            return None;
        }
        let length = self.current_length.clamp(0.0, points.len() as f32);
        let end = (length.floor() as usize).min(points.len() - 1);
        let mut visible: Vec<Vec3> = points[..=end].to_vec();
        if end + 1 < points.len() {
            let frac = length - end as f32;
            if frac > 0.0 {
                visible.push(points[end].lerp(points[end + 1], frac));
            }
        }
        if visible.len() < 2 {
            return None;
        }
        Some(visible)
    }
}
