use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{
    CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR, CURVE_LOOK_AHEAD, FREE_TRAVEL_DEPTH,
    REPULSION_PLANE_DISTANCE, RIDE_THRESHOLD,
};
use crate::spline::CatmullRom3;

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// The rig has exactly two states, chosen by scroll fraction alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Near the top of the page: travel straight back along -Z.
    Free,
    /// Deeper scroll: ride along the vortex curve.
    Riding,
}

#[inline]
pub fn mode_for_scroll(scroll_fraction: f32) -> CameraMode {
    if scroll_fraction < RIDE_THRESHOLD {
        CameraMode::Free
    } else {
        CameraMode::Riding
    }
}

/// Eye and look-at target for a scroll fraction and smoothed pointer offset.
///
/// Re-evaluated from scratch every frame; there is no hysteresis between the
/// two modes.
pub fn camera_pose(scroll_fraction: f32, pointer_offset: Vec2, path: &CatmullRom3) -> (Vec3, Vec3) {
    let s = scroll_fraction.clamp(0.0, 1.0);
    match mode_for_scroll(s) {
        CameraMode::Free => {
            let z = -s * FREE_TRAVEL_DEPTH;
            let eye = Vec3::new(pointer_offset.x, pointer_offset.y, z);
            let target = Vec3::new(0.0, 0.0, z - 1.0);
            (eye, target)
        }
        CameraMode::Riding => {
            let t = (s - RIDE_THRESHOLD) / (1.0 - RIDE_THRESHOLD);
            let eye = path.point(t) + Vec3::new(pointer_offset.x, pointer_offset.y, 0.0);
            let mut target = path.point((t + CURVE_LOOK_AHEAD).min(1.0));
            // At the very end of the curve the look-ahead collapses onto the
            // eye; keep the view matrix well-defined.
            if target.distance_squared(eye) < 1e-8 {
                target = eye + Vec3::NEG_Z;
            }
            (eye, target)
        }
    }
}

/// Unproject a pointer NDC position onto the plane a fixed distance in front
/// of the camera. This is the world-space point particles are repelled from.
pub fn pointer_world_on_plane(ndc: Vec2, camera: &Camera) -> Vec3 {
    let inv = camera.view_proj_matrix().inverse();
    let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let ray_origin = camera.eye;
    let ray_dir = (far.truncate() / far.w - ray_origin).normalize();

    let plane_z = camera.eye.z - REPULSION_PLANE_DISTANCE;
    if ray_dir.z.abs() > 1e-6 {
        let t = (plane_z - ray_origin.z) / ray_dir.z;
        if t >= 0.0 {
            return ray_origin + ray_dir * t;
        }
    }
    // Ray parallel to the plane: fall back to straight ahead.
    ray_origin + Vec3::new(0.0, 0.0, -REPULSION_PLANE_DISTANCE)
}
