use glam::{Vec2, Vec3};

use crate::camera::{camera_pose, pointer_world_on_plane, Camera};
use crate::constants::{
    PARTICLE_COUNT, POINTER_SMOOTHING_RATE, VORTEX_FADE_SPAN, VORTEX_FADE_START, VORTEX_MAX_OPACITY,
};
use crate::ease;
use crate::input::FrameInput;
use crate::particles::{particle_opacity_for_scroll, ParticleField};
use crate::spline::CatmullRom3;
use crate::constants;

/// Everything the renderer needs from one simulation step.
#[derive(Clone, Copy, Debug)]
pub struct FramePose {
    pub eye: Vec3,
    pub target: Vec3,
    pub particle_opacity: f32,
    pub vortex_opacity: f32,
}

/// Owns the whole experience simulation: the particle field, the vortex
/// path, and the smoothed pointer offset. The render host calls `update`
/// once per animation frame with the latest input snapshot and draws from
/// the returned pose; nothing here touches the DOM or the GPU.
pub struct ExperienceController {
    particles: ParticleField,
    path: CatmullRom3,
    pointer_offset: Vec2,
    elapsed: f32,
    aspect: f32,
}

impl ExperienceController {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: ParticleField::new(PARTICLE_COUNT, seed),
            path: CatmullRom3::new(constants::vortex_points()),
            pointer_offset: Vec2::ZERO,
            elapsed: 0.0,
            aspect: 1.0,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn path(&self) -> &CatmullRom3 {
        &self.path
    }

    pub fn particle_positions(&self) -> &[Vec3] {
        self.particles.positions()
    }

    /// Advance the simulation by `dt` seconds and return the frame pose.
    pub fn update(&mut self, dt: f32, input: &FrameInput) -> FramePose {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let scroll = input.scroll_fraction.clamp(0.0, 1.0);

        let desired = input.pointer_ndc * constants::POINTER_OFFSET_SCALE;
        let alpha = ease::smoothing_alpha(dt, POINTER_SMOOTHING_RATE);
        self.pointer_offset += (desired - self.pointer_offset) * alpha;

        let (eye, target) = camera_pose(scroll, self.pointer_offset, &self.path);
        let camera = Camera::new(eye, target, self.aspect);
        let repel = pointer_world_on_plane(input.pointer_ndc, &camera);
        self.particles.step(self.elapsed, dt, Some(repel));

        FramePose {
            eye,
            target,
            particle_opacity: particle_opacity_for_scroll(scroll),
            vortex_opacity: vortex_opacity_for_scroll(scroll),
        }
    }
}

/// Vortex tube opacity: invisible until the fade window opens, easing up to
/// its (deliberately faint) maximum.
pub fn vortex_opacity_for_scroll(scroll_fraction: f32) -> f32 {
    let s = scroll_fraction.clamp(0.0, 1.0);
    ease::ease_in_window(s, VORTEX_FADE_START, VORTEX_FADE_SPAN) * VORTEX_MAX_OPACITY
}
