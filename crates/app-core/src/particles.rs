use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    FIELD_DEPTH, FIELD_LATERAL_EXTENT, PARTICLE_FADE_END, PARTICLE_FADE_START,
    PARTICLE_SMOOTHING_RATE, REPULSION_MAX_PUSH, REPULSION_RADIUS, WANDER_AMPLITUDE,
    WANDER_TIME_RATE,
};
use crate::ease;

/// Fixed-count point cloud. Base positions are seeded at construction and
/// never change; current positions chase a per-frame target (base + wander +
/// pointer repulsion) with a bounded exponential step.
pub struct ParticleField {
    base: Vec<Vec3>,
    current: Vec<Vec3>,
}

impl ParticleField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let half = FIELD_LATERAL_EXTENT * 0.5;
        let base: Vec<Vec3> = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    -rng.gen_range(0.0..FIELD_DEPTH),
                )
            })
            .collect();
        let current = base.clone();
        Self { base, current }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }

    /// Deterministic wander target for one particle at a given elapsed time.
    pub fn wander_target(&self, index: usize, elapsed: f32) -> Vec3 {
        let phase = elapsed * WANDER_TIME_RATE + index as f32;
        self.base[index] + Vec3::new(phase.sin(), phase.cos(), 0.0) * WANDER_AMPLITUDE
    }

    /// Advance every particle toward its target for this frame.
    pub fn step(&mut self, elapsed: f32, dt: f32, repel_from: Option<Vec3>) {
        let alpha = ease::smoothing_alpha(dt, PARTICLE_SMOOTHING_RATE);
        for i in 0..self.base.len() {
            let mut target = self.wander_target(i, elapsed);
            if let Some(p) = repel_from {
                target += repulsion(target, p);
            }
            let step = (target - self.current[i]) * alpha;
            self.current[i] += step;
        }
    }
}

/// Outward push applied to a point within the repulsion radius of `from`.
///
/// Magnitude is `(1 - d/r) * REPULSION_MAX_PUSH`: strongest at the pointer,
/// strictly decreasing with distance, exactly zero at the radius.
pub fn repulsion(point: Vec3, from: Vec3) -> Vec3 {
    let delta = point - from;
    let dist = delta.length();
    if dist >= REPULSION_RADIUS {
        return Vec3::ZERO;
    }
    let falloff = 1.0 - dist / REPULSION_RADIUS;
    let dir = if dist > 1e-6 { delta / dist } else { Vec3::X };
    dir * (falloff * REPULSION_MAX_PUSH)
}

/// Field opacity for a raw scroll fraction: fully visible near the top,
/// fading linearly to invisible across the fade window.
pub fn particle_opacity_for_scroll(scroll_fraction: f32) -> f32 {
    ease::fade_out_window(
        scroll_fraction.clamp(0.0, 1.0),
        PARTICLE_FADE_START,
        PARTICLE_FADE_END,
    )
}
