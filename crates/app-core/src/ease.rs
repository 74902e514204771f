//! Small interpolation helpers shared across the scene.

/// Hermite smoothstep over [0, 1], clamped.
#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Frame-rate independent factor for exponential smoothing: the fraction of
/// the remaining distance to cover after `dt` seconds at the given rate.
#[inline]
pub fn smoothing_alpha(dt: f32, rate_per_sec: f32) -> f32 {
    1.0 - (-rate_per_sec * dt.max(0.0)).exp()
}

/// 1 before `start`, linear falloff to 0 at `end`, 0 after.
#[inline]
pub fn fade_out_window(s: f32, start: f32, end: f32) -> f32 {
    if s <= start {
        1.0
    } else if s >= end {
        0.0
    } else {
        (end - s) / (end - start)
    }
}

/// 0 before `start`, smoothstep rise over `span`, 1 after.
#[inline]
pub fn ease_in_window(s: f32, start: f32, span: f32) -> f32 {
    if s <= start {
        0.0
    } else if s >= start + span {
        1.0
    } else {
        smoothstep01((s - start) / span)
    }
}
