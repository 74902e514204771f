use glam::Vec2;

/// Normalized scroll fraction, always in [0, 1].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    fraction: f32,
}

impl ScrollState {
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Normalize a raw scroll offset against the scrollable height. A page
    /// with no scrollable height (viewport >= document) reads as fraction 0.
    pub fn set_from_pixels(&mut self, scroll_y: f64, scroll_height: f64, viewport_height: f64) {
        let scrollable = scroll_height - viewport_height;
        self.fraction = if scrollable > 0.0 {
            ((scroll_y / scrollable) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}

/// Pointer position in normalized device coordinates ([-1, 1], +Y up).
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub ndc: Vec2,
}

impl PointerState {
    /// Normalize pixel coordinates on receipt. A degenerate viewport leaves
    /// the previous value in place.
    pub fn set_from_pixels(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.ndc = Vec2::new(2.0 * x / width - 1.0, 1.0 - 2.0 * y / height);
    }
}

/// Immutable per-frame snapshot handed to the controller. Event handlers
/// write the shared state this is copied from; nothing in the controller
/// holds onto handler closures.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub scroll_fraction: f32,
    pub pointer_ndc: Vec2,
}
