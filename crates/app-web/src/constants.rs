// Host page element ids

pub const EXPERIENCE_CANVAS_ID: &str = "experience-canvas";
pub const ROPE_CANVAS_ID: &str = "rope-canvas";
pub const WELCOME_TEXT_ID: &str = "welcome-text";

// Per-word animation delay for the welcome text (milliseconds)
pub const WAVE_STAGGER_MS: u32 = 120;

// Fixed seed so the particle field looks identical on every load
pub const PARTICLE_SEED: u64 = 7;
