use glam::Vec3;

// Scene layout and interaction tuning shared by the web and native frontends.

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const FIELD_LATERAL_EXTENT: f32 = 100.0; // x/y span, centered on the origin
pub const FIELD_DEPTH: f32 = 100.0; // particles live in z (-FIELD_DEPTH, 0]
pub const WANDER_AMPLITUDE: f32 = 0.05;
pub const WANDER_TIME_RATE: f32 = 0.3; // wander phase advance per second
pub const REPULSION_RADIUS: f32 = 5.0;
pub const REPULSION_MAX_PUSH: f32 = 0.5; // displacement at zero distance, tapering to 0 at the radius
pub const REPULSION_PLANE_DISTANCE: f32 = 10.0; // pointer plane, in front of the camera
pub const PARTICLE_SMOOTHING_RATE: f32 = 3.0; // per second (~0.05 per frame at 60 Hz)
pub const PARTICLE_SIZE: f32 = 0.15; // world-space quad scale
pub const PARTICLE_FADE_START: f32 = 0.38; // scroll fraction where the field starts fading
pub const PARTICLE_FADE_END: f32 = 0.48;
pub const PARTICLE_COLOR: [f32; 3] = [1.0, 0.41, 0.71]; // hot pink

// Camera rig
pub const RIDE_THRESHOLD: f32 = 0.2; // scroll fraction where the camera mounts the curve
pub const FREE_TRAVEL_DEPTH: f32 = 60.0; // how far back the free camera travels over [0, RIDE_THRESHOLD)
pub const CURVE_LOOK_AHEAD: f32 = 0.01; // look-at parameter offset while riding
pub const POINTER_OFFSET_SCALE: f32 = 0.1; // lateral camera bias per unit of pointer NDC
pub const POINTER_SMOOTHING_RATE: f32 = 3.0;
pub const CAMERA_FOVY_RADIANS: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Vortex tube (static mesh deep in the particle field; the camera rides its curve)
pub const VORTEX_CONTROL_POINTS: [[f32; 3]; 5] = [
    [0.0, 0.0, -60.0],
    [0.0, 0.0, -80.0],
    [2.0, 1.0, -100.0],
    [-2.0, -1.0, -120.0],
    [0.0, 0.0, -140.0],
];
pub const VORTEX_TUBE_RADIUS: f32 = 2.5;
pub const VORTEX_TUBULAR_SEGMENTS: usize = 200;
pub const VORTEX_RADIAL_SEGMENTS: usize = 32;
pub const VORTEX_FADE_START: f32 = 0.20;
pub const VORTEX_FADE_SPAN: f32 = 0.25;
pub const VORTEX_MAX_OPACITY: f32 = 0.1;
pub const VORTEX_COLOR: [f32; 3] = [0.61, 0.31, 0.44]; // muted plum

// Gradient rope (orthographic layer revealed by scroll)
pub const ROPE_TUBE_RADIUS: f32 = 10.0;
pub const ROPE_TUBULAR_SEGMENTS: usize = 500;
pub const ROPE_RADIAL_SEGMENTS: usize = 20;
pub const ROPE_SMOOTHING_RATE: f32 = 6.0; // per second (~0.1 per frame at 60 Hz)
pub const ROPE_GRADIENT: [[f32; 3]; 4] = [
    [0.992, 0.227, 0.0], // #FD3A00
    [0.961, 0.012, 0.0], // #F50300
    [1.0, 0.0, 0.31],    // #FF004F
    [1.0, 0.557, 0.0],   // #FF8E00
];
pub const ROPE_CAMERA_Z: f32 = 1000.0;
pub const ROPE_CAMERA_ZNEAR: f32 = 1.0;
pub const ROPE_CAMERA_ZFAR: f32 = 2000.0;

// Background for the experience layer
pub const EXPERIENCE_CLEAR_COLOR: [f64; 3] = [0.18, 0.0, 0.243]; // deep violet

#[inline]
pub fn vortex_points() -> Vec<Vec3> {
    VORTEX_CONTROL_POINTS.iter().map(|p| Vec3::from(*p)).collect()
}
