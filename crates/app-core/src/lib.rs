pub mod camera;
pub mod constants;
pub mod controller;
pub mod ease;
pub mod input;
pub mod particles;
pub mod rope;
pub mod spline;
pub mod tube;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use constants::*;
pub use controller::*;
pub use input::*;
pub use particles::*;
pub use rope::*;
pub use spline::*;
pub use tube::*;
