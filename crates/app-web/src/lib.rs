#![cfg(target_arch = "wasm32")]

pub mod constants;
pub mod dom;
pub mod events;
pub mod frame;
pub mod overlay;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use app_core::{
    constants as core, ExperienceController, RopeReveal, TubeGeometry,
};
use instant::Instant;
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::constants::{EXPERIENCE_CANVAS_ID, PARTICLE_SEED, ROPE_CANVAS_ID};
use crate::events::SharedInput;
use crate::render::SceneGpu;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");
    Ok(())
}

/// A mounted experience. Holds the animation loop and every DOM listener the
/// app registered; `dispose` releases all of them.
#[wasm_bindgen]
pub struct App {
    animation: Option<frame::AnimationLoop>,
    listeners: Vec<events::ListenerHandle>,
}

/// Mount the experience onto the host page's canvases. Called from page
/// script once the module is loaded.
#[wasm_bindgen]
pub async fn mount() -> Result<App, JsValue> {
    init()
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

#[wasm_bindgen]
impl App {
    /// Stop the animation loop and detach every event listener. Safe to call
    /// more than once.
    pub fn dispose(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.cancel();
        }
        self.listeners.clear();
        log::info!("app disposed");
    }
}

async fn init() -> anyhow::Result<App> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    overlay::init_welcome_text(&document)
        .map_err(|e| anyhow::anyhow!(format!("welcome text error: {:?}", e)))?;

    let experience_canvas = dom::canvas_by_id(&document, EXPERIENCE_CANVAS_ID)?;
    let rope_canvas = dom::canvas_by_id(&document, ROPE_CANVAS_ID)?;
    dom::sync_canvas_backing_size(&experience_canvas);
    dom::sync_canvas_backing_size(&rope_canvas);

    let shared = Rc::new(RefCell::new(SharedInput::default()));
    {
        let (scroll_y, scroll_height, viewport_height) = dom::scroll_metrics(&window, &document);
        shared
            .borrow_mut()
            .scroll
            .set_from_pixels(scroll_y, scroll_height, viewport_height);
    }

    let to_anyhow = |e: JsValue| anyhow::anyhow!(format!("listener error: {:?}", e));
    let listeners = vec![
        events::wire_scroll(&window, shared.clone()).map_err(to_anyhow)?,
        events::wire_pointer(&window, shared.clone()).map_err(to_anyhow)?,
        events::wire_resize(&window, shared.clone()).map_err(to_anyhow)?,
    ];

    let [r, g, b] = core::EXPERIENCE_CLEAR_COLOR;
    let mut experience_gpu = SceneGpu::new(
        &experience_canvas,
        core::PARTICLE_COUNT,
        wgpu::Color { r, g, b, a: 1.0 },
    )
    .await?;
    let rope_gpu = SceneGpu::new(&rope_canvas, 0, wgpu::Color::TRANSPARENT).await?;

    let controller = ExperienceController::new(PARTICLE_SEED);
    // The vortex mesh never changes; upload it once
    let vortex = TubeGeometry::new(
        controller.path(),
        core::VORTEX_TUBULAR_SEGMENTS,
        core::VORTEX_TUBE_RADIUS,
        core::VORTEX_RADIAL_SEGMENTS,
    );
    experience_gpu.upload_tube(&vortex);

    let (vw, vh) = dom::viewport_size(&window);
    let (_, scroll_height, _) = dom::scroll_metrics(&window, &document);
    let rope_points =
        app_core::rope_control_points(vw as f32, vh as f32, scroll_height as f32);

    let mut ctx = frame::FrameContext {
        shared,
        controller,
        rope_reveal: RopeReveal::default(),
        rope_points,
        rope_view_proj: frame::rope_view_proj(vw as f32, vh as f32),
        rope_dirty: true,
        experience_canvas,
        rope_canvas,
        experience_gpu,
        rope_gpu,
        last_instant: Instant::now(),
    };
    let animation = frame::AnimationLoop::start(move || ctx.frame())
        .map_err(|e| anyhow::anyhow!(format!("animation loop error: {:?}", e)))?;

    log::info!("app mounted");
    Ok(App {
        animation: Some(animation),
        listeners,
    })
}
