use std::cell::{Cell, RefCell};
use std::rc::Rc;

use app_core::{
    constants, CatmullRom3, Camera, ExperienceController, FrameInput, RopeReveal, TubeGeometry,
};
use glam::{Mat4, Vec3};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;
use crate::events::SharedInput;
use crate::render::SceneGpu;

/// Owned handle to a self-rescheduling requestAnimationFrame loop.
///
/// `cancel` revokes the pending frame and drops the closure (and everything
/// it captures), so a disposed app stops running immediately rather than
/// ticking until the tab closes.
pub struct AnimationLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationLoop {
    pub fn start(mut frame: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let raf_id = Rc::new(Cell::new(None::<i32>));
        let cancelled = Rc::new(Cell::new(false));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let raf_for_tick = raf_id.clone();
        let cancelled_for_tick = cancelled.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if cancelled_for_tick.get() {
                return;
            }
            frame();
            if cancelled_for_tick.get() {
                return;
            }
            if let Some(w) = web::window() {
                match w.request_animation_frame(
                    tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                ) {
                    Ok(id) => raf_for_tick.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame error: {:?}", e),
                }
            }
        }) as Box<dyn FnMut()>));

        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let id = window
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
        raf_id.set(Some(id));
        Ok(Self {
            raf_id,
            cancelled,
            tick,
        })
    }

    pub fn cancel(self) {
        self.cancelled.set(true);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Break the closure's self-reference so its captures are dropped
        self.tick.borrow_mut().take();
    }
}

/// Everything one animation frame touches: the simulation, both GPU scenes,
/// and the input snapshot shared with the event handlers.
pub struct FrameContext {
    pub shared: Rc<RefCell<SharedInput>>,
    pub controller: ExperienceController,
    pub rope_reveal: RopeReveal,
    pub rope_points: Vec<Vec3>,
    pub rope_view_proj: Mat4,
    pub rope_dirty: bool,
    pub experience_canvas: web::HtmlCanvasElement,
    pub rope_canvas: web::HtmlCanvasElement,
    pub experience_gpu: SceneGpu,
    pub rope_gpu: SceneGpu,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let (input, resized) = {
            let mut shared = self.shared.borrow_mut();
            let input = FrameInput {
                scroll_fraction: shared.scroll.fraction(),
                pointer_ndc: shared.pointer.ndc,
            };
            let resized = std::mem::take(&mut shared.resized);
            (input, resized)
        };
        if resized {
            self.handle_resize();
        }

        self.render_experience(dt, &input);
        self.render_rope(dt, &input);
    }

    fn handle_resize(&mut self) {
        dom::sync_canvas_backing_size(&self.experience_canvas);
        dom::sync_canvas_backing_size(&self.rope_canvas);
        if let (Some(window), Some(document)) = (web::window(), dom::window_document()) {
            let (vw, vh) = dom::viewport_size(&window);
            let (scroll_y, scroll_height, viewport_height) =
                dom::scroll_metrics(&window, &document);
            self.shared.borrow_mut().scroll.set_from_pixels(
                scroll_y,
                scroll_height,
                viewport_height,
            );
            self.rope_points =
                app_core::rope_control_points(vw as f32, vh as f32, scroll_height as f32);
            self.rope_view_proj = rope_view_proj(vw as f32, vh as f32);
        }
        self.rope_dirty = true;
    }

    fn render_experience(&mut self, dt: f32, input: &FrameInput) {
        self.experience_gpu
            .resize_if_needed(self.experience_canvas.width(), self.experience_canvas.height());
        self.controller.set_aspect(self.experience_gpu.aspect());

        let pose = self.controller.update(dt, input);
        let camera = Camera::new(pose.eye, pose.target, self.experience_gpu.aspect());
        self.experience_gpu.set_view_proj(camera.view_proj_matrix());
        self.experience_gpu.set_particle_style(
            constants::PARTICLE_COLOR,
            pose.particle_opacity,
            constants::PARTICLE_SIZE,
        );
        self.experience_gpu
            .set_tube_style(pose.vortex_opacity, [constants::VORTEX_COLOR; 4]);
        self.experience_gpu
            .upload_particles(self.controller.particle_positions());

        if let Err(e) = self.experience_gpu.render(true, true) {
            log::error!("experience render error: {:?}", e);
        }
    }

    fn render_rope(&mut self, dt: f32, input: &FrameInput) {
        self.rope_reveal
            .set_scroll(input.scroll_fraction, self.rope_points.len());
        let moved = self.rope_reveal.advance(dt);

        if moved || self.rope_dirty {
            match self.rope_reveal.visible_points(&self.rope_points) {
                Some(points) => {
                    let curve = CatmullRom3::new(points);
                    let geometry = TubeGeometry::new(
                        &curve,
                        constants::ROPE_TUBULAR_SEGMENTS,
                        constants::ROPE_TUBE_RADIUS,
                        constants::ROPE_RADIAL_SEGMENTS,
                    );
                    self.rope_gpu.upload_tube(&geometry);
                }
                None => self.rope_gpu.clear_tube(),
            }
            self.rope_dirty = false;
        }

        self.rope_gpu
            .resize_if_needed(self.rope_canvas.width(), self.rope_canvas.height());
        self.rope_gpu.set_view_proj(self.rope_view_proj);
        self.rope_gpu.set_tube_style(1.0, constants::ROPE_GRADIENT);
        if let Err(e) = self.rope_gpu.render(false, true) {
            log::error!("rope render error: {:?}", e);
        }
    }
}

/// Orthographic projection matching the CSS pixel space the rope control
/// points are expressed in (origin centered, +Y up).
pub fn rope_view_proj(viewport_w: f32, viewport_h: f32) -> Mat4 {
    let half_w = viewport_w * 0.5;
    let half_h = viewport_h * 0.5;
    let proj = Mat4::orthographic_rh(
        -half_w,
        half_w,
        -half_h,
        half_h,
        constants::ROPE_CAMERA_ZNEAR,
        constants::ROPE_CAMERA_ZFAR,
    );
    let view = Mat4::look_at_rh(
        Vec3::new(0.0, 0.0, constants::ROPE_CAMERA_Z),
        Vec3::ZERO,
        Vec3::Y,
    );
    proj * view
}
