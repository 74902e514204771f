use std::cell::RefCell;
use std::rc::Rc;

use app_core::{PointerState, ScrollState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;

/// Input written by event handlers and read once per frame. Handlers never
/// touch the simulation directly; they only update this snapshot.
#[derive(Default)]
pub struct SharedInput {
    pub scroll: ScrollState,
    pub pointer: PointerState,
    pub resized: bool,
}

/// An attached DOM listener that detaches itself when dropped. Handlers are
/// owned here rather than `forget`ten, so tearing the app down removes every
/// callback it registered.
pub struct ListenerHandle {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerHandle {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure =
            Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn wire_scroll(
    window: &web::Window,
    shared: Rc<RefCell<SharedInput>>,
) -> Result<ListenerHandle, JsValue> {
    ListenerHandle::attach(window, "scroll", move |_| {
        if let (Some(w), Some(d)) = (web::window(), dom::window_document()) {
            let (scroll_y, scroll_height, viewport_height) = dom::scroll_metrics(&w, &d);
            shared
                .borrow_mut()
                .scroll
                .set_from_pixels(scroll_y, scroll_height, viewport_height);
        }
    })
}

pub fn wire_pointer(
    window: &web::Window,
    shared: Rc<RefCell<SharedInput>>,
) -> Result<ListenerHandle, JsValue> {
    ListenerHandle::attach(window, "pointermove", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        if let Some(w) = web::window() {
            let (vw, vh) = dom::viewport_size(&w);
            shared.borrow_mut().pointer.set_from_pixels(
                ev.client_x() as f32,
                ev.client_y() as f32,
                vw as f32,
                vh as f32,
            );
        }
    })
}

pub fn wire_resize(
    window: &web::Window,
    shared: Rc<RefCell<SharedInput>>,
) -> Result<ListenerHandle, JsValue> {
    ListenerHandle::attach(window, "resize", move |_| {
        shared.borrow_mut().resized = true;
    })
}
