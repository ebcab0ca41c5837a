//! DOM listeners feeding the engine: window resize, pointer movement and
//! the first touch of touch gestures.

use std::cell::RefCell;
use std::rc::Rc;

use halo_core::{Engine, ResizeRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;
use crate::render::GpuRenderer;

/// A registered event listener; dropping it removes the listener.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

type SharedEngine = Rc<RefCell<Engine<GpuRenderer>>>;

fn project(engine: &SharedEngine, canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) {
    let (x, y) = dom::to_canvas_coords(canvas, client_x, client_y);
    // A listener can fire while the frame callback holds the engine; the
    // next move will land instead.
    if let Ok(mut engine) = engine.try_borrow_mut() {
        engine.pointer_moved(x, y);
    }
}

pub fn wire(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    engine: &SharedEngine,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::with_capacity(4);

    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        listeners.push(Listener::attach(window, "resize", move |_ev| {
            let (width, height) = dom::css_size(&canvas);
            let request = ResizeRequest {
                width,
                height,
                device_pixel_ratio: dom::device_pixel_ratio(),
            };
            if let Ok(mut engine) = engine.try_borrow_mut() {
                engine.request_resize(request, dom::now_ms());
            }
        })?);
    }

    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        listeners.push(Listener::attach(window, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                project(&engine, &canvas, ev.client_x() as f32, ev.client_y() as f32);
            }
        })?);
    }

    for kind in ["touchstart", "touchmove"] {
        let engine = engine.clone();
        let canvas = canvas.clone();
        listeners.push(Listener::attach(window, kind, move |ev| {
            let Some(touch) = ev
                .dyn_ref::<web::TouchEvent>()
                .and_then(|t| t.touches().get(0))
            else {
                return;
            };
            project(&engine, &canvas, touch.client_x() as f32, touch.client_y() as f32);
        })?);
    }

    log::info!("[events] {} listeners attached", listeners.len());
    Ok(listeners)
}
