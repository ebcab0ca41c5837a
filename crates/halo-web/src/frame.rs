//! requestAnimationFrame driver for the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use halo_core::Engine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::hud;
use crate::render::GpuRenderer;

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_frame(slot: &RefCell<Option<FrameCallback>>) -> Option<i32> {
    let window = web::window()?;
    let slot = slot.borrow();
    let callback = slot.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// A running frame loop. Stopping cancels the pending frame and drops the
/// callback, breaking its self-reference.
pub struct FrameLoop {
    slot: Rc<RefCell<Option<FrameCallback>>>,
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}

pub fn start_loop(engine: Rc<RefCell<Engine<GpuRenderer>>>, document: web::Document) -> FrameLoop {
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let running = Rc::new(Cell::new(true));
    let pending = Rc::new(Cell::new(None));

    let slot_tick = slot.clone();
    let running_tick = running.clone();
    let pending_tick = pending.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        pending_tick.set(None);
        if !running_tick.get() {
            return;
        }
        if let Ok(mut engine) = engine.try_borrow_mut() {
            if let Some(sample) = engine.tick(timestamp).sample() {
                hud::write(&document, &sample);
            }
        }
        pending_tick.set(request_frame(&slot_tick));
    }) as Box<dyn FnMut(f64)>));

    pending.set(request_frame(&slot));
    FrameLoop {
        slot,
        running,
        pending,
    }
}
