#![cfg(target_arch = "wasm32")]
//! Browser host for the halo hero scene: WebGPU rendering on a page canvas,
//! DOM events and a requestAnimationFrame loop around [`halo_core::Engine`].

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use halo_core::{Engine, ViewportState};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod capability;
mod dom;
mod events;
mod frame;
mod hud;
mod notice;
pub mod render;

use render::GpuRenderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("halo-web loaded");
    Ok(())
}

/// A mounted hero scene. `dispose` stops the loop, detaches listeners and
/// releases GPU resources; calling it again does nothing.
#[wasm_bindgen]
pub struct HeroHandle {
    engine: Rc<RefCell<Engine<GpuRenderer>>>,
    frames: frame::FrameLoop,
    listeners: Vec<events::Listener>,
}

#[wasm_bindgen]
impl HeroHandle {
    pub fn dispose(&mut self) {
        self.frames.stop();
        self.listeners.clear();
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => {
                let report = engine.dispose();
                if !report.is_clean() {
                    log::warn!(
                        "[mount] {} of {} resources failed to release",
                        report.failures.len(),
                        report.attempted
                    );
                }
            }
            Err(_) => log::error!("[mount] engine busy during dispose"),
        }
    }

    /// Last telemetry line, e.g. `60 fps · 1200 tris · 42.3 MB`.
    #[wasm_bindgen(js_name = perfSummary)]
    pub fn perf_summary(&self) -> Option<String> {
        self.engine
            .try_borrow()
            .ok()
            .and_then(|e| e.latest_sample())
            .map(|s| s.to_string())
    }
}

impl Drop for HeroHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mount the hero scene on the canvas with id `canvas_id`. Rejects, after
/// revealing the page's fallback notice, when WebGPU is unavailable.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<HeroHandle, JsValue> {
    mount_on(&canvas_id).await.map_err(|e| {
        log::error!("[mount] {e:#}");
        JsValue::from_str(&format!("{e:#}"))
    })
}

async fn mount_on(canvas_id: &str) -> anyhow::Result<HeroHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if let Err(e) = halo_core::require_accelerated(&capability::webgpu_available) {
        notice::show(&document);
        return Err(e.into());
    }

    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let (width, height) = dom::css_size(&canvas);
    let viewport = ViewportState::new(width, height, dom::device_pixel_ratio())
        .context("canvas has no layout size")?;

    let renderer = match GpuRenderer::new(canvas.clone(), &viewport).await {
        Ok(r) => r,
        Err(e) => {
            notice::show(&document);
            return Err(e).context("WebGPU init");
        }
    };
    let mut engine = Engine::new(renderer, viewport, rand::random());
    engine.start()?;
    notice::hide(&document);

    let engine = Rc::new(RefCell::new(engine));
    let listeners = events::wire(&window, &canvas, &engine)
        .map_err(|e| anyhow::anyhow!(format!("listener error: {:?}", e)))?;
    let frames = frame::start_loop(engine.clone(), document);
    log::info!("[mount] hero scene running on #{canvas_id}");

    Ok(HeroHandle {
        engine,
        frames,
        listeners,
    })
}
