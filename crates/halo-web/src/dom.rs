use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn canvas_by_id(
    document: &web::Document,
    canvas_id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{canvas_id} is not a canvas: {:?}", e)))
}

/// Laid-out size of the canvas in CSS pixels.
pub fn css_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    (
        rect.width().round().max(0.0) as u32,
        rect.height().round().max(0.0) as u32,
    )
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio() as f32)
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps.
#[inline]
pub fn now_ms() -> f64 {
    instant::now()
}

/// Client coordinates relative to the canvas' top-left corner.
pub fn to_canvas_coords(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (client_x - rect.left() as f32, client_y - rect.top() as f32)
}

/// `performance.memory.usedJSHeapSize`, where the browser exposes it.
pub fn js_heap_used_bytes() -> Option<u64> {
    let performance = web::window()?.performance()?;
    let memory = js_sys::Reflect::get(&performance, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() || memory.is_null() {
        return None;
    }
    js_sys::Reflect::get(&memory, &JsValue::from_str("usedJSHeapSize"))
        .ok()?
        .as_f64()
        .map(|b| b as u64)
}
