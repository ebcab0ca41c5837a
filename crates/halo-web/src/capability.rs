use wasm_bindgen::JsValue;
use web_sys as web;

/// Whether the browser exposes WebGPU (`navigator.gpu`).
pub fn webgpu_available() -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}
