use halo_core::PerfSample;
use web_sys as web;

const HUD_ID: &str = "perf-hud";

/// Write `sample` into the `#perf-hud` element, if the page has one.
pub fn write(document: &web::Document, sample: &PerfSample) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        el.set_text_content(Some(&sample.to_string()));
    }
}
