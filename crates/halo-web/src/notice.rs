use web_sys as web;

const NOTICE_ID: &str = "gfx-notice";
const NO_3D_CLASS: &str = "no-webgpu";

/// Reveal the "3D unavailable" notice and mark the document so page styles
/// can drop the canvas. Page interactions are untouched.
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(NOTICE_ID) {
        let _ = el.set_attribute("style", "");
    }
    if let Some(root) = document.document_element() {
        let _ = root.class_list().add_1(NO_3D_CLASS);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(NOTICE_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}
