//! DOM lookups and mutations used by the host

use backdrop_scene::ViewportSize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::constants::{FALLBACK_BANNER_ID, FALLBACK_BANNER_STYLE};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Find the canvas with `id`; an element of another kind counts as missing
pub fn find_canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Current CSS viewport size and device pixel ratio
pub fn viewport_size(window: &Window) -> ViewportSize {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    ViewportSize::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Insert the fallback banner at the top of the body
///
/// Does nothing when the banner is already present, so at most one banner
/// exists per page.
pub fn show_banner(document: &Document, message: &str) -> Result<(), JsValue> {
    if document.get_element_by_id(FALLBACK_BANNER_ID).is_some() {
        return Ok(());
    }

    let banner = document.create_element("div")?;
    banner.set_id(FALLBACK_BANNER_ID);
    banner.set_attribute("role", "alert")?;
    banner.set_attribute("style", FALLBACK_BANNER_STYLE)?;
    banner.set_text_content(Some(message));

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.insert_before(&banner, body.first_child().as_ref())?;
    Ok(())
}
