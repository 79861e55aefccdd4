//! Page shell behaviours that ship next to the background
//!
//! Smooth in-page anchor scrolling, the mobile navigation toggle and the
//! footer year. None of these touch the renderer.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions};

use crate::constants::{
    ANCHOR_SELECTOR, EVENT_CLICK, NAV_MENU_SELECTOR, NAV_OPEN_CLASS, NAV_TOGGLE_SELECTOR,
    YEAR_SELECTOR,
};
use crate::dom;
use crate::events::EventListener;
use crate::util::{describe, log, warn};

/// Element id an in-page `href` points at, if any
///
/// `"#features"` yields `"features"`; a bare `"#"` and links to other pages
/// yield `None`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Install every page shell behaviour on the current document
#[wasm_bindgen]
pub fn install_page_shell() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    let anchors = install_smooth_anchors(&document)?;
    let toggles = install_nav_toggle(&document)?;
    let years = stamp_current_year(&document)?;

    log(&format!(
        "[page] Shell installed: {} anchors, {} nav toggles, {} year stamps",
        anchors, toggles, years
    ));
    Ok(())
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn install_smooth_anchors(document: &Document) -> Result<usize, JsValue> {
    let anchors = select_all(document, ANCHOR_SELECTOR)?;
    for anchor in &anchors {
        let document = document.clone();
        let link = anchor.clone();
        EventListener::listen(anchor, EVENT_CLICK, move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(target) = anchor_target_id(&href).and_then(|id| document.get_element_by_id(id))
            else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?
        .forget();
    }
    Ok(anchors.len())
}

fn install_nav_toggle(document: &Document) -> Result<usize, JsValue> {
    let toggles = select_all(document, NAV_TOGGLE_SELECTOR)?;
    for toggle in &toggles {
        let document = document.clone();
        let button = toggle.clone();
        EventListener::listen(toggle, EVENT_CLICK, move |_event| {
            let menu = match document.query_selector(NAV_MENU_SELECTOR) {
                Ok(Some(menu)) => menu,
                Ok(None) => return,
                Err(e) => {
                    warn(&format!("[page] Navigation menu lookup failed: {}", describe(&e)));
                    return;
                }
            };
            match menu.class_list().toggle(NAV_OPEN_CLASS) {
                Ok(open) => {
                    let expanded = if open { "true" } else { "false" };
                    if let Err(e) = button.set_attribute("aria-expanded", expanded) {
                        warn(&format!("[page] Failed to set aria-expanded: {}", describe(&e)));
                    }
                }
                Err(e) => warn(&format!("[page] Failed to toggle navigation: {}", describe(&e))),
            }
        })?
        .forget();
    }
    Ok(toggles.len())
}

fn stamp_current_year(document: &Document) -> Result<usize, JsValue> {
    let year = js_sys::Date::new_0().get_full_year().to_string();
    let targets = select_all(document, YEAR_SELECTOR)?;
    for target in &targets {
        target.set_text_content(Some(&year));
    }
    Ok(targets.len())
}
