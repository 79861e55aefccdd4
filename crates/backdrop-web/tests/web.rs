//! Browser tests, run with `wasm-pack test --headless --firefox`

use backdrop_web::{anchor_target_id, install_page_shell, start_backdrop, FALLBACK_BANNER_ID};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, PageTransitionEvent, PageTransitionEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(document: &Document, tag: &str, id: &str) -> web_sys::Element {
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
async fn test_missing_canvas_leaves_backdrop_uninitialized() {
    let backdrop = start_backdrop(Some("no-such-canvas".to_string()), None)
        .await
        .unwrap();

    assert_eq!(backdrop.state(), "uninitialized");
    assert!(!backdrop.is_running().unwrap());
    assert_eq!(backdrop.particle_count().unwrap(), 0);
    assert!(document().get_element_by_id(FALLBACK_BANNER_ID).is_none());
}

#[wasm_bindgen_test]
async fn test_non_canvas_element_counts_as_missing() {
    let document = document();
    let div = append(&document, "div", "not-a-canvas");

    let backdrop = start_backdrop(Some("not-a-canvas".to_string()), None)
        .await
        .unwrap();
    assert_eq!(backdrop.state(), "uninitialized");

    div.remove();
}

#[wasm_bindgen_test]
async fn test_malformed_config_is_rejected() {
    let result = start_backdrop(None, Some("{ not json".to_string())).await;
    assert!(result.is_err());

    let result = start_backdrop(None, Some(r#"{"particles":{"count":0}}"#.to_string())).await;
    assert!(result.is_err());
}

#[wasm_bindgen_test]
async fn test_stop_before_start_is_rejected() {
    let backdrop = start_backdrop(Some("still-missing".to_string()), None)
        .await
        .unwrap();
    assert!(backdrop.stop().is_err());
    assert_eq!(backdrop.state(), "uninitialized");
}

fn dispatch_page_transition(event: &str, persisted: bool) {
    let init = PageTransitionEventInit::new();
    init.set_persisted(persisted);
    let event = PageTransitionEvent::new_with_event_init_dict(event, &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
async fn test_cached_page_hide_keeps_backdrop_running() {
    let document = document();
    let canvas = append(&document, "canvas", "cached-canvas");

    let backdrop = start_backdrop(Some("cached-canvas".to_string()), None)
        .await
        .unwrap();
    if backdrop.state() != "running" {
        // No graphics adapter in this browser; the fallback path is covered elsewhere
        canvas.remove();
        return;
    }

    dispatch_page_transition("pagehide", true);
    assert_eq!(backdrop.state(), "running");
    assert!(backdrop.is_running().unwrap());

    dispatch_page_transition("pageshow", true);
    assert_eq!(backdrop.state(), "running");

    dispatch_page_transition("pagehide", false);
    assert_eq!(backdrop.state(), "stopped");
    assert!(backdrop.stop().is_err());

    canvas.remove();
}

#[wasm_bindgen_test]
async fn test_config_reports_canvas_override() {
    let backdrop = start_backdrop(Some("custom-id".to_string()), None)
        .await
        .unwrap();
    let config: serde_json::Value = serde_json::from_str(&backdrop.config().unwrap()).unwrap();
    assert_eq!(config["canvas_id"], "custom-id");
}

#[wasm_bindgen_test]
fn test_page_shell_stamps_year() {
    let document = document();
    let footer = append(&document, "span", "footer-year");
    footer.set_attribute("data-current-year", "").unwrap();

    install_page_shell().unwrap();

    let year = js_sys::Date::new_0().get_full_year().to_string();
    assert_eq!(footer.text_content().unwrap(), year);
    footer.remove();
}

#[wasm_bindgen_test]
fn test_nav_toggle_opens_menu() {
    let document = document();
    let button = append(&document, "button", "nav-button");
    button.set_attribute("data-nav-toggle", "").unwrap();
    let menu = append(&document, "ul", "nav-menu");
    menu.set_attribute("data-nav-menu", "").unwrap();

    install_page_shell().unwrap();

    let button: HtmlElement = button.dyn_into().unwrap();
    button.click();
    assert!(menu.class_list().contains("is-open"));
    assert_eq!(button.get_attribute("aria-expanded").as_deref(), Some("true"));

    button.click();
    assert!(!menu.class_list().contains("is-open"));

    button.remove();
    menu.remove();
}

#[wasm_bindgen_test]
fn test_anchor_target_id_in_browser() {
    assert_eq!(anchor_target_id("#top"), Some("top"));
    assert_eq!(anchor_target_id("#"), None);
}
