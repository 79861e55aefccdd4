//! Window event listeners feeding the controller

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, PageTransitionEvent, Window};

use crate::constants::{EVENT_PAGE_HIDE, EVENT_PAGE_SHOW, EVENT_POINTER_MOVE, EVENT_RESIZE};
use crate::runtime::SharedRuntime;
use crate::util::{describe, log, warn};

/// A registered listener; keeps its closure alive until dropped
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Register `handler` for `event` on `target`
    pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Unregister from the target; the closure stays alive until drop
    pub fn detach(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            warn(&format!(
                "[backdrop] Failed to remove {} listener: {}",
                self.event,
                describe(&e)
            ));
        }
    }

    /// Leave the listener registered for the rest of the page session
    pub fn forget(self) {
        self.closure.forget();
    }
}

/// Register resize, pointer-move and page transition listeners on the window
pub fn install(runtime: &SharedRuntime, window: &Window) -> Result<(), JsValue> {
    let weak = Rc::downgrade(runtime);
    let on_resize = EventListener::listen(window, EVENT_RESIZE, move |_event| {
        if let Some(runtime) = weak.upgrade() {
            if let Ok(mut runtime) = runtime.try_borrow_mut() {
                runtime.resize();
            }
        }
    })?;

    let weak = Rc::downgrade(runtime);
    let on_pointer = EventListener::listen(window, EVENT_POINTER_MOVE, move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let (x, y) = (event.client_x() as f32, event.client_y() as f32);
        if let Some(runtime) = weak.upgrade() {
            if let Ok(mut runtime) = runtime.try_borrow_mut() {
                runtime.pointer_moved(x, y);
            }
        }
    })?;

    // A persisted page goes into the back/forward cache and may be shown
    // again, so it only pauses; anything else is torn down
    let weak = Rc::downgrade(runtime);
    let on_page_hide = EventListener::listen(window, EVENT_PAGE_HIDE, move |event| {
        let persisted = is_persisted(&event);
        if let Some(runtime) = weak.upgrade() {
            if let Ok(mut runtime) = runtime.try_borrow_mut() {
                if !runtime.controller.is_running() {
                    return;
                }
                if persisted {
                    runtime.suspend();
                } else if let Err(e) = runtime.stop() {
                    warn(&format!("[backdrop] Teardown failed: {}", e));
                }
            }
        }
    })?;

    let weak = Rc::downgrade(runtime);
    let on_page_show = EventListener::listen(window, EVENT_PAGE_SHOW, move |event| {
        if !is_persisted(&event) {
            return;
        }
        if let Some(runtime) = weak.upgrade() {
            if let Ok(mut runtime) = runtime.try_borrow_mut() {
                runtime.resume();
            }
        }
    })?;

    let mut runtime = runtime
        .try_borrow_mut()
        .map_err(|_| JsValue::from_str("runtime busy while installing listeners"))?;
    runtime
        .listeners
        .extend([on_resize, on_pointer, on_page_hide, on_page_show]);
    log("[backdrop] Listening for resize, pointer and page transition events");
    Ok(())
}

/// Whether a page transition event involves the back/forward cache
fn is_persisted(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(PageTransitionEvent::persisted)
}
