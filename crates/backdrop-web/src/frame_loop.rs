//! requestAnimationFrame scheduling
//!
//! The tick closure is created once and re-armed after every frame the
//! controller asks for. It holds only a weak reference to the runtime.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::runtime::SharedRuntime;
use crate::util::{describe, warn};

/// Owns the tick callback and the id of the pending animation frame
#[derive(Default)]
pub struct FrameScheduler {
    callback: Option<Closure<dyn FnMut(f64)>>,
    handle: Option<i32>,
    wanted: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tick callback; a request made before this is honored now
    pub fn attach(&mut self, window: &Window, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
        if self.wanted {
            self.arm(window);
        }
    }

    /// Ask for exactly one more frame
    pub fn request(&mut self, window: &Window) {
        self.wanted = true;
        self.arm(window);
    }

    /// The pending frame is being delivered
    pub fn fired(&mut self) {
        self.handle = None;
    }

    /// Cancel the pending frame, if any
    pub fn cancel(&mut self, window: &Window) {
        self.wanted = false;
        if let Some(handle) = self.handle.take() {
            if let Err(e) = window.cancel_animation_frame(handle) {
                warn(&format!("[backdrop] cancelAnimationFrame failed: {}", describe(&e)));
            }
        }
    }

    /// Drop the tick callback; no frame can be scheduled afterwards
    pub fn release(&mut self) -> Option<Closure<dyn FnMut(f64)>> {
        self.callback.take()
    }

    fn arm(&mut self, window: &Window) {
        let Some(callback) = &self.callback else {
            return;
        };
        if self.handle.is_some() {
            return;
        }
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.wanted = false;
            }
            Err(e) => warn(&format!(
                "[backdrop] requestAnimationFrame failed: {}",
                describe(&e)
            )),
        }
    }
}

/// Create the tick closure and hand it to the runtime's scheduler
pub fn install(runtime: &SharedRuntime, window: &Window) {
    let weak = Rc::downgrade(runtime);
    let tick = Closure::wrap(Box::new(move |timestamp: f64| {
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        let Ok(mut runtime) = runtime.try_borrow_mut() else {
            return;
        };
        runtime.tick(timestamp / 1000.0);
    }) as Box<dyn FnMut(f64)>);

    if let Ok(mut runtime) = runtime.try_borrow_mut() {
        runtime.host.frames.attach(window, tick);
    }
}
