//! Shared state reached by the frame loop and event listeners

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_scene::background::BackgroundRenderer;
use backdrop_scene::{BackdropController, BackdropError, Host};

use crate::events::EventListener;
use crate::host::WebHost;

pub type SharedRuntime = Rc<RefCell<Runtime>>;

/// Controller, host and the listeners registered for them
pub struct Runtime {
    pub controller: BackdropController<BackgroundRenderer>,
    pub host: WebHost,
    pub listeners: Vec<EventListener>,
}

impl Runtime {
    pub fn new(controller: BackdropController<BackgroundRenderer>, host: WebHost) -> Self {
        Self {
            controller,
            host,
            listeners: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedRuntime {
        Rc::new(RefCell::new(self))
    }

    /// One animation frame at `time_seconds`
    pub fn tick(&mut self, time_seconds: f64) {
        self.host.frames.fired();
        self.controller.frame(&mut self.host, time_seconds);
    }

    pub fn resize(&mut self) {
        let viewport = self.host.viewport();
        self.controller.resize(viewport);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.controller.pointer_moved(x, y);
    }

    /// Pause the loop while the page sits in the back/forward cache
    pub fn suspend(&mut self) {
        self.controller.suspend(&mut self.host);
    }

    /// Re-arm the loop when the page is shown again
    pub fn resume(&mut self) {
        self.controller.resume(&mut self.host);
    }

    /// Stop the loop, detach listeners and release the tick callback
    pub fn stop(&mut self) -> Result<(), BackdropError> {
        self.controller.stop(&mut self.host)?;
        for listener in &self.listeners {
            listener.detach();
        }
        // The callback is not running here: stop is reached from listeners
        // and the JS handle, never from the tick itself
        drop(self.host.frames.release());
        Ok(())
    }
}
