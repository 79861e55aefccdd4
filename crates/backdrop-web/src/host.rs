//! Browser implementation of the controller's host seam

use backdrop_scene::background::BackgroundRenderer;
use backdrop_scene::{BackdropError, Host, PhysicalSize, ViewportSize};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::dom;
use crate::frame_loop::FrameScheduler;
use crate::util::{describe, log, warn};

/// Host backed by the page's window and document
pub struct WebHost {
    window: Window,
    document: Document,
    pub(crate) frames: FrameScheduler,
}

impl WebHost {
    pub fn new() -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        Ok(Self {
            window,
            document,
            frames: FrameScheduler::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Host for WebHost {
    type Surface = HtmlCanvasElement;
    type Backend = BackgroundRenderer;

    fn locate_surface(&mut self, element_id: &str) -> Option<HtmlCanvasElement> {
        dom::find_canvas(&self.document, element_id)
    }

    fn viewport(&self) -> ViewportSize {
        dom::viewport_size(&self.window)
    }

    async fn create_backend(
        &mut self,
        canvas: HtmlCanvasElement,
        size: PhysicalSize,
    ) -> Result<BackgroundRenderer, BackdropError> {
        log("[backdrop] Initializing graphics context...");
        BackgroundRenderer::new(canvas, size).await
    }

    fn show_fallback(&mut self, message: &str) {
        if let Err(e) = dom::show_banner(&self.document, message) {
            warn(&format!("[backdrop] Failed to show fallback banner: {}", describe(&e)));
        }
    }

    fn request_frame(&mut self) {
        self.frames.request(&self.window);
    }

    fn cancel_frame(&mut self) {
        self.frames.cancel(&self.window);
    }

    fn diagnostic(&mut self, message: &str) {
        log(&format!("[backdrop] {}", message));
    }
}
