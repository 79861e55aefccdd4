//! Browser entry point for the Backdrop animated background
//!
//! Locates the canvas, creates the wgpu renderer, drives it from
//! `requestAnimationFrame` and feeds it resize and pointer events. When the
//! graphics context cannot be created a fixed banner is shown instead.
//!
//! ```js
//! import init, { start_backdrop, install_page_shell } from "./pkg/backdrop_web.js";
//!
//! await init();
//! install_page_shell();
//! const backdrop = await start_backdrop();
//! console.log(backdrop.state());
//! ```

mod constants;
mod dom;
mod events;
mod frame_loop;
mod host;
mod page;
mod runtime;
mod util;

use backdrop_scene::{BackdropController, InitOutcome, SceneConfig};
use wasm_bindgen::prelude::*;

pub use constants::FALLBACK_BANNER_ID;
pub use page::{anchor_target_id, install_page_shell};

use crate::host::WebHost;
use crate::runtime::{Runtime, SharedRuntime};
use crate::util::log;

const BUSY: &str = "busy";

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start the animated background
///
/// `canvas_id` overrides the configured element id. `config_json` is a
/// (partial) scene configuration; missing fields take their defaults.
///
/// Resolves to a [`Backdrop`] handle in every case except malformed
/// configuration. A missing canvas leaves it uninitialized; a failed
/// graphics context leaves it failed with the fallback banner shown.
#[wasm_bindgen]
pub async fn start_backdrop(
    canvas_id: Option<String>,
    config_json: Option<String>,
) -> Result<Backdrop, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let mut config = match config_json {
        Some(json) => SceneConfig::from_json(&json).map_err(to_js)?,
        None => SceneConfig::default(),
    };
    if let Some(id) = canvas_id {
        config.canvas_id = id;
    }

    let mut host = WebHost::new()?;
    let mut controller = BackdropController::new(config);
    let outcome = controller.init(&mut host).await.map_err(to_js)?;

    let window = host.window().clone();
    let runtime = Runtime::new(controller, host).into_shared();
    match outcome {
        InitOutcome::Started => {
            frame_loop::install(&runtime, &window);
            events::install(&runtime, &window)?;
            log("[backdrop] Background running");
        }
        InitOutcome::SurfaceMissing => log("[backdrop] No canvas, background disabled"),
        InitOutcome::Fallback => log("[backdrop] Graphics unavailable, fallback shown"),
    }

    Ok(Backdrop { runtime })
}

/// Handle to a started background
#[wasm_bindgen]
pub struct Backdrop {
    runtime: SharedRuntime,
}

impl Backdrop {
    /// Read the runtime, failing while a frame or listener holds it
    fn read<T>(&self, f: impl FnOnce(&Runtime) -> T) -> Result<T, JsValue> {
        let runtime = self
            .runtime
            .try_borrow()
            .map_err(|_| JsValue::from_str(BUSY))?;
        Ok(f(&runtime))
    }
}

#[wasm_bindgen]
impl Backdrop {
    /// Lifecycle state: "uninitialized", "running", "failed" or "stopped",
    /// or "busy" while the runtime is borrowed
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.read(|runtime| runtime.controller.lifecycle().id())
            .unwrap_or(BUSY)
            .to_string()
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> Result<bool, JsValue> {
        self.read(|runtime| runtime.controller.is_running())
    }

    /// Stop the animation loop and release GPU resources
    #[wasm_bindgen]
    pub fn stop(&self) -> Result<(), JsValue> {
        let mut runtime = self
            .runtime
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str(BUSY))?;
        runtime.stop().map_err(to_js)
    }

    /// Number of particles in the running scene, 0 otherwise
    #[wasm_bindgen]
    pub fn particle_count(&self) -> Result<usize, JsValue> {
        self.read(|runtime| {
            runtime
                .controller
                .scene()
                .map_or(0, |scene| scene.cloud.count())
        })
    }

    /// Frames drawn since start
    #[wasm_bindgen]
    pub fn frames_rendered(&self) -> Result<f64, JsValue> {
        self.read(|runtime| runtime.controller.frames_rendered() as f64)
    }

    /// Effective scene configuration as JSON
    #[wasm_bindgen]
    pub fn config(&self) -> Result<String, JsValue> {
        self.read(|runtime| serde_json::to_string(runtime.controller.config()))?
            .map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn uninitialized_backdrop() -> Backdrop {
        let host = WebHost::new().unwrap();
        let controller = BackdropController::new(SceneConfig::default());
        Backdrop {
            runtime: Runtime::new(controller, host).into_shared(),
        }
    }

    #[wasm_bindgen_test]
    fn test_borrowed_runtime_reads_as_busy() {
        let backdrop = uninitialized_backdrop();
        assert_eq!(backdrop.state(), "uninitialized");
        assert!(!backdrop.is_running().unwrap());

        let held = backdrop.runtime.borrow_mut();
        assert_eq!(backdrop.state(), "busy");
        assert!(backdrop.is_running().is_err());
        assert!(backdrop.particle_count().is_err());
        assert!(backdrop.stop().is_err());
        drop(held);

        assert_eq!(backdrop.state(), "uninitialized");
    }
}
