//! Animated background scene for the Backdrop page runtime
//!
//! This crate provides the decorative background that sits behind the
//! page content: a receding wireframe grid and a drifting particle cloud,
//! rotated by a smoothed pointer offset.
//!
//! ## Architecture
//!
//! - [`config`]: Named constants and the serde-backed [`SceneConfig`]
//! - [`math`]: Perspective camera and wrap bands (matrices from `glam`)
//! - [`scene`]: Grid, particle cloud, pointer state and per-frame rules
//! - [`BackdropController`]: Lifecycle state machine owning the renderer context
//! - [`Host`] / [`GraphicsBackend`]: Platform seams implemented by the browser crate
//! - [`testing`]: Mock host and recording backend
//! - `background` (feature `wasm`): wgpu renderer for browser canvases
//!
//! ## Example
//!
//! ```rust
//! use backdrop_scene::testing::MockHost;
//! use backdrop_scene::{BackdropController, InitOutcome, SceneConfig};
//!
//! let mut host = MockHost::new();
//! let mut controller = BackdropController::new(SceneConfig::default());
//! let outcome = pollster::block_on(controller.init(&mut host)).unwrap();
//! assert_eq!(outcome, InitOutcome::Started);
//!
//! while host.take_frame_request() && controller.frames_rendered() < 3 {
//!     let now = controller.frames_rendered() as f64 / 60.0;
//!     controller.frame(&mut host, now);
//! }
//! assert_eq!(host.draw_count(), 3);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: all scene state is testable without a browser
//! 2. **Time Abstraction**: frames receive the clock from the caller
//! 3. **Flat Buffers**: particles live in contiguous `Vec<f32>` buffers,
//!    never as per-particle objects

pub mod config;
pub mod math;
pub mod scene;
pub mod testing;

mod controller;
mod error;
mod host;
mod lifecycle;
mod surface;

// Background renderer (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod background;

pub use config::{HexColor, SceneConfig, CANVAS_ELEMENT_ID, FALLBACK_MESSAGE};
pub use controller::{BackdropController, InitOutcome};
pub use error::{BackdropError, ConfigError};
pub use host::{GraphicsBackend, Host};
pub use lifecycle::LifecycleState;
pub use math::{PerspectiveCamera, WrapBand};
pub use scene::{FrameView, Grid, LineVertex, ParticleCloud, PointerState, Scene};
pub use surface::{PhysicalSize, Surface, ViewportSize};
