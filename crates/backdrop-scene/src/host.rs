//! Platform seams of the renderer
//!
//! [`BackdropController`](crate::BackdropController) never touches the page
//! or the GPU directly. It goes through a [`Host`] for everything the
//! platform provides, and through a [`GraphicsBackend`] for drawing. The
//! browser crate implements both on top of `web-sys` and `wgpu`; tests use
//! [`crate::testing::MockHost`].

use crate::error::BackdropError;
use crate::scene::{FrameView, Scene};
use crate::surface::{PhysicalSize, ViewportSize};

/// Graphics implementation that draws the scene
pub trait GraphicsBackend {
    /// Receive the freshly built scene (static geometry, colors, counts)
    fn load_scene(&mut self, scene: &Scene);

    /// Match the backing store to a new physical size
    fn resize(&mut self, size: PhysicalSize);

    /// Draw one frame; upload positions first when `frame.positions_dirty`
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), BackdropError>;
}

/// Platform services used by the controller
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Handle to the located drawing element
    type Surface;
    type Backend: GraphicsBackend;

    /// Find the drawing element by id
    fn locate_surface(&mut self, element_id: &str) -> Option<Self::Surface>;

    /// Current viewport size in CSS pixels, with the device pixel ratio
    fn viewport(&self) -> ViewportSize;

    /// Create the graphics backend on the located surface
    async fn create_backend(
        &mut self,
        surface: Self::Surface,
        size: PhysicalSize,
    ) -> Result<Self::Backend, BackdropError>;

    /// Show the fixed fallback banner with `message`
    fn show_fallback(&mut self, message: &str);

    /// Schedule one call of the per-frame callback
    fn request_frame(&mut self);

    /// Drop any frame callback scheduled but not yet run
    fn cancel_frame(&mut self);

    /// Emit a diagnostic message
    fn diagnostic(&mut self, message: &str);
}
