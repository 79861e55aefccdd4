//! In-memory host and backend for testing the controller.
//!
//! Records every banner, frame request, diagnostic and draw so tests can
//! assert on the controller's side effects without a browser or a GPU.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Mat4;

use crate::error::BackdropError;
use crate::host::{GraphicsBackend, Host};
use crate::scene::{FrameView, Scene};
use crate::surface::{PhysicalSize, ViewportSize};

/// Handle standing in for a located drawing element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockSurface {
    pub id: String,
}

/// Backend that records what it was asked to draw
#[derive(Debug)]
pub struct RecordingBackend {
    draws: Rc<Cell<usize>>,
    size: PhysicalSize,
    resizes: usize,
    uploads: usize,
    particle_count: Option<usize>,
    grid_vertex_count: Option<usize>,
    last_view_projection: Option<Mat4>,
    last_positions: Vec<f32>,
    scripted_errors: VecDeque<BackdropError>,
}

impl RecordingBackend {
    /// Current backing store size
    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    /// Number of resize calls received
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Number of position uploads performed
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Particle count of the loaded scene
    pub fn particle_count(&self) -> Option<usize> {
        self.particle_count
    }

    /// Grid vertex count of the loaded scene
    pub fn grid_vertex_count(&self) -> Option<usize> {
        self.grid_vertex_count
    }

    /// View-projection matrix of the last drawn frame
    pub fn last_view_projection(&self) -> Option<Mat4> {
        self.last_view_projection
    }

    /// Positions uploaded most recently
    pub fn last_positions(&self) -> &[f32] {
        &self.last_positions
    }
}

impl GraphicsBackend for RecordingBackend {
    fn load_scene(&mut self, scene: &Scene) {
        self.particle_count = Some(scene.cloud.count());
        self.grid_vertex_count = Some(scene.grid.line_vertices().len());
        self.last_positions = scene.cloud.positions().to_vec();
    }

    fn resize(&mut self, size: PhysicalSize) {
        self.size = size;
        self.resizes += 1;
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), BackdropError> {
        if frame.positions_dirty {
            self.last_positions.clear();
            self.last_positions.extend_from_slice(frame.positions);
            self.uploads += 1;
        }
        if let Some(err) = self.scripted_errors.pop_front() {
            return Err(err);
        }
        self.last_view_projection = Some(frame.view_projection);
        self.draws.set(self.draws.get() + 1);
        Ok(())
    }
}

/// Mock host for unit and integration tests
#[derive(Debug)]
pub struct MockHost {
    surface_present: bool,
    backend_failure: Option<String>,
    viewport: ViewportSize,
    scripted_draw_errors: Vec<BackdropError>,
    banners: Vec<String>,
    frame_requests: usize,
    pending_frame: bool,
    cancelled_frames: usize,
    backends_created: usize,
    diagnostics: Vec<String>,
    draws: Rc<Cell<usize>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Host with a drawing element and a working backend, 1280x720 at 1x
    pub fn new() -> Self {
        Self {
            surface_present: true,
            backend_failure: None,
            viewport: ViewportSize::new(1280.0, 720.0, 1.0),
            scripted_draw_errors: Vec::new(),
            banners: Vec::new(),
            frame_requests: 0,
            pending_frame: false,
            cancelled_frames: 0,
            backends_created: 0,
            diagnostics: Vec::new(),
            draws: Rc::new(Cell::new(0)),
        }
    }

    /// Host whose page has no drawing element
    pub fn without_surface() -> Self {
        Self {
            surface_present: false,
            ..Self::new()
        }
    }

    /// Host whose backend creation fails with `reason`
    pub fn with_backend_failure(reason: &str) -> Self {
        Self {
            backend_failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    /// Use a specific viewport
    pub fn with_viewport(mut self, viewport: ViewportSize) -> Self {
        self.viewport = viewport;
        self
    }

    /// Make the next backend's draws fail with these errors, in order
    pub fn with_draw_errors(mut self, errors: Vec<BackdropError>) -> Self {
        self.scripted_draw_errors = errors;
        self
    }

    /// Change the viewport reported from now on
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    /// Consume a pending frame request, as the platform would when it
    /// fires the callback
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::replace(&mut self.pending_frame, false)
    }

    pub fn banners(&self) -> &[String] {
        &self.banners
    }

    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame
    }

    pub fn cancelled_frames(&self) -> usize {
        self.cancelled_frames
    }

    pub fn backends_created(&self) -> usize {
        self.backends_created
    }

    pub fn draw_count(&self) -> usize {
        self.draws.get()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Check if a specific diagnostic was emitted
    pub fn has_diagnostic_containing(&self, substr: &str) -> bool {
        self.diagnostics.iter().any(|msg| msg.contains(substr))
    }
}

impl Host for MockHost {
    type Surface = MockSurface;
    type Backend = RecordingBackend;

    fn locate_surface(&mut self, element_id: &str) -> Option<MockSurface> {
        self.surface_present.then(|| MockSurface {
            id: element_id.to_string(),
        })
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    async fn create_backend(
        &mut self,
        _surface: MockSurface,
        size: PhysicalSize,
    ) -> Result<RecordingBackend, BackdropError> {
        if let Some(reason) = &self.backend_failure {
            return Err(BackdropError::GraphicsInit(reason.clone()));
        }
        self.backends_created += 1;
        Ok(RecordingBackend {
            draws: Rc::clone(&self.draws),
            size,
            resizes: 0,
            uploads: 0,
            particle_count: None,
            grid_vertex_count: None,
            last_view_projection: None,
            last_positions: Vec::new(),
            scripted_errors: std::mem::take(&mut self.scripted_draw_errors).into(),
        })
    }

    fn show_fallback(&mut self, message: &str) {
        self.banners.push(message.to_string());
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
        self.pending_frame = true;
    }

    fn cancel_frame(&mut self) {
        if std::mem::replace(&mut self.pending_frame, false) {
            self.cancelled_frames += 1;
        }
    }

    fn diagnostic(&mut self, message: &str) {
        self.diagnostics.push(message.to_string());
    }
}
