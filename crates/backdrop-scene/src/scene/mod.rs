//! The background scene: camera, grid, particle cloud and pointer
//!
//! The scene is pure state. It knows nothing about the page or the GPU;
//! a [`GraphicsBackend`](crate::GraphicsBackend) reads it through a
//! [`FrameView`] every frame.

mod grid;
mod particles;
mod pointer;

pub use grid::{Grid, LineVertex};
pub use particles::ParticleCloud;
pub use pointer::PointerState;

use glam::Mat4;
use rand::Rng;

use crate::config::{HexColor, SceneConfig};
use crate::math::PerspectiveCamera;

/// Everything a backend needs to draw one frame
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub projection: Mat4,
    pub view: Mat4,
    pub view_projection: Mat4,
    pub grid_model: Mat4,
    pub cloud_model: Mat4,
    /// Flat particle positions, `3 * count` floats
    pub positions: &'a [f32],
    /// Whether `positions` changed since the last upload
    pub positions_dirty: bool,
    pub point_size: f32,
    pub time: f32,
}

/// Camera, grid, particle cloud and pointer of one background
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub grid: Grid,
    pub cloud: ParticleCloud,
    pub pointer: PointerState,
    smoothing: f32,
    cloud_sway: f32,
    grid_sway: f32,
    clear_color: HexColor,
    time: f32,
}

impl Scene {
    /// Build the scene for a surface of the given aspect ratio
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, aspect: f32, rng: &mut R) -> Self {
        Self {
            camera: PerspectiveCamera::new(&config.camera, aspect),
            grid: Grid::new(&config.grid),
            cloud: ParticleCloud::new(&config.particles, rng),
            pointer: PointerState::new(),
            smoothing: config.pointer.smoothing,
            cloud_sway: config.pointer.cloud_sway,
            grid_sway: config.grid.sway,
            clear_color: config.clear_color,
            time: 0.0,
        }
    }

    /// Run one frame of the update rules at wall-clock `time` (seconds)
    pub fn update(&mut self, time: f32) {
        self.time = time;

        self.pointer.relax(self.smoothing);
        let offset = self.pointer.current();

        self.cloud
            .set_rotation(offset.y * self.cloud_sway, offset.x * self.cloud_sway);
        self.grid.set_sway(offset.x * self.grid_sway);

        self.grid.advance();
        self.cloud.advance(time);
    }

    /// Adopt a new viewport size; the grid and particles are untouched
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Record a pointer position in viewport pixels as the new target
    pub fn pointer_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.pointer.set_target_from_position(x, y, width, height);
    }

    /// Background color behind the grid and particles
    #[inline]
    pub fn clear_color(&self) -> HexColor {
        self.clear_color
    }

    /// Borrow the state a backend needs to draw this frame
    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            projection: self.camera.projection(),
            view: self.camera.view(),
            view_projection: self.camera.view_projection(),
            grid_model: self.grid.model_matrix(),
            cloud_model: self.cloud.model_matrix(),
            positions: self.cloud.positions(),
            positions_dirty: self.cloud.needs_upload(),
            point_size: self.cloud.size(),
            time: self.time,
        }
    }
}
