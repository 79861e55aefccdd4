//! Perspective camera for the background scene

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera looking down the negative depth axis
///
/// The projection matrix is cached and only recomputed through
/// [`PerspectiveCamera::update_projection`], so callers changing the aspect
/// ratio must refresh it before the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height of the drawing surface
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Position along the depth axis
    pub depth: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    /// Create a camera from config with an initial aspect ratio
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            fov_y: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
            depth: config.depth,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Set the aspect ratio from a viewport size and refresh the projection
    ///
    /// Degenerate sizes leave the camera unchanged.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.aspect = width / height;
        self.update_projection();
    }

    /// Recompute the cached projection matrix from the current parameters
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
    }

    /// Cached projection matrix
    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.depth))
    }

    /// Combined projection * view
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}
