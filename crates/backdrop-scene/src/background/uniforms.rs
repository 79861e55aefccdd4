use crate::scene::FrameView;

/// Distance over which grid lines fade into the clear color
pub const GRID_FADE_DISTANCE: f32 = 400.0;

/// Uniform block shared by the grid and particle shaders
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub grid_model: [[f32; 4]; 4],
    pub cloud_model: [[f32; 4]; 4],
    /// x: point size, y: time, z: grid fade distance, w: unused
    pub params: [f32; 4],
}

impl SceneUniforms {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        Self {
            projection: frame.projection.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            grid_model: frame.grid_model.to_cols_array_2d(),
            cloud_model: frame.cloud_model.to_cols_array_2d(),
            params: [frame.point_size, frame.time, GRID_FADE_DISTANCE, 0.0],
        }
    }
}

impl Default for SceneUniforms {
    fn default() -> Self {
        let identity = glam::Mat4::IDENTITY.to_cols_array_2d();
        Self {
            projection: identity,
            view: identity,
            grid_model: identity,
            cloud_model: identity,
            params: [1.0, 0.0, GRID_FADE_DISTANCE, 0.0],
        }
    }
}
