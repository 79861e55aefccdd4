//! Receding wireframe grid

use glam::{Mat4, Quat, Vec3};

use crate::config::{GridConfig, HexColor};
use crate::math::WrapBand;

/// One endpoint of a grid line, laid out for direct upload as a vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "wasm", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Decorative grid plane, tilted toward the camera and drifting in depth
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    extent: f32,
    divisions: u32,
    center_color: HexColor,
    line_color: HexColor,
    tilt: f32,
    vertical_offset: f32,
    depth_step: f32,
    depth_band: WrapBand,
    depth_offset: f32,
    sway: f32,
}

impl Grid {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            extent: config.extent,
            divisions: config.divisions,
            center_color: config.center_color,
            line_color: config.line_color,
            tilt: config.tilt,
            vertical_offset: config.vertical_offset,
            depth_step: config.depth_step,
            depth_band: config.depth_band,
            depth_offset: config.depth_band.lower,
            sway: 0.0,
        }
    }

    /// Advance the depth offset one frame, wrapping within the band
    #[inline]
    pub fn advance(&mut self) {
        self.depth_offset = self.depth_band.advance(self.depth_offset, self.depth_step);
    }

    /// Secondary rotation about the vertical axis
    #[inline]
    pub fn set_sway(&mut self, radians: f32) {
        self.sway = radians;
    }

    #[inline]
    pub fn depth_offset(&self) -> f32 {
        self.depth_offset
    }

    #[inline]
    pub fn depth_band(&self) -> WrapBand {
        self.depth_band
    }

    #[inline]
    pub fn sway(&self) -> f32 {
        self.sway
    }

    /// Number of lines per axis
    #[inline]
    pub fn lines_per_axis(&self) -> u32 {
        self.divisions + 1
    }

    /// Model transform: translate, then tilt about X, then sway about Y
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_rotation_x(self.tilt) * Quat::from_rotation_y(self.sway);
        Mat4::from_rotation_translation(
            rotation,
            Vec3::new(0.0, self.vertical_offset, self.depth_offset),
        )
    }

    /// Line-list geometry in the grid's local XZ plane
    ///
    /// The two lines through the origin take the center color, every other
    /// line the regular line color. Colors are sRGB.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let half = self.extent / 2.0;
        let step = self.extent / self.divisions as f32;
        let center_index = self.divisions / 2;
        let has_center = self.divisions % 2 == 0;

        let lines = self.lines_per_axis() as usize;
        let mut vertices = Vec::with_capacity(lines * 4);
        for i in 0..self.lines_per_axis() {
            let k = -half + i as f32 * step;
            let color = if has_center && i == center_index {
                self.center_color.to_rgb()
            } else {
                self.line_color.to_rgb()
            };

            vertices.push(LineVertex { position: [-half, 0.0, k], color });
            vertices.push(LineVertex { position: [half, 0.0, k], color });
            vertices.push(LineVertex { position: [k, 0.0, -half], color });
            vertices.push(LineVertex { position: [k, 0.0, half], color });
        }
        vertices
    }
}
