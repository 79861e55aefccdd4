//! wgpu renderer for the background scene
//!
//! Draws the grid as a line list and the particle cloud as instanced
//! camera-facing quads with additive blending. Targets WebGPU with a
//! WebGL2 fallback.

mod init;
mod render;
mod renderer;
mod shaders;
mod uniforms;

pub use renderer::BackgroundRenderer;
pub use uniforms::SceneUniforms;
