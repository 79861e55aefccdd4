mod grid;
mod particles;

pub use grid::SHADER_GRID;
pub use particles::SHADER_PARTICLES;
