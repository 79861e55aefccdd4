//! Math types for the background scene
//!
//! Matrix and vector types come from `glam`; this module adds the camera
//! and the wrap band used by the scene's depth motion.

mod band;
mod camera;

pub use band::WrapBand;
pub use camera::PerspectiveCamera;
