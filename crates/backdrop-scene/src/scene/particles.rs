//! Drifting particle cloud

use glam::{Mat4, Quat};
use rand::Rng;

use crate::config::ParticleConfig;
use crate::math::WrapBand;

/// Fixed-size cloud of point samples backed by flat buffers
///
/// `positions` and `colors` each hold `3 * count` floats for the lifetime
/// of the cloud. There is no operation that grows or shrinks them.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
    z_step: f32,
    z_band: WrapBand,
    wobble: f32,
    phase_spread: f32,
    size: f32,
    rotation_x: f32,
    rotation_y: f32,
    needs_upload: bool,
}

impl ParticleCloud {
    /// Spawn `config.count` particles uniformly inside a cube of side
    /// `config.spread` centered at the origin
    pub fn new<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        let count = config.count;
        let half = config.spread / 2.0;
        let primary = config.primary_color.to_rgb();
        let secondary = config.secondary_color.to_rgb();

        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        for i in 0..count {
            for _ in 0..3 {
                positions.push(rng.gen_range(-half..=half));
            }
            let color = if i % 2 == 0 { primary } else { secondary };
            colors.extend_from_slice(&color);
        }

        Self {
            positions,
            colors,
            z_step: config.z_step,
            z_band: config.z_band,
            wobble: config.wobble,
            phase_spread: config.phase_spread,
            size: config.size,
            rotation_x: 0.0,
            rotation_y: 0.0,
            needs_upload: true,
        }
    }

    /// Number of particles
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Flat `[x, y, z, x, y, z, ...]` positions
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, ...]` sRGB colors
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Rendered point size in world units
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Advance every particle one frame at wall-clock `time` (seconds)
    ///
    /// X and Y receive an oscillation seeded by the particle index so the
    /// field desynchronizes; Z drifts forward and wraps within the band.
    pub fn advance(&mut self, time: f32) {
        let z_band = self.z_band;
        for (i, p) in self.positions.chunks_exact_mut(3).enumerate() {
            let phase = time + i as f32 * self.phase_spread;
            p[0] += phase.sin() * self.wobble;
            p[1] += phase.cos() * self.wobble;
            p[2] = z_band.advance(p[2], self.z_step);
        }
        self.needs_upload = true;
    }

    /// Orientation driven by the smoothed pointer
    #[inline]
    pub fn set_rotation(&mut self, x: f32, y: f32) {
        self.rotation_x = x;
        self.rotation_y = y;
    }

    #[inline]
    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }

    /// Model transform applying the X rotation, then the Y rotation
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_rotation_x(self.rotation_x) * Quat::from_rotation_y(self.rotation_y))
    }

    /// Whether positions changed since the backend last consumed them
    #[inline]
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Record that the backend has the current positions
    #[inline]
    pub fn mark_uploaded(&mut self) {
        self.needs_upload = false;
    }
}
