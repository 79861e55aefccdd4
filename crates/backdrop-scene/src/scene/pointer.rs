//! Smoothed pointer offset

use glam::Vec2;

/// Pointer offset normalized to [-1, 1] per axis
///
/// Events only ever write `target`; `current` follows it through
/// [`PointerState::relax`], once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    target: Vec2,
    current: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target from a pointer position in viewport pixels
    ///
    /// The vertical axis is inverted so that moving down is negative.
    /// Degenerate viewports leave the target unchanged.
    pub fn set_target_from_position(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let nx = (x / width) * 2.0 - 1.0;
        let ny = -((y / height) * 2.0 - 1.0);
        self.target = Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Move `current` toward `target` by `factor` of the remaining distance
    #[inline]
    pub fn relax(&mut self, factor: f32) {
        self.current += (self.target - self.current) * factor;
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_normalization() {
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(0.0, 0.0, 800.0, 600.0);
        assert_eq!(pointer.target(), Vec2::new(-1.0, 1.0));

        pointer.set_target_from_position(800.0, 600.0, 800.0, 600.0);
        assert_eq!(pointer.target(), Vec2::new(1.0, -1.0));

        pointer.set_target_from_position(400.0, 300.0, 800.0, 600.0);
        assert_eq!(pointer.target(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_event_leaves_current_untouched() {
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(800.0, 0.0, 800.0, 600.0);
        assert_eq!(pointer.current(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_clamps_outside_viewport() {
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(-100.0, 900.0, 800.0, 600.0);
        assert_eq!(pointer.target(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_pointer_ignores_degenerate_viewport() {
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(10.0, 10.0, 0.0, 600.0);
        assert_eq!(pointer.target(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_relax_converges_geometrically() {
        let factor = 0.05;
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(800.0, 600.0, 800.0, 600.0);
        let target = pointer.target();
        let start = (pointer.current() - target).abs();

        for n in 1..=120 {
            pointer.relax(factor);
            let expected = start * (1.0 - factor).powi(n);
            let actual = (pointer.current() - target).abs();
            assert!((actual.x - expected.x).abs() < 1e-5, "frame {n}");
            assert!((actual.y - expected.y).abs() < 1e-5, "frame {n}");
        }
    }

    #[test]
    fn test_pointer_relax_full_factor_snaps() {
        let mut pointer = PointerState::new();
        pointer.set_target_from_position(200.0, 150.0, 800.0, 600.0);
        pointer.relax(1.0);
        assert_eq!(pointer.current(), pointer.target());
    }
}
