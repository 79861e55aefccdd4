//! Drawing surface metrics

/// Viewport size as reported by the page, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Whether the viewport has a drawable area
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Backing-store size in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Shrink proportionally so neither side exceeds `max_dimension`
    pub fn clamp_to(&self, max_dimension: u32) -> Self {
        let largest = self.width.max(self.height);
        if largest <= max_dimension || largest == 0 {
            return *self;
        }
        let scale = max_dimension as f64 / largest as f64;
        Self {
            width: ((self.width as f64 * scale).floor() as u32).clamp(1, max_dimension),
            height: ((self.height as f64 * scale).floor() as u32).clamp(1, max_dimension),
        }
    }
}

/// The single drawable target of the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    width: f32,
    height: f32,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl Surface {
    /// Create a surface for the given viewport, capping the pixel ratio
    pub fn new(viewport: ViewportSize, max_pixel_ratio: f32) -> Self {
        let mut surface = Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
            max_pixel_ratio,
        };
        surface.resize(viewport);
        surface
    }

    /// Adopt a new viewport size; empty viewports are ignored
    ///
    /// Returns true when the size changed.
    pub fn resize(&mut self, viewport: ViewportSize) -> bool {
        if viewport.is_empty() {
            return false;
        }
        let pixel_ratio = effective_pixel_ratio(viewport.pixel_ratio, self.max_pixel_ratio);
        let changed = self.width != viewport.width
            || self.height != viewport.height
            || self.pixel_ratio != pixel_ratio;
        self.width = viewport.width;
        self.height = viewport.height;
        self.pixel_ratio = pixel_ratio;
        changed
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Width / height in CSS pixels
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Size of the backing store in device pixels, at least 1x1
    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: ((self.width * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height * self.pixel_ratio).round() as u32).max(1),
        }
    }
}

fn effective_pixel_ratio(reported: f32, max: f32) -> f32 {
    if reported.is_finite() && reported > 0.0 {
        reported.min(max)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_physical_size() {
        let surface = Surface::new(ViewportSize::new(1280.0, 720.0, 1.5), 2.0);
        assert_eq!(surface.physical_size(), PhysicalSize::new(1920, 1080));
        assert_eq!(surface.aspect(), 1280.0 / 720.0);
    }

    #[test]
    fn test_surface_caps_pixel_ratio() {
        let surface = Surface::new(ViewportSize::new(1000.0, 500.0, 3.0), 2.0);
        assert_eq!(surface.pixel_ratio(), 2.0);
        assert_eq!(surface.physical_size(), PhysicalSize::new(2000, 1000));
    }

    #[test]
    fn test_surface_bad_pixel_ratio_defaults_to_one() {
        let surface = Surface::new(ViewportSize::new(640.0, 480.0, 0.0), 2.0);
        assert_eq!(surface.pixel_ratio(), 1.0);
        let surface = Surface::new(ViewportSize::new(640.0, 480.0, f32::NAN), 2.0);
        assert_eq!(surface.pixel_ratio(), 1.0);
    }

    #[test]
    fn test_surface_resize_reports_change() {
        let mut surface = Surface::new(ViewportSize::new(800.0, 600.0, 1.0), 2.0);
        assert!(!surface.resize(ViewportSize::new(800.0, 600.0, 1.0)));
        assert!(surface.resize(ViewportSize::new(1024.0, 768.0, 1.0)));
        assert_eq!(surface.width(), 1024.0);
        assert!(surface.resize(ViewportSize::new(1024.0, 768.0, 2.0)));
    }

    #[test]
    fn test_surface_ignores_empty_viewport() {
        let mut surface = Surface::new(ViewportSize::new(800.0, 600.0, 1.0), 2.0);
        assert!(!surface.resize(ViewportSize::new(0.0, 600.0, 1.0)));
        assert_eq!(surface.width(), 800.0);
    }

    #[test]
    fn test_physical_size_clamp() {
        let size = PhysicalSize::new(4096, 2048).clamp_to(2048);
        assert_eq!(size, PhysicalSize::new(2048, 1024));
        let size = PhysicalSize::new(800, 600).clamp_to(2048);
        assert_eq!(size, PhysicalSize::new(800, 600));
    }
}
