//! Scene configuration
//!
//! Every tunable of the background lives here as a named constant with its
//! reference range, and can be overridden through [`SceneConfig`] (usually
//! parsed from a JSON document handed over by the page).

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::WrapBand;

// =============================================================================
// Page integration
// =============================================================================

/// Element id of the drawing surface looked up at startup
pub const CANVAS_ELEMENT_ID: &str = "bg-canvas";

/// Text of the banner shown when the graphics backend cannot start
pub const FALLBACK_MESSAGE: &str =
    "Interactive background could not load. Your browser may not support WebGL.";

/// Upper bound applied to the device pixel ratio
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// =============================================================================
// Camera
// =============================================================================

/// Vertical field of view in degrees
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
/// Camera position along the depth axis (reference range 100-120)
pub const CAMERA_DEPTH: f32 = 100.0;

// =============================================================================
// Grid
// =============================================================================

pub const GRID_EXTENT: f32 = 300.0;
pub const GRID_DIVISIONS: u32 = 40;
/// Static tilt about the horizontal axis
pub const GRID_TILT: f32 = PI / 2.5;
pub const GRID_VERTICAL_OFFSET: f32 = -50.0;
/// Depth advance per frame (reference range 0.05-0.08)
pub const GRID_DEPTH_STEP: f32 = 0.05;
/// Depth band of one grid cell, so the wrap is seamless
pub const GRID_DEPTH_BAND: WrapBand = WrapBand::new(0.0, GRID_EXTENT / GRID_DIVISIONS as f32);
/// Secondary grid rotation per unit of horizontal pointer offset
pub const GRID_SWAY: f32 = 0.02;

// =============================================================================
// Particles
// =============================================================================

/// Particle count (reference range 2000-2500)
pub const PARTICLE_COUNT: usize = 2000;
/// Largest accepted particle count
pub const MAX_PARTICLE_COUNT: usize = 100_000;
/// Side of the cube particles are spawned in, centered at the origin
pub const PARTICLE_SPREAD: f32 = 600.0;
/// Depth advance per frame
pub const PARTICLE_Z_STEP: f32 = 0.3;
pub const PARTICLE_Z_BAND: WrapBand = WrapBand::new(-300.0, 300.0);
/// Amplitude of the per-frame oscillatory X/Y displacement
pub const PARTICLE_WOBBLE: f32 = 0.02;
/// Phase offset between consecutive particle indices
pub const PARTICLE_PHASE_SPREAD: f32 = 0.1;
/// Rendered point size in world units
pub const PARTICLE_SIZE: f32 = 1.5;

// =============================================================================
// Pointer
// =============================================================================

/// Fraction of the remaining distance covered per frame
pub const POINTER_SMOOTHING: f32 = 0.05;
/// Cloud rotation per unit of pointer offset (reference range 0.03-0.05)
pub const CLOUD_SWAY: f32 = 0.05;

// =============================================================================
// Colors
// =============================================================================

pub const ACCENT_PRIMARY: HexColor = HexColor::from_rgb(0x00, 0xd4, 0xff);
pub const ACCENT_SECONDARY: HexColor = HexColor::from_rgb(0x7b, 0x2f, 0xf7);
pub const GRID_CENTER_COLOR: HexColor = HexColor::from_rgb(0x7b, 0x2f, 0xf7);
pub const GRID_LINE_COLOR: HexColor = HexColor::from_rgb(0x1f, 0x1f, 0x3a);
pub const CLEAR_COLOR: HexColor = HexColor::from_rgb(0x05, 0x05, 0x0a);

/// An sRGB color written as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::InvalidColor(text.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(text.to_string()))
        };
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as sRGB floats in [0, 1]
    pub fn to_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Channels converted to linear light
    pub fn to_linear(&self) -> [f32; 3] {
        self.to_rgb().map(srgb_to_linear)
    }
}

/// Convert one sRGB channel to linear light
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Perspective camera settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub depth: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            depth: CAMERA_DEPTH,
        }
    }
}

/// Wireframe grid settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub extent: f32,
    pub divisions: u32,
    pub center_color: HexColor,
    pub line_color: HexColor,
    pub tilt: f32,
    pub vertical_offset: f32,
    pub depth_step: f32,
    pub depth_band: WrapBand,
    pub sway: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: GRID_EXTENT,
            divisions: GRID_DIVISIONS,
            center_color: GRID_CENTER_COLOR,
            line_color: GRID_LINE_COLOR,
            tilt: GRID_TILT,
            vertical_offset: GRID_VERTICAL_OFFSET,
            depth_step: GRID_DEPTH_STEP,
            depth_band: GRID_DEPTH_BAND,
            sway: GRID_SWAY,
        }
    }
}

/// Particle cloud settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub spread: f32,
    pub z_step: f32,
    pub z_band: WrapBand,
    pub wobble: f32,
    pub phase_spread: f32,
    pub size: f32,
    pub primary_color: HexColor,
    pub secondary_color: HexColor,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            spread: PARTICLE_SPREAD,
            z_step: PARTICLE_Z_STEP,
            z_band: PARTICLE_Z_BAND,
            wobble: PARTICLE_WOBBLE,
            phase_spread: PARTICLE_PHASE_SPREAD,
            size: PARTICLE_SIZE,
            primary_color: ACCENT_PRIMARY,
            secondary_color: ACCENT_SECONDARY,
        }
    }
}

/// Pointer smoothing and sway settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub smoothing: f32,
    pub cloud_sway: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            smoothing: POINTER_SMOOTHING,
            cloud_sway: CLOUD_SWAY,
        }
    }
}

/// Complete background configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas_id: String,
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub particles: ParticleConfig,
    pub pointer: PointerConfig,
    pub clear_color: HexColor,
    pub max_pixel_ratio: f32,
    /// Seed for particle placement; entropy is used when absent
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ELEMENT_ID.to_string(),
            camera: CameraConfig::default(),
            grid: GridConfig::default(),
            particles: ParticleConfig::default(),
            pointer: PointerConfig::default(),
            clear_color: CLEAR_COLOR,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles.count == 0 {
            return Err(ConfigError::EmptyCloud);
        }
        if self.particles.count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::OutOfRange {
                field: "particles.count",
                value: self.particles.count as f32,
            });
        }
        if self.grid.divisions == 0 {
            return Err(ConfigError::OutOfRange {
                field: "grid.divisions",
                value: 0.0,
            });
        }

        let smoothing = self.pointer.smoothing;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "pointer.smoothing",
                value: smoothing,
            });
        }

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera.fov_degrees",
                value: fov,
            });
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::OutOfRange {
                field: "camera.far",
                value: self.camera.far,
            });
        }

        require_positive("grid.extent", self.grid.extent)?;
        require_positive("particles.spread", self.particles.spread)?;
        require_positive("particles.size", self.particles.size)?;
        require_positive("max_pixel_ratio", self.max_pixel_ratio)?;

        require_band("grid.depth_band", self.grid.depth_band)?;
        require_band("particles.z_band", self.particles.z_band)?;
        require_positive("grid.depth_step", self.grid.depth_step)?;
        require_positive("particles.z_step", self.particles.z_step)?;

        // Particles spawn in a cube centered at the origin; its depth extent
        // must sit inside the wrap band
        let half = self.particles.spread / 2.0;
        let band = self.particles.z_band;
        if !(band.contains(-half) && band.contains(half)) {
            return Err(ConfigError::OutOfRange {
                field: "particles.spread",
                value: self.particles.spread,
            });
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn require_band(field: &'static str, band: WrapBand) -> Result<(), ConfigError> {
    if band.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvertedBand {
            field,
            lower: band.lower,
            upper: band.upper,
        })
    }
}
