//! Error types for the background renderer
//!
//! Initialization errors never escape [`BackdropController::init`]; they are
//! converted into an [`InitOutcome`]. Frame errors are classified so the
//! controller can decide whether the loop keeps running.
//!
//! [`BackdropController::init`]: crate::BackdropController::init
//! [`InitOutcome`]: crate::InitOutcome

use crate::lifecycle::LifecycleState;

/// Errors raised by the renderer, its host, or its graphics backend.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BackdropError {
    /// The drawing surface element could not be found.
    #[error("drawing surface #{0} not found")]
    SurfaceMissing(String),

    /// The graphics context or device could not be created.
    #[error("graphics initialization failed: {0}")]
    GraphicsInit(String),

    /// A single frame could not be presented; the loop keeps running.
    #[error("frame skipped: {0}")]
    FrameSkipped(String),

    /// The graphics device can no longer render; the loop stops.
    #[error("graphics device lost: {0}")]
    DeviceLost(String),

    /// The requested operation is not valid in the current lifecycle state.
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: LifecycleState,
        action: &'static str,
    },
}

impl BackdropError {
    /// Whether the render loop may continue after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, BackdropError::FrameSkipped(_))
    }
}

/// Errors produced while parsing or validating a [`SceneConfig`].
///
/// [`SceneConfig`]: crate::SceneConfig
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(String),

    /// A color was not in `#rrggbb` form.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// The particle cloud must hold at least one particle.
    #[error("particle count must be at least 1")]
    EmptyCloud,

    /// A numeric field is outside its accepted range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    /// A wrap band has its lower bound at or above its upper bound.
    #[error("{field} band is inverted: lower {lower} >= upper {upper}")]
    InvertedBand {
        field: &'static str,
        lower: f32,
        upper: f32,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}
