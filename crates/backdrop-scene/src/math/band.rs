//! Wrap band used by the grid and particle depth motion

use serde::{Deserialize, Serialize};

/// A closed interval that values advance through and wrap within.
///
/// Crossing `upper` resets to exactly `lower`; no remainder is carried over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WrapBand {
    pub lower: f32,
    pub upper: f32,
}

impl WrapBand {
    #[inline]
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    /// Whether `value` lies inside the band (inclusive)
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Advance `value` by `step`, resetting to `lower` past `upper`
    #[inline]
    pub fn advance(&self, value: f32, step: f32) -> f32 {
        let next = value + step;
        if next > self.upper {
            self.lower
        } else {
            next
        }
    }

    /// Whether the band is well formed
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper
    }
}
