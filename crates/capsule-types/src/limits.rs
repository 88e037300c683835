//! Clamping limits applied when a definition is revalidated.

use serde::{Deserialize, Serialize};

/// Bounds enforced by [`crate::CapsuleDefinition::revalidate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeLimits {
    /// Smallest diameter a revalidated definition may hold (meters).
    pub min_diameter: f64,
    /// Smallest height magnitude a revalidated definition may hold (meters).
    pub min_height: f64,
    /// Upper bound on radial subdivisions.
    pub max_sides: i32,
    /// Upper bound on hemisphere ring subdivisions per cap.
    pub max_segments: i32,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            min_diameter: 0.01,
            min_height: 0.01,
            max_sides: 128,
            max_segments: 32,
        }
    }
}

impl ShapeLimits {
    /// Looser bounds for very small or finely tessellated shapes.
    pub fn fine() -> Self {
        Self {
            min_diameter: 1e-4,
            min_height: 1e-4,
            max_sides: 512,
            max_segments: 128,
        }
    }
}
