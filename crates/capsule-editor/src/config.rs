//! Configuration for outline drawing and handle presentation.

use serde::{Deserialize, Serialize};

use capsule_kernel::GeneratorConfig;

use crate::color::Rgba;

/// Line thicknesses used by the wireframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineThickness {
    /// Edges running along the main axis, pole fans included.
    pub vertical: f32,
    /// Interior rings.
    pub ring: f32,
    /// Rings where a cap meets the body.
    pub cap: f32,
    /// Flat cap outline while its direction handle has focus.
    pub cap_focused: f32,
}

impl Default for OutlineThickness {
    fn default() -> Self {
        Self {
            vertical: 0.75,
            ring: 1.0,
            cap: 2.0,
            cap_focused: 2.5,
        }
    }
}

/// Colors for handles and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlePalette {
    /// Base color of the main axis.
    pub axis: Rgba,
    /// Color of a focused handle.
    pub selected: Rgba,
    /// Color a disabled scene blends toward.
    pub disabled: Rgba,
    pub disabled_blend: f32,
    /// Alpha multiplier for back-faced handles and see-through outlines.
    pub backface_alpha: f32,
    /// Alpha multiplier for interior rings and vertical edges.
    pub secondary_alpha: f32,
}

impl Default for HandlePalette {
    fn default() -> Self {
        Self {
            axis: Rgba::new(0.604, 0.953, 0.282, 0.93),
            selected: Rgba::new(0.965, 0.949, 0.196, 0.89),
            disabled: Rgba::new(0.5, 0.5, 0.5, 0.0),
            disabled_blend: 0.6,
            backface_alpha: 0.3,
            secondary_alpha: 0.6,
        }
    }
}

/// Everything a [`crate::CapsuleEditor`] needs besides the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub thickness: OutlineThickness,
    pub palette: HandlePalette,
    /// Dash length for interior rings.
    pub line_dash: f32,
    pub generator: GeneratorConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            thickness: OutlineThickness::default(),
            palette: HandlePalette::default(),
            line_dash: 2.0,
            generator: GeneratorConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Solid interior rings, for hosts whose renderer cannot dash lines.
    pub fn undashed() -> Self {
        Self {
            line_dash: 0.0,
            ..Self::default()
        }
    }

    /// Dash pattern for interior rings, `None` when dashing is off.
    pub fn ring_dash(&self) -> Option<f32> {
        (self.line_dash > 0.0).then_some(self.line_dash)
    }
}
