use serde::{Deserialize, Serialize};

use crate::config::HandlePalette;

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Color of a handle or outline given its interaction state.
///
/// Back-facing dims the alpha, focus swaps in the selection color, and a
/// disabled scene blends the result toward the disabled color.
pub fn color_for_state(
    base: Rgba,
    focused: bool,
    back_faced: bool,
    disabled: bool,
    palette: &HandlePalette,
) -> Rgba {
    let unfocused = if back_faced {
        base.with_alpha_scaled(palette.backface_alpha)
    } else {
        base
    };
    let color = if focused { palette.selected } else { unfocused };
    if disabled {
        color.lerp(palette.disabled, palette.disabled_blend)
    } else {
        color
    }
}
