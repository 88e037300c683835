/// Errors raised while laying out or generating a shape.
///
/// Neither kind is fatal: a caller skips the current tick and tries again on
/// the next one with whatever the definition holds by then.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// The definition violates a structural rule (too few sides, a
    /// non-positive diameter, zero height, a negative segment count).
    #[error("invalid definition: {reason}")]
    InvalidDefinition { reason: String },

    /// The definition is structurally valid but its geometry collapses and
    /// cannot be tessellated.
    #[error("generation failed: {reason}")]
    GenerationFailure { reason: String },
}

impl ShapeError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            reason: reason.into(),
        }
    }

    pub fn generation(reason: impl Into<String>) -> Self {
        Self::GenerationFailure {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_definition(&self) -> bool {
        matches!(self, Self::InvalidDefinition { .. })
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::GenerationFailure { .. })
    }
}
