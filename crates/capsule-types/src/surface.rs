use serde::{Deserialize, Serialize};

/// Per-face surface settings carried along with a shape definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescription {
    pub smoothing_group: u32,
    pub surface_flags: u32,
    /// Row-major 2x4 UV projection matrix.
    pub uv_matrix: [[f64; 4]; 2],
    pub material_id: u32,
}

impl Default for SurfaceDescription {
    fn default() -> Self {
        Self {
            smoothing_group: 0,
            surface_flags: 0,
            uv_matrix: [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]],
            material_id: 0,
        }
    }
}

/// One [`SurfaceDescription`] per logical face of a shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDefinition {
    pub surfaces: Vec<SurfaceDescription>,
}

impl SurfaceDefinition {
    pub fn with_count(count: usize) -> Self {
        Self {
            surfaces: vec![SurfaceDescription::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Resize to exactly `count` entries, keeping existing ones and padding
    /// with defaults.
    pub fn ensure_size(&mut self, count: usize) {
        self.surfaces.resize_with(count, SurfaceDescription::default);
    }
}
