use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use capsule_types::{CapsuleDefinition, ShapeError};

use crate::geometry::Point3d;
use crate::topology::{CapsuleTopology, TopologyLayout};

/// Produces vertex positions ordered by a [`TopologyLayout`].
///
/// Implementations write into a caller-owned buffer so the caller decides how
/// long positions live. On error the buffer contents are unspecified and must
/// not be drawn.
pub trait VertexGenerator {
    fn generate(
        &self,
        definition: &CapsuleDefinition,
        positions: &mut Vec<Point3d>,
    ) -> Result<TopologyLayout, ShapeError>;
}

/// Thresholds below which geometry is considered collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Smallest radius (on either horizontal axis) that still tessellates.
    pub min_radius: f64,
    /// Smallest height magnitude that still tessellates.
    pub min_height: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_radius: 1e-5,
            min_height: 1e-5,
        }
    }
}

/// Default capsule vertex generator.
///
/// Poles sit on the Y axis at the two ends. Rounded caps distribute their rings
/// over a quarter circle from the pole to the equator; flat caps contribute a
/// single ring at their end.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsuleVertexGenerator {
    pub config: GeneratorConfig,
}

impl CapsuleVertexGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    fn check_degenerate(&self, definition: &CapsuleDefinition) -> Result<(), ShapeError> {
        let radius_x = definition.diameter_x * 0.5;
        let radius_z = definition.diameter_z * 0.5;
        if radius_x < self.config.min_radius || radius_z < self.config.min_radius {
            return Err(ShapeError::generation(format!(
                "radius collapsed ({radius_x}, {radius_z})"
            )));
        }

        let length = definition.height.abs();
        if length < self.config.min_height {
            return Err(ShapeError::generation(format!("height collapsed ({length})")));
        }

        let (top_extent, bottom_extent) = cap_extents(definition);
        if top_extent + bottom_extent > length + self.config.min_height {
            return Err(ShapeError::generation(format!(
                "cap extents {top_extent} + {bottom_extent} exceed height {length}"
            )));
        }
        Ok(())
    }
}

impl VertexGenerator for CapsuleVertexGenerator {
    #[instrument(skip_all, fields(sides = definition.sides, top = definition.top_segments, bottom = definition.bottom_segments))]
    fn generate(
        &self,
        definition: &CapsuleDefinition,
        positions: &mut Vec<Point3d>,
    ) -> Result<TopologyLayout, ShapeError> {
        let layout = CapsuleTopology::layout(definition)?;
        self.check_degenerate(definition)?;

        let radius_x = definition.diameter_x * 0.5;
        let radius_z = definition.diameter_z * 0.5;
        let direction = definition.height.signum();
        let bottom_y = definition.offset_y;
        let top_y = definition.offset_y + definition.height;
        let (top_extent, bottom_extent) = cap_extents(definition);

        positions.clear();
        positions.resize(layout.vertex_count(), Point3d::ORIGIN);

        if let Some(pole) = layout.top_vertex {
            positions[pole] = Point3d::on_axis(top_y);
        }
        if let Some(pole) = layout.bottom_vertex {
            positions[pole] = Point3d::on_axis(bottom_y);
        }

        let bottom_rings = layout.bottom_cap_ring + 1;
        let rotation = definition.rotation.to_radians();
        let step = TAU / layout.sides as f64;

        for ring in 0..layout.ring_count {
            let (y, scale) = if ring < bottom_rings {
                if layout.have_rounded_bottom() {
                    let phi = (ring + 1) as f64 / definition.bottom_segments as f64 * FRAC_PI_2;
                    (bottom_y + direction * bottom_extent * (1.0 - phi.cos()), phi.sin())
                } else {
                    (bottom_y, 1.0)
                }
            } else if layout.have_rounded_top() {
                let from_equator = ring - bottom_rings;
                let segments = definition.top_segments as usize;
                let phi = (segments - from_equator) as f64 / segments as f64 * FRAC_PI_2;
                (top_y - direction * top_extent * (1.0 - phi.cos()), phi.sin())
            } else {
                (top_y, 1.0)
            };

            for side in 0..layout.sides {
                let angle = rotation + side as f64 * step;
                positions[layout.vertex_index(ring, side)] = Point3d::new(
                    radius_x * scale * angle.cos(),
                    y,
                    radius_z * scale * angle.sin(),
                );
            }
        }

        if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
            debug!(index, "generated a non-finite vertex");
            return Err(ShapeError::generation(format!("vertex {index} is not finite")));
        }

        trace!(vertices = positions.len(), rings = layout.ring_count, "generated capsule vertices");
        Ok(layout)
    }
}

/// Axial extents of the rounded caps; flat caps contribute nothing.
fn cap_extents(definition: &CapsuleDefinition) -> (f64, f64) {
    let top = if definition.have_rounded_top() {
        definition.top_height.max(0.0)
    } else {
        0.0
    };
    let bottom = if definition.have_rounded_bottom() {
        definition.bottom_height.max(0.0)
    } else {
        0.0
    };
    (top, bottom)
}
