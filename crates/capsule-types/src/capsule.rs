use serde::{Deserialize, Serialize};

use crate::limits::ShapeLimits;
use crate::surface::SurfaceDefinition;

/// Number of surfaces a capsule carries besides its sides (top and bottom cap).
pub const CAPSULE_CAP_SURFACES: usize = 2;

/// Parametric state of one capsule instance.
///
/// The capsule stands on the Y axis. Its bottom sits at `offset_y` and its top
/// at `offset_y + height`; a negative `height` flips the shape downwards.
/// Everything that can be derived from these fields (ring count, pole slots,
/// ring offsets) is computed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDefinition {
    /// Signed extent along the main axis, caps included.
    pub height: f64,
    /// Axial extent of the top hemisphere when the top is rounded.
    pub top_height: f64,
    /// Axial extent of the bottom hemisphere when the bottom is rounded.
    pub bottom_height: f64,
    pub diameter_x: f64,
    pub diameter_z: f64,
    /// Rotation about the main axis, in degrees.
    pub rotation: f64,
    /// Vertical placement of the bottom of the shape.
    pub offset_y: f64,
    /// Radial subdivisions.
    pub sides: i32,
    /// Ring subdivisions of the top hemisphere; 0 gives a flat cap.
    pub top_segments: i32,
    /// Ring subdivisions of the bottom hemisphere; 0 gives a flat cap.
    pub bottom_segments: i32,
    pub surface_definition: SurfaceDefinition,
}

impl Default for CapsuleDefinition {
    fn default() -> Self {
        let sides = 8;
        Self {
            height: 2.0,
            top_height: 0.5,
            bottom_height: 0.5,
            diameter_x: 1.0,
            diameter_z: 1.0,
            rotation: 0.0,
            offset_y: 0.0,
            sides,
            top_segments: 4,
            bottom_segments: 4,
            surface_definition: SurfaceDefinition::with_count(sides as usize + CAPSULE_CAP_SURFACES),
        }
    }
}

impl CapsuleDefinition {
    pub fn have_rounded_top(&self) -> bool {
        self.top_segments > 0
    }

    pub fn have_rounded_bottom(&self) -> bool {
        self.bottom_segments > 0
    }

    /// Radial subdivisions as an index-space count (0 for a negative value).
    pub fn side_count(&self) -> usize {
        self.sides.max(0) as usize
    }

    /// Horizontal vertex rings: one per flat cap, `segments` per rounded cap.
    pub fn ring_count(&self) -> usize {
        let top = if self.have_rounded_top() {
            self.top_segments as usize
        } else {
            1
        };
        let bottom = if self.have_rounded_bottom() {
            self.bottom_segments as usize
        } else {
            1
        };
        top + bottom
    }

    /// Pole slots that precede the ring vertices.
    pub fn extra_vertex_count(&self) -> usize {
        usize::from(self.have_rounded_top()) + usize::from(self.have_rounded_bottom())
    }

    /// Index of the top pole. The top pole always takes the first slot.
    pub fn top_vertex(&self) -> Option<usize> {
        self.have_rounded_top().then_some(0)
    }

    /// Index of the bottom pole, allocated after the top pole.
    pub fn bottom_vertex(&self) -> Option<usize> {
        self.have_rounded_bottom()
            .then(|| usize::from(self.have_rounded_top()))
    }

    /// First vertex of the topmost ring.
    pub fn top_vertex_offset(&self) -> usize {
        self.extra_vertex_count() + (self.ring_count() - 1) * self.side_count()
    }

    /// First vertex of the bottommost ring.
    pub fn bottom_vertex_offset(&self) -> usize {
        self.extra_vertex_count()
    }

    pub fn vertex_count(&self) -> usize {
        self.extra_vertex_count() + self.ring_count() * self.side_count()
    }

    /// Logical faces: one per side plus the two caps.
    pub fn surface_count(&self) -> usize {
        self.side_count() + CAPSULE_CAP_SURFACES
    }

    /// Clamp and repair the definition in place so it satisfies `limits`.
    ///
    /// A negative height is legal and keeps its sign; only its magnitude is
    /// clamped. Cap extents are scaled down together when they would not fit
    /// inside the height.
    pub fn revalidate(&mut self, limits: &ShapeLimits) {
        let defaults = Self::default();
        for (value, fallback) in [
            (&mut self.height, defaults.height),
            (&mut self.top_height, defaults.top_height),
            (&mut self.bottom_height, defaults.bottom_height),
            (&mut self.diameter_x, defaults.diameter_x),
            (&mut self.diameter_z, defaults.diameter_z),
            (&mut self.rotation, defaults.rotation),
            (&mut self.offset_y, defaults.offset_y),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }

        self.diameter_x = self.diameter_x.abs().max(limits.min_diameter);
        self.diameter_z = self.diameter_z.abs().max(limits.min_diameter);

        if self.height.abs() < limits.min_height {
            self.height = if self.height < 0.0 {
                -limits.min_height
            } else {
                limits.min_height
            };
        }

        self.top_height = self.top_height.max(0.0);
        self.bottom_height = self.bottom_height.max(0.0);
        let cap_total = self.top_height + self.bottom_height;
        let available = self.height.abs();
        if cap_total > available {
            let scale = available / cap_total;
            self.top_height *= scale;
            self.bottom_height *= scale;
        }

        self.sides = self.sides.max(3).min(limits.max_sides.max(3));
        let max_segments = limits.max_segments.max(0);
        self.top_segments = self.top_segments.clamp(0, max_segments);
        self.bottom_segments = self.bottom_segments.clamp(0, max_segments);

        self.rotation = self.rotation.rem_euclid(360.0);

        let surfaces = self.surface_count();
        self.surface_definition.ensure_size(surfaces);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(sides: i32) -> CapsuleDefinition {
        CapsuleDefinition {
            sides,
            top_segments: 0,
            bottom_segments: 0,
            ..CapsuleDefinition::default()
        }
    }

    #[test]
    fn flat_caps_have_two_rings_and_no_poles() {
        let def = flat(8);
        assert_eq!(def.ring_count(), 2);
        assert_eq!(def.extra_vertex_count(), 0);
        assert_eq!(def.top_vertex(), None);
        assert_eq!(def.bottom_vertex(), None);
        assert_eq!(def.bottom_vertex_offset(), 0);
        assert_eq!(def.top_vertex_offset(), 8);
        assert_eq!(def.vertex_count(), 16);
    }

    #[test]
    fn rounded_caps_allocate_top_pole_first() {
        let def = CapsuleDefinition {
            sides: 8,
            top_segments: 3,
            bottom_segments: 3,
            ..CapsuleDefinition::default()
        };
        assert_eq!(def.ring_count(), 6);
        assert_eq!(def.extra_vertex_count(), 2);
        assert_eq!(def.top_vertex(), Some(0));
        assert_eq!(def.bottom_vertex(), Some(1));
        assert_eq!(def.bottom_vertex_offset(), 2);
        assert_eq!(def.top_vertex_offset(), 2 + 5 * 8);
    }

    #[test]
    fn only_bottom_rounded_takes_slot_zero() {
        let def = CapsuleDefinition {
            top_segments: 0,
            bottom_segments: 2,
            ..CapsuleDefinition::default()
        };
        assert_eq!(def.extra_vertex_count(), 1);
        assert_eq!(def.top_vertex(), None);
        assert_eq!(def.bottom_vertex(), Some(0));
        assert_eq!(def.ring_count(), 3);
    }

    #[test]
    fn revalidate_repairs_inverted_drag() {
        let mut def = CapsuleDefinition {
            height: 0.0,
            diameter_x: -2.0,
            diameter_z: 0.0,
            ..CapsuleDefinition::default()
        };
        let limits = ShapeLimits::default();
        def.revalidate(&limits);
        assert_relative_eq!(def.height, limits.min_height);
        assert_relative_eq!(def.diameter_x, 2.0);
        assert_relative_eq!(def.diameter_z, limits.min_diameter);
        assert!(def.top_height + def.bottom_height <= def.height.abs() + 1e-12);
    }

    #[test]
    fn revalidate_keeps_negative_height_sign() {
        let mut def = CapsuleDefinition {
            height: -1e-6,
            ..CapsuleDefinition::default()
        };
        def.revalidate(&ShapeLimits::default());
        assert_relative_eq!(def.height, -0.01);

        let mut def = CapsuleDefinition {
            height: -3.0,
            ..CapsuleDefinition::default()
        };
        def.revalidate(&ShapeLimits::default());
        assert_relative_eq!(def.height, -3.0);
    }

    #[test]
    fn revalidate_scales_cap_heights_to_fit() {
        let mut def = CapsuleDefinition {
            height: 1.0,
            top_height: 1.5,
            bottom_height: 0.5,
            ..CapsuleDefinition::default()
        };
        def.revalidate(&ShapeLimits::default());
        assert_relative_eq!(def.top_height, 0.75);
        assert_relative_eq!(def.bottom_height, 0.25);
    }

    #[test]
    fn revalidate_clamps_counts_and_resizes_surfaces() {
        let mut def = CapsuleDefinition {
            sides: 1,
            top_segments: -4,
            bottom_segments: 1000,
            ..CapsuleDefinition::default()
        };
        let limits = ShapeLimits::default();
        def.revalidate(&limits);
        assert_eq!(def.sides, 3);
        assert_eq!(def.top_segments, 0);
        assert_eq!(def.bottom_segments, limits.max_segments);
        assert_eq!(def.surface_definition.len(), 5);
    }

    #[test]
    fn revalidate_wraps_rotation_and_replaces_nan() {
        let mut def = CapsuleDefinition {
            rotation: -90.0,
            offset_y: f64::NAN,
            ..CapsuleDefinition::default()
        };
        def.revalidate(&ShapeLimits::default());
        assert_relative_eq!(def.rotation, 270.0);
        assert_eq!(def.offset_y, 0.0);
    }

    #[test]
    fn default_is_stable_under_revalidation() {
        let mut def = CapsuleDefinition::default();
        def.revalidate(&ShapeLimits::default());
        assert_eq!(def, CapsuleDefinition::default());
    }
}
