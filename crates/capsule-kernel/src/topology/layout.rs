use capsule_types::{CapsuleDefinition, ShapeError};

/// Ring, pole and side layout of one capsule definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyLayout {
    pub sides: usize,
    pub ring_count: usize,
    /// Pole slots preceding the rings (0, 1 or 2).
    pub extra_vertex_count: usize,
    pub top_vertex: Option<usize>,
    pub bottom_vertex: Option<usize>,
    /// First vertex of the topmost ring.
    pub top_vertex_offset: usize,
    /// First vertex of the bottommost ring.
    pub bottom_vertex_offset: usize,
    /// Ring where the top cap meets the body: the top equator when rounded,
    /// otherwise the topmost ring.
    pub top_cap_ring: usize,
    /// Ring where the bottom cap meets the body.
    pub bottom_cap_ring: usize,
}

impl TopologyLayout {
    pub fn have_rounded_top(&self) -> bool {
        self.top_vertex.is_some()
    }

    pub fn have_rounded_bottom(&self) -> bool {
        self.bottom_vertex.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.extra_vertex_count + self.ring_count * self.sides
    }

    /// Index of side `side` on ring `ring` (bottom to top).
    pub fn vertex_index(&self, ring: usize, side: usize) -> usize {
        debug_assert!(ring < self.ring_count, "ring {ring} out of range");
        debug_assert!(side < self.sides, "side {side} out of range");
        self.extra_vertex_count + ring * self.sides + side
    }

    pub fn ring_start(&self, ring: usize) -> usize {
        self.vertex_index(ring, 0)
    }

    /// `(ring, first vertex)` for every ring, bottom to top.
    pub fn ring_starts(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.ring_count).map(move |ring| (ring, self.ring_start(ring)))
    }

    pub fn is_cap_ring(&self, ring: usize) -> bool {
        ring == self.top_cap_ring || ring == self.bottom_cap_ring
    }

    /// A cap ring that closes a flat (untessellated) cap.
    pub fn is_flat_cap_ring(&self, ring: usize) -> bool {
        (!self.have_rounded_top() && ring == self.top_cap_ring)
            || (!self.have_rounded_bottom() && ring == self.bottom_cap_ring)
    }

    /// Every vertical edge as a `(lower, upper)` vertex index pair: the bottom
    /// pole fan, the edges between consecutive rings, then the top pole fan,
    /// grouped per side.
    pub fn vertical_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.sides).flat_map(move |side| {
            let bottom = self
                .bottom_vertex
                .map(|pole| (pole, self.vertex_index(0, side)));
            let body = (0..self.ring_count - 1)
                .map(move |ring| (self.vertex_index(ring, side), self.vertex_index(ring + 1, side)));
            let top = self
                .top_vertex
                .map(|pole| (self.vertex_index(self.ring_count - 1, side), pole));
            bottom.into_iter().chain(body).chain(top)
        })
    }
}

/// Computes [`TopologyLayout`]s. Pure; no state.
pub struct CapsuleTopology;

impl CapsuleTopology {
    /// Lay out the vertices of `definition`, rejecting structurally invalid
    /// definitions.
    pub fn layout(definition: &CapsuleDefinition) -> Result<TopologyLayout, ShapeError> {
        Self::check(definition)?;

        let ring_count = definition.ring_count();
        let top_cap_ring = if definition.have_rounded_top() {
            ring_count - definition.top_segments as usize
        } else {
            ring_count - 1
        };
        let bottom_cap_ring = if definition.have_rounded_bottom() {
            definition.bottom_segments as usize - 1
        } else {
            0
        };

        Ok(TopologyLayout {
            sides: definition.side_count(),
            ring_count,
            extra_vertex_count: definition.extra_vertex_count(),
            top_vertex: definition.top_vertex(),
            bottom_vertex: definition.bottom_vertex(),
            top_vertex_offset: definition.top_vertex_offset(),
            bottom_vertex_offset: definition.bottom_vertex_offset(),
            top_cap_ring,
            bottom_cap_ring,
        })
    }

    fn check(definition: &CapsuleDefinition) -> Result<(), ShapeError> {
        if definition.sides < 3 {
            return Err(ShapeError::invalid(format!(
                "sides must be at least 3, got {}",
                definition.sides
            )));
        }
        // Written as negated comparisons so NaN is rejected too.
        if !(definition.diameter_x > 0.0) || !definition.diameter_x.is_finite() {
            return Err(ShapeError::invalid(format!(
                "diameter_x must be positive, got {}",
                definition.diameter_x
            )));
        }
        if !(definition.diameter_z > 0.0) || !definition.diameter_z.is_finite() {
            return Err(ShapeError::invalid(format!(
                "diameter_z must be positive, got {}",
                definition.diameter_z
            )));
        }
        if definition.height == 0.0 || !definition.height.is_finite() {
            return Err(ShapeError::invalid(format!(
                "height must be non-zero, got {}",
                definition.height
            )));
        }
        if definition.top_segments < 0 || definition.bottom_segments < 0 {
            return Err(ShapeError::invalid(format!(
                "segment counts must not be negative, got top={} bottom={}",
                definition.top_segments, definition.bottom_segments
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule(sides: i32, top: i32, bottom: i32) -> CapsuleDefinition {
        CapsuleDefinition {
            sides,
            top_segments: top,
            bottom_segments: bottom,
            ..CapsuleDefinition::default()
        }
    }

    #[test]
    fn flat_capsule_layout() {
        let layout = CapsuleTopology::layout(&capsule(8, 0, 0)).unwrap();
        assert_eq!(layout.ring_count, 2);
        assert_eq!(layout.extra_vertex_count, 0);
        assert_eq!(layout.bottom_cap_ring, 0);
        assert_eq!(layout.top_cap_ring, 1);
        assert!(layout.is_flat_cap_ring(0));
        assert!(layout.is_flat_cap_ring(1));
        assert_eq!(layout.vertex_count(), 16);
    }

    #[test]
    fn rounded_capsule_cap_rings_are_equators() {
        let layout = CapsuleTopology::layout(&capsule(8, 3, 2)).unwrap();
        assert_eq!(layout.ring_count, 5);
        assert_eq!(layout.bottom_cap_ring, 1);
        assert_eq!(layout.top_cap_ring, 2);
        assert!(!layout.is_flat_cap_ring(1));
        assert!(!layout.is_flat_cap_ring(2));
        assert!(layout.is_cap_ring(1) && layout.is_cap_ring(2));
        assert!(!layout.is_cap_ring(0) && !layout.is_cap_ring(4));
    }

    #[test]
    fn single_segment_caps_share_nothing() {
        let layout = CapsuleTopology::layout(&capsule(4, 1, 1)).unwrap();
        assert_eq!(layout.ring_count, 2);
        assert_eq!(layout.bottom_cap_ring, 0);
        assert_eq!(layout.top_cap_ring, 1);
        assert_eq!(layout.top_vertex, Some(0));
        assert_eq!(layout.bottom_vertex, Some(1));
    }

    #[test]
    fn vertical_edge_count_matches_fans_and_body() {
        let layout = CapsuleTopology::layout(&capsule(8, 3, 3)).unwrap();
        let edges: Vec<_> = layout.vertical_edges().collect();
        assert_eq!(edges.len(), 8 * (layout.ring_count - 1 + 2));

        let top_fan = edges.iter().filter(|(_, upper)| Some(*upper) == layout.top_vertex).count();
        let bottom_fan = edges
            .iter()
            .filter(|(lower, _)| Some(*lower) == layout.bottom_vertex)
            .count();
        assert_eq!(top_fan, 8);
        assert_eq!(bottom_fan, 8);
    }

    #[test]
    fn pole_fans_touch_the_outermost_rings() {
        let layout = CapsuleTopology::layout(&capsule(6, 2, 2)).unwrap();
        for (lower, upper) in layout.vertical_edges() {
            if Some(lower) == layout.bottom_vertex {
                assert!(upper >= layout.bottom_vertex_offset && upper < layout.bottom_vertex_offset + 6);
            }
            if Some(upper) == layout.top_vertex {
                assert!(lower >= layout.top_vertex_offset && lower < layout.top_vertex_offset + 6);
            }
        }
    }

    #[test]
    fn rejects_structural_violations() {
        let cases = [
            capsule(2, 0, 0),
            CapsuleDefinition {
                diameter_x: 0.0,
                ..CapsuleDefinition::default()
            },
            CapsuleDefinition {
                diameter_z: -1.0,
                ..CapsuleDefinition::default()
            },
            CapsuleDefinition {
                diameter_x: f64::NAN,
                ..CapsuleDefinition::default()
            },
            CapsuleDefinition {
                height: 0.0,
                ..CapsuleDefinition::default()
            },
            capsule(8, -1, 0),
            capsule(8, 0, -2),
        ];
        for def in &cases {
            let err = CapsuleTopology::layout(def).unwrap_err();
            assert!(err.is_invalid_definition(), "{def:?} gave {err}");
        }
    }

    #[test]
    fn negative_height_is_structurally_valid() {
        let def = CapsuleDefinition {
            height: -2.0,
            ..CapsuleDefinition::default()
        };
        assert!(CapsuleTopology::layout(&def).is_ok());
    }
}
