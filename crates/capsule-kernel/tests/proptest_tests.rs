//! Property-based tests for capsule topology invariants using the `proptest` crate.

use std::collections::HashSet;

use proptest::prelude::*;

use capsule_kernel::{CapsuleTopology, CapsuleVertexGenerator, VertexGenerator};
use capsule_types::CapsuleDefinition;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary structurally valid capsule definition.
fn arb_definition() -> impl Strategy<Value = CapsuleDefinition> {
    (
        3i32..48,
        0i32..12,
        0i32..12,
        0.01f64..100.0,
        0.01f64..100.0,
        prop_oneof![-50.0f64..-0.01, 0.01f64..50.0],
    )
        .prop_map(|(sides, top, bottom, dx, dz, height)| CapsuleDefinition {
            sides,
            top_segments: top,
            bottom_segments: bottom,
            diameter_x: dx,
            diameter_z: dz,
            height,
            top_height: height.abs() * 0.25,
            bottom_height: height.abs() * 0.25,
            ..CapsuleDefinition::default()
        })
}

// ---------------------------------------------------------------------------
// 1. Vertex index is a bijection onto [0, extra + rings * sides)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn vertex_index_is_a_bijection(def in arb_definition()) {
        let layout = CapsuleTopology::layout(&def).unwrap();
        let mut seen = HashSet::new();
        if let Some(top) = layout.top_vertex {
            prop_assert!(seen.insert(top));
        }
        if let Some(bottom) = layout.bottom_vertex {
            prop_assert!(seen.insert(bottom));
        }
        for ring in 0..layout.ring_count {
            for side in 0..layout.sides {
                let index = layout.vertex_index(ring, side);
                prop_assert!(index < layout.vertex_count(), "index {} out of range", index);
                prop_assert!(seen.insert(index), "index {} produced twice", index);
            }
        }
        prop_assert_eq!(seen.len(), layout.vertex_count());
        prop_assert_eq!(layout.vertex_count(), layout.extra_vertex_count + layout.ring_count * layout.sides);
    }
}

// ---------------------------------------------------------------------------
// 2. Consecutive rings differ by exactly `sides` at the same side
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ring_stride_equals_sides(def in arb_definition()) {
        let layout = CapsuleTopology::layout(&def).unwrap();
        for ring in 0..layout.ring_count - 1 {
            for side in 0..layout.sides {
                prop_assert_eq!(
                    layout.vertex_index(ring + 1, side) - layout.vertex_index(ring, side),
                    layout.sides
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Poles exist iff the matching cap is rounded
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn poles_exist_iff_caps_are_rounded(def in arb_definition()) {
        let layout = CapsuleTopology::layout(&def).unwrap();
        prop_assert_eq!(layout.top_vertex.is_some(), def.have_rounded_top());
        prop_assert_eq!(layout.bottom_vertex.is_some(), def.have_rounded_bottom());
        prop_assert_eq!(
            layout.extra_vertex_count,
            usize::from(def.have_rounded_top()) + usize::from(def.have_rounded_bottom())
        );
        prop_assert!(layout.ring_count >= 2);
    }
}

// ---------------------------------------------------------------------------
// 4. Generation fills exactly the indexed range with finite positions
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn generated_positions_match_layout(def in arb_definition()) {
        let mut positions = Vec::new();
        let layout = CapsuleVertexGenerator::default().generate(&def, &mut positions).unwrap();
        prop_assert_eq!(positions.len(), layout.vertex_count());
        prop_assert!(positions.iter().all(|p| p.is_finite()));
        prop_assert_eq!(layout, CapsuleTopology::layout(&def).unwrap());
    }
}

// ---------------------------------------------------------------------------
// 5. Every ring vertex lies within the capsule's extents
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn generated_positions_stay_inside_bounds(def in arb_definition()) {
        let mut positions = Vec::new();
        CapsuleVertexGenerator::default().generate(&def, &mut positions).unwrap();
        let low = def.offset_y.min(def.offset_y + def.height) - 1e-9;
        let high = def.offset_y.max(def.offset_y + def.height) + 1e-9;
        for p in &positions {
            prop_assert!(p.y >= low && p.y <= high, "y={} outside [{}, {}]", p.y, low, high);
            prop_assert!(p.x.abs() <= def.diameter_x * 0.5 + 1e-9);
            prop_assert!(p.z.abs() <= def.diameter_z * 0.5 + 1e-9);
        }
    }
}
