//! Assertion helpers with diagnostic output.
//!
//! Each helper returns `Err(HarnessError::AssertionFailed)` describing
//! expected vs actual instead of panicking.

use capsule_editor::{DepthMode, TickOutcome};
use capsule_kernel::{Point3d, TopologyLayout};
use capsule_types::CapsuleDefinition;

use crate::helpers::{HarnessError, RecordingOutline};

fn fail(ctx: &str, detail: String) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!("[{ctx}] {detail}"),
    }
}

/// Assert ring count, pole count and side count of a layout.
pub fn assert_layout(
    layout: &TopologyLayout,
    expected_rings: usize,
    expected_extra: usize,
    expected_sides: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = (layout.ring_count, layout.extra_vertex_count, layout.sides);
    if actual == (expected_rings, expected_extra, expected_sides) {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!(
                "expected rings={expected_rings} extra={expected_extra} sides={expected_sides}, \
                 got rings={} extra={} sides={}",
                actual.0, actual.1, actual.2,
            ),
        ))
    }
}

/// Assert the sorted, de-duplicated start indices of loops drawn in `depth`.
pub fn assert_loop_starts(
    outline: &RecordingOutline,
    depth: DepthMode,
    expected: &[usize],
    ctx: &str,
) -> Result<(), HarnessError> {
    let mut starts: Vec<usize> = outline
        .loops()
        .filter(|(_, _, style)| style.depth == depth)
        .map(|(start, _, _)| start)
        .collect();
    starts.sort_unstable();
    starts.dedup();
    if starts == expected {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!("{depth:?} loop starts: expected {expected:?}, got {starts:?}"),
        ))
    }
}

/// Assert how many lines were drawn in `depth` touching `pole`.
pub fn assert_pole_fan(
    outline: &RecordingOutline,
    depth: DepthMode,
    pole: Point3d,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let count = outline
        .lines()
        .filter(|(a, b, style)| style.depth == depth && (*a == pole || *b == pole))
        .count();
    if count == expected {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!("{depth:?} fan at {pole:?}: expected {expected} lines, got {count}"),
        ))
    }
}

/// Assert both diameters are equal and match `expected` within `tol`.
pub fn assert_uniform_diameter(
    def: &CapsuleDefinition,
    expected: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if def.diameter_x != def.diameter_z {
        return Err(fail(
            ctx,
            format!(
                "diameters differ: x={} z={}",
                def.diameter_x, def.diameter_z
            ),
        ));
    }
    if (def.diameter_x - expected).abs() > tol {
        return Err(fail(
            ctx,
            format!(
                "diameter: expected {expected:.4}, got {:.4} (tol={tol})",
                def.diameter_x
            ),
        ));
    }
    Ok(())
}

/// Assert every loop with `sides` points shows `positions` at the loop's
/// start, i.e. it was drawn from that buffer and not a stale one.
pub fn assert_drawn_from(
    outline: &RecordingOutline,
    positions: &[Point3d],
    sides: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let mut checked = 0;
    for (start, points, _) in outline.loops().filter(|(_, points, _)| points.len() == sides) {
        checked += 1;
        let expected = positions.get(start..start + points.len());
        if expected != Some(points) {
            return Err(fail(
                ctx,
                format!("loop at {start} was not drawn from the expected positions"),
            ));
        }
    }
    if checked == 0 {
        return Err(fail(ctx, format!("no loops with {sides} points were drawn")));
    }
    Ok(())
}

/// Assert the outcome committed exactly as expected.
pub fn assert_committed(outcome: &TickOutcome, expected: bool, ctx: &str) -> Result<(), HarnessError> {
    if outcome.is_committed() == expected {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!("expected committed={expected}, got {outcome:?}"),
        ))
    }
}
