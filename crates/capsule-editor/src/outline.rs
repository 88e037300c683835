//! Wireframe drawing on top of the host's line primitives.

use capsule_kernel::{Point3d, TopologyLayout};

use crate::color::Rgba;
use crate::config::EditorConfig;

/// Whether a line is hidden by solid geometry in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthMode {
    /// Occluded by solid geometry.
    DepthTested,
    /// Drawn regardless of occlusion.
    SeeThrough,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub depth: DepthMode,
    pub thickness: f32,
    /// Dash length; `None` draws a solid line.
    pub dash: Option<f32>,
    pub color: Rgba,
}

impl LineStyle {
    pub fn solid(depth: DepthMode, thickness: f32, color: Rgba) -> Self {
        Self {
            depth,
            thickness,
            dash: None,
            color,
        }
    }

    pub fn dashed(depth: DepthMode, thickness: f32, dash: Option<f32>, color: Rgba) -> Self {
        Self {
            depth,
            thickness,
            dash,
            color,
        }
    }
}

/// Line drawing supplied by the host.
pub trait OutlineRenderer {
    /// Draw the closed loop through `positions[start..start + count]`.
    fn draw_line_loop(&mut self, positions: &[Point3d], start: usize, count: usize, style: &LineStyle);

    fn draw_line(&mut self, a: Point3d, b: Point3d, style: &LineStyle);
}

/// Draw the capsule wireframe once in `depth` mode.
///
/// Flat cap rings are skipped; the editor draws those itself, emphasized
/// according to the focus of the matching direction handle. Cap rings of
/// rounded caps are solid and thick, every other ring is dashed and dimmed.
pub fn draw_outline(
    layout: &TopologyLayout,
    positions: &[Point3d],
    color: Rgba,
    depth: DepthMode,
    config: &EditorConfig,
    renderer: &mut dyn OutlineRenderer,
) {
    let dimmed = color.with_alpha_scaled(config.palette.secondary_alpha);

    for (ring, start) in layout.ring_starts() {
        if layout.is_flat_cap_ring(ring) {
            continue;
        }
        let style = if layout.is_cap_ring(ring) {
            LineStyle::solid(depth, config.thickness.cap, color)
        } else {
            LineStyle::dashed(depth, config.thickness.ring, config.ring_dash(), dimmed)
        };
        renderer.draw_line_loop(positions, start, layout.sides, &style);
    }

    let vertical = LineStyle::solid(depth, config.thickness.vertical, dimmed);
    for (lower, upper) in layout.vertical_edges() {
        renderer.draw_line(positions[lower], positions[upper], &vertical);
    }
}
