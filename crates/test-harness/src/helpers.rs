//! Helper types: error type, deterministic host doubles, failing generator.

use std::collections::HashMap;

use capsule_editor::{
    DepthMode, HandleHost, HandleId, LineStyle, OutlineRenderer, Rgba, UndoRecorder, ViewState,
};
use capsule_kernel::{Point3d, TopologyLayout, Vec3, VertexGenerator};
use capsule_types::{CapsuleDefinition, ShapeDefinition, ShapeError};
use uuid::Uuid;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("instance not found: {name}")]
    InstanceNotFound { name: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("tick skipped for {name}: {source}")]
    Skipped {
        name: String,
        #[source]
        source: ShapeError,
    },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },
}

// ── Handle Host ─────────────────────────────────────────────────────────────

/// Which host primitive rendered a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Radius,
    Direction,
}

/// One handle rendered during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleCall {
    pub id: HandleId,
    pub kind: HandleKind,
    pub position: Point3d,
    pub axis: Vec3,
    pub color: Rgba,
}

/// Handle host returning scripted values for chosen handles and the input
/// value for every other one.
#[derive(Debug, Default)]
pub struct ScriptedHandles {
    radii: HashMap<HandleId, f64>,
    heights: HashMap<HandleId, f64>,
    pub focus: Option<HandleId>,
    pub disabled: bool,
    pub view: ViewState,
    pub calls: Vec<HandleCall>,
    pub change_checks: usize,
}

impl ScriptedHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the radius handle `id` return `radius` until cleared.
    pub fn script_radius(&mut self, id: HandleId, radius: f64) -> &mut Self {
        self.radii.insert(id, radius);
        self
    }

    /// Make the direction handle `id` return a point at height `y`.
    pub fn script_height(&mut self, id: HandleId, y: f64) -> &mut Self {
        self.heights.insert(id, y);
        self
    }

    pub fn focus(&mut self, id: Option<HandleId>) -> &mut Self {
        self.focus = id;
        self
    }

    /// Forget scripted values and recorded calls; keeps focus and view.
    pub fn clear(&mut self) {
        self.radii.clear();
        self.heights.clear();
        self.calls.clear();
        self.change_checks = 0;
    }

    pub fn calls_for(&self, id: HandleId) -> impl Iterator<Item = &HandleCall> {
        self.calls.iter().filter(move |call| call.id == id)
    }
}

impl HandleHost for ScriptedHandles {
    fn begin_change_check(&mut self) {
        self.change_checks += 1;
    }

    fn radius_handle(
        &mut self,
        id: HandleId,
        axis: Vec3,
        center: Point3d,
        radius: f64,
        color: Rgba,
    ) -> f64 {
        self.calls.push(HandleCall {
            id,
            kind: HandleKind::Radius,
            position: center,
            axis,
            color,
        });
        self.radii.get(&id).copied().unwrap_or(radius)
    }

    fn direction_handle(&mut self, id: HandleId, point: Point3d, axis: Vec3, color: Rgba) -> Point3d {
        self.calls.push(HandleCall {
            id,
            kind: HandleKind::Direction,
            position: point,
            axis,
            color,
        });
        match self.heights.get(&id) {
            Some(&y) => Point3d::new(point.x, y, point.z),
            None => point,
        }
    }

    fn focused_handle(&self) -> Option<HandleId> {
        self.focus
    }

    fn handles_disabled(&self) -> bool {
        self.disabled
    }

    fn view(&self) -> ViewState {
        self.view
    }
}

// ── Outline Renderer ────────────────────────────────────────────────────────

/// One draw call, with the positions it referenced copied out.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Loop {
        start: usize,
        points: Vec<Point3d>,
        style: LineStyle,
    },
    Line {
        a: Point3d,
        b: Point3d,
        style: LineStyle,
    },
}

impl DrawCall {
    pub fn style(&self) -> &LineStyle {
        match self {
            DrawCall::Loop { style, .. } | DrawCall::Line { style, .. } => style,
        }
    }

    pub fn depth(&self) -> DepthMode {
        self.style().depth
    }
}

/// Outline renderer that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingOutline {
    pub calls: Vec<DrawCall>,
}

impl RecordingOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn loops(&self) -> impl Iterator<Item = (usize, &[Point3d], &LineStyle)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Loop {
                start,
                points,
                style,
            } => Some((*start, points.as_slice(), style)),
            DrawCall::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point3d, Point3d, &LineStyle)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Line { a, b, style } => Some((*a, *b, style)),
            DrawCall::Loop { .. } => None,
        })
    }
}

impl OutlineRenderer for RecordingOutline {
    fn draw_line_loop(&mut self, positions: &[Point3d], start: usize, count: usize, style: &LineStyle) {
        self.calls.push(DrawCall::Loop {
            start,
            points: positions[start..start + count].to_vec(),
            style: *style,
        });
    }

    fn draw_line(&mut self, a: Point3d, b: Point3d, style: &LineStyle) {
        self.calls.push(DrawCall::Line { a, b, style: *style });
    }
}

// ── Undo Recorder ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUndo {
    pub label: String,
    pub target: Uuid,
    pub before: ShapeDefinition,
}

/// Undo recorder that only remembers what it was given.
#[derive(Debug, Default)]
pub struct RecordingUndo {
    pub records: Vec<RecordedUndo>,
}

impl RecordingUndo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl UndoRecorder for RecordingUndo {
    fn record(&mut self, label: &str, target: Uuid, before: &ShapeDefinition) {
        self.records.push(RecordedUndo {
            label: label.to_string(),
            target,
            before: before.clone(),
        });
    }
}

// ── Generators ──────────────────────────────────────────────────────────────

/// Generator that always reports a degenerate shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingGenerator;

impl VertexGenerator for FailingGenerator {
    fn generate(
        &self,
        _definition: &CapsuleDefinition,
        positions: &mut Vec<Point3d>,
    ) -> Result<TopologyLayout, ShapeError> {
        positions.clear();
        Err(ShapeError::generation("scripted failure"))
    }
}

// ── Definitions ─────────────────────────────────────────────────────────────

/// A capsule with both caps flat.
pub fn flat_capsule(sides: i32) -> CapsuleDefinition {
    CapsuleDefinition {
        sides,
        top_segments: 0,
        bottom_segments: 0,
        top_height: 0.0,
        bottom_height: 0.0,
        ..CapsuleDefinition::default()
    }
}

/// A capsule with both caps rounded by `segments` rings.
pub fn rounded_capsule(sides: i32, segments: i32) -> CapsuleDefinition {
    CapsuleDefinition {
        sides,
        top_segments: segments,
        bottom_segments: segments,
        ..CapsuleDefinition::default()
    }
}
