//! The per-tick capsule editing state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use capsule_kernel::{CapsuleVertexGenerator, Point3d, TopologyLayout, Vec3, VertexGenerator};
use capsule_types::{CapsuleDefinition, ShapeDefinition, ShapeError, ShapeInstance};

use crate::color::color_for_state;
use crate::config::EditorConfig;
use crate::facing::is_surface_back_faced;
use crate::handles::{HandleHost, HandleId, HandleRegistry, HandleRole};
use crate::outline::{draw_outline, DepthMode, LineStyle, OutlineRenderer};
use crate::undo::UndoRecorder;

/// Where the editor is in its `Idle -> Dragging -> Committing -> Idle` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditState {
    #[default]
    Idle,
    /// One of the editor's handles has focus.
    Dragging,
    /// A changed value is being written back. Never observable between ticks.
    Committing,
}

/// The three scalars the handles manipulate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleSnapshot {
    pub radius: f64,
    pub top_y: f64,
    pub bottom_y: f64,
}

impl HandleSnapshot {
    /// Radius comes from `diameter_x` alone; the handle drives both diameters.
    pub fn of(definition: &CapsuleDefinition) -> Self {
        Self {
            radius: definition.diameter_x * 0.5,
            top_y: definition.offset_y + definition.height,
            bottom_y: definition.offset_y,
        }
    }

    /// Exact comparison: handles return their input unchanged when untouched.
    #[allow(clippy::float_cmp)]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.radius != other.radius || self.top_y != other.top_y || self.bottom_y != other.bottom_y
    }

    #[allow(clippy::float_cmp)]
    fn axis_moved(&self, other: &Self) -> bool {
        self.top_y != other.top_y || self.bottom_y != other.bottom_y
    }
}

/// Write handle values back into `definition`.
///
/// `height` is only recomputed when an axis handle moved, so a radius-only
/// edit leaves it bit-identical. The result may violate definition invariants
/// and must be revalidated.
pub fn apply_handle_edit(
    definition: &mut CapsuleDefinition,
    before: &HandleSnapshot,
    after: &HandleSnapshot,
) {
    let diameter = after.radius * 2.0;
    definition.diameter_x = diameter;
    definition.diameter_z = diameter;
    definition.offset_y = after.bottom_y;
    if after.axis_moved(before) {
        definition.height = after.top_y - after.bottom_y;
    }
}

/// One committed edit, as handed to the undo recorder plus the result.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub label: String,
    pub target: Uuid,
    pub before: ShapeDefinition,
    /// The definition after revalidation.
    pub after: ShapeDefinition,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Generation failed; nothing was drawn or changed.
    Skipped(ShapeError),
    Unchanged,
    Committed(CommitRecord),
}

impl TickOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, TickOutcome::Committed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TickOutcome::Skipped(_))
    }

    pub fn commit(&self) -> Option<&CommitRecord> {
        match self {
            TickOutcome::Committed(record) => Some(record),
            _ => None,
        }
    }
}

/// Host services borrowed for one tick.
pub struct SceneContext<'a> {
    pub handles: &'a mut dyn HandleHost,
    pub outline: &'a mut dyn OutlineRenderer,
    pub undo: &'a mut dyn UndoRecorder,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        handles: &'a mut dyn HandleHost,
        outline: &'a mut dyn OutlineRenderer,
        undo: &'a mut dyn UndoRecorder,
    ) -> Self {
        Self {
            handles,
            outline,
            undo,
        }
    }
}

/// Which end of the main axis a direction handle sits on.
#[derive(Clone, Copy)]
struct CapEnd {
    role: HandleRole,
    y: f64,
    axis: Vec3,
    flat_ring: Option<usize>,
}

/// Interactive editor for one capsule instance.
///
/// Owns the vertex buffer it draws from, so several editors can visualize
/// their instances in the same tick.
///
/// Known limitation: shrinking the capsule through the handles moves its
/// bottom via `offset_y` but never adjusts the host's placement transform.
#[derive(Debug)]
pub struct CapsuleEditor<G = CapsuleVertexGenerator> {
    generator: G,
    config: EditorConfig,
    handles: HandleRegistry,
    vertices: Vec<Point3d>,
    state: EditState,
}

impl CapsuleEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_handles(config, HandleRegistry::default())
    }

    pub fn with_handles(config: EditorConfig, handles: HandleRegistry) -> Self {
        let generator = CapsuleVertexGenerator::new(config.generator);
        Self::with_generator(generator, config, handles)
    }

    /// The definition used by the "create capsule" command.
    pub fn create_definition() -> ShapeDefinition {
        ShapeDefinition::Capsule(CapsuleDefinition::default())
    }
}

impl Default for CapsuleEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<G: VertexGenerator> CapsuleEditor<G> {
    pub fn with_generator(generator: G, config: EditorConfig, handles: HandleRegistry) -> Self {
        Self {
            generator,
            config,
            handles,
            vertices: Vec::new(),
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// Positions generated during the last tick. Empty after a failed tick.
    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    /// Drop the scratch buffer and return to `Idle`.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.state = EditState::Idle;
    }

    /// Run one redraw tick for `instance`.
    ///
    /// Generates vertices, draws the wireframe and the three handles, and
    /// commits one undo-unit when any handle value changed. A failed
    /// generation skips the whole tick and leaves `instance` untouched.
    #[instrument(skip_all, fields(target = %instance.id))]
    pub fn on_scene(
        &mut self,
        instance: &mut ShapeInstance,
        ctx: &mut SceneContext<'_>,
    ) -> TickOutcome {
        let Some(definition) = instance.definition.as_capsule() else {
            let err = ShapeError::invalid(format!(
                "capsule editor given a {} definition",
                instance.node_type_name()
            ));
            debug!(%err, "skipping tick");
            return TickOutcome::Skipped(err);
        };

        let layout = match self.generator.generate(definition, &mut self.vertices) {
            Ok(layout) => layout,
            Err(err) => {
                debug!(%err, "skipping tick");
                self.vertices.clear();
                self.state = EditState::Idle;
                return TickOutcome::Skipped(err);
            }
        };

        let disabled = ctx.handles.handles_disabled();
        let base = self.config.palette.axis;
        let palette = &self.config.palette;
        draw_outline(
            &layout,
            &self.vertices,
            color_for_state(base, false, false, disabled, palette),
            DepthMode::DepthTested,
            &self.config,
            ctx.outline,
        );
        draw_outline(
            &layout,
            &self.vertices,
            color_for_state(base, false, true, disabled, palette),
            DepthMode::SeeThrough,
            &self.config,
            ctx.outline,
        );

        let before = HandleSnapshot::of(definition);
        let normal = if definition.height < 0.0 { -Vec3::Y } else { Vec3::Y };
        let top = CapEnd {
            role: HandleRole::TopDirection,
            y: before.top_y,
            axis: normal,
            flat_ring: (!layout.have_rounded_top()).then_some(layout.top_vertex_offset),
        };
        let bottom = CapEnd {
            role: HandleRole::BottomDirection,
            y: before.bottom_y,
            axis: -normal,
            flat_ring: (!layout.have_rounded_bottom()).then_some(layout.bottom_vertex_offset),
        };

        ctx.handles.begin_change_check();
        let focused = ctx.handles.focused_handle();

        let radius_id = self.handles.id(HandleRole::Radius);
        let center = Point3d::on_axis((before.top_y + before.bottom_y) * 0.5);
        let radius_color = color_for_state(base, focused == Some(radius_id), false, disabled, palette);
        let radius = ctx
            .handles
            .radius_handle(radius_id, normal, center, before.radius, radius_color);

        let top_y = self.direction_handle(top, &layout, focused, disabled, ctx);
        let bottom_y = self.direction_handle(bottom, &layout, focused, disabled, ctx);

        let dragging = focused.is_some_and(|id| self.handles.owns(id));
        self.state = if dragging { EditState::Dragging } else { EditState::Idle };

        let after = HandleSnapshot {
            radius,
            top_y,
            bottom_y,
        };
        if !after.differs_from(&before) {
            return TickOutcome::Unchanged;
        }
        self.commit(instance, &before, &after, ctx.undo)
    }

    /// Draw a direction handle at one end of the axis, plus the emphasized
    /// outline of that end's ring when its cap is flat. Returns the handle's
    /// new height.
    fn direction_handle(
        &self,
        end: CapEnd,
        layout: &TopologyLayout,
        focused: Option<HandleId>,
        disabled: bool,
        ctx: &mut SceneContext<'_>,
    ) -> f64 {
        let id = self.handles.id(end.role);
        let point = Point3d::on_axis(end.y);
        let has_focus = focused == Some(id);
        let palette = &self.config.palette;
        let back_faced = is_surface_back_faced(point, end.axis, &ctx.handles.view());
        let color = color_for_state(palette.axis, has_focus, back_faced, disabled, palette);

        let moved = ctx.handles.direction_handle(id, point, end.axis, color).y;

        if let Some(start) = end.flat_ring {
            let thickness = if has_focus {
                self.config.thickness.cap_focused
            } else {
                self.config.thickness.cap
            };
            // Only the see-through pass carries the back-face cue.
            let hidden = color_for_state(palette.axis, has_focus, true, disabled, palette);
            let front = color_for_state(palette.axis, has_focus, false, disabled, palette);
            ctx.outline.draw_line_loop(
                &self.vertices,
                start,
                layout.sides,
                &LineStyle::solid(DepthMode::SeeThrough, thickness, hidden),
            );
            ctx.outline.draw_line_loop(
                &self.vertices,
                start,
                layout.sides,
                &LineStyle::solid(DepthMode::DepthTested, thickness, front),
            );
        }

        moved
    }

    fn commit(
        &mut self,
        instance: &mut ShapeInstance,
        before: &HandleSnapshot,
        after: &HandleSnapshot,
        undo: &mut dyn UndoRecorder,
    ) -> TickOutcome {
        self.state = EditState::Committing;
        let label = format!("Modified {}", instance.node_type_name());
        undo.record(&label, instance.id, &instance.definition);
        let previous = instance.definition.clone();

        let ShapeDefinition::Capsule(capsule) = &mut instance.definition;
        apply_handle_edit(capsule, before, after);
        trace!(?before, ?after, "handle values applied");
        instance.revalidate();

        info!(%label, radius = after.radius, top_y = after.top_y, bottom_y = after.bottom_y, "committed edit");
        self.state = EditState::Idle;
        TickOutcome::Committed(CommitRecord {
            label,
            target: instance.id,
            before: previous,
            after: instance.definition.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::color::Rgba;
    use crate::facing::ViewState;

    /// Host whose handles return scripted values.
    #[derive(Default)]
    struct Scripted {
        radius: Option<f64>,
        top: Option<f64>,
        bottom: Option<f64>,
        focus: Option<HandleId>,
        calls: usize,
    }

    impl HandleHost for Scripted {
        fn radius_handle(&mut self, _: HandleId, _: Vec3, _: Point3d, radius: f64, _: Rgba) -> f64 {
            self.calls += 1;
            self.radius.unwrap_or(radius)
        }

        fn direction_handle(&mut self, id: HandleId, point: Point3d, _: Vec3, _: Rgba) -> Point3d {
            self.calls += 1;
            let scripted = match id.0 % 3 {
                1 => self.top,
                _ => self.bottom,
            };
            scripted.map_or(point, Point3d::on_axis)
        }

        fn focused_handle(&self) -> Option<HandleId> {
            self.focus
        }

        fn view(&self) -> ViewState {
            ViewState::default()
        }
    }

    struct Sink;

    impl OutlineRenderer for Sink {
        fn draw_line_loop(&mut self, _: &[Point3d], _: usize, _: usize, _: &LineStyle) {}
        fn draw_line(&mut self, _: Point3d, _: Point3d, _: &LineStyle) {}
    }

    #[derive(Default)]
    struct Labels(Vec<String>);

    impl UndoRecorder for Labels {
        fn record(&mut self, label: &str, _: Uuid, _: &ShapeDefinition) {
            self.0.push(label.to_owned());
        }
    }

    fn tick(editor: &mut CapsuleEditor, instance: &mut ShapeInstance, host: &mut Scripted) -> (TickOutcome, Labels) {
        let mut undo = Labels::default();
        let mut sink = Sink;
        let mut ctx = SceneContext::new(host, &mut sink, &mut undo);
        let outcome = editor.on_scene(instance, &mut ctx);
        (outcome, undo)
    }

    fn editor() -> CapsuleEditor {
        CapsuleEditor::new(EditorConfig::default())
    }

    fn capsule(instance: &ShapeInstance) -> &CapsuleDefinition {
        instance.definition.as_capsule().unwrap()
    }

    #[test]
    fn untouched_handles_commit_nothing() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition::default());
        let original = instance.definition.clone();
        let mut host = Scripted::default();

        let (outcome, undo) = tick(&mut editor, &mut instance, &mut host);
        assert_eq!(outcome, TickOutcome::Unchanged);
        assert!(undo.0.is_empty());
        assert_eq!(instance.definition, original);
        assert_eq!(host.calls, 3);
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn top_handle_changes_height_only() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition::default());
        let mut host = Scripted {
            top: Some(3.0),
            ..Scripted::default()
        };

        let (outcome, undo) = tick(&mut editor, &mut instance, &mut host);
        assert!(outcome.is_committed());
        assert_eq!(undo.0, vec!["Modified Capsule".to_owned()]);
        let def = capsule(&instance);
        assert_relative_eq!(def.height, 3.0);
        assert_relative_eq!(def.offset_y, 0.0);
        assert_relative_eq!(def.diameter_x, 1.0);
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn bottom_handle_moves_offset_and_height() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition::default());
        let mut host = Scripted {
            bottom: Some(-1.0),
            ..Scripted::default()
        };

        tick(&mut editor, &mut instance, &mut host);
        let def = capsule(&instance);
        assert_relative_eq!(def.offset_y, -1.0);
        assert_relative_eq!(def.height, 3.0);
    }

    #[test]
    fn focus_on_own_handle_is_dragging() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition::default());
        let mut host = Scripted {
            focus: Some(editor.handles().id(HandleRole::Radius)),
            ..Scripted::default()
        };
        tick(&mut editor, &mut instance, &mut host);
        assert_eq!(editor.state(), EditState::Dragging);

        host.focus = Some(HandleId(99));
        tick(&mut editor, &mut instance, &mut host);
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn degenerate_definition_skips_tick() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition {
            diameter_x: 1e-9,
            ..CapsuleDefinition::default()
        });
        let original = instance.definition.clone();
        let mut host = Scripted {
            radius: Some(4.0),
            ..Scripted::default()
        };

        let (outcome, undo) = tick(&mut editor, &mut instance, &mut host);
        assert!(outcome.is_skipped());
        assert_eq!(host.calls, 0);
        assert!(undo.0.is_empty());
        assert_eq!(instance.definition, original);
        assert!(editor.vertices().is_empty());
    }

    #[test]
    fn negative_height_puts_top_below_bottom() {
        let def = CapsuleDefinition {
            height: -2.0,
            ..CapsuleDefinition::default()
        };
        let snapshot = HandleSnapshot::of(&def);
        assert_relative_eq!(snapshot.top_y, -2.0);
        assert_relative_eq!(snapshot.bottom_y, 0.0);
    }

    #[test]
    fn radius_edit_keeps_height_bits() {
        let mut def = CapsuleDefinition {
            height: 0.1 + 0.2,
            offset_y: 0.7,
            ..CapsuleDefinition::default()
        };
        let before = HandleSnapshot::of(&def);
        let after = HandleSnapshot {
            radius: 2.0,
            ..before
        };
        let height = def.height;
        apply_handle_edit(&mut def, &before, &after);
        assert_eq!(def.height.to_bits(), height.to_bits());
        assert_eq!(def.diameter_x, def.diameter_z);
        assert_relative_eq!(def.diameter_x, 4.0);
    }

    #[test]
    fn reset_clears_buffer() {
        let mut editor = editor();
        let mut instance = ShapeInstance::capsule(CapsuleDefinition::default());
        tick(&mut editor, &mut instance, &mut Scripted::default());
        assert!(!editor.vertices().is_empty());
        editor.reset();
        assert!(editor.vertices().is_empty());
        assert_eq!(editor.state(), EditState::Idle);
    }
}
