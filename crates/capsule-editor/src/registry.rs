use capsule_types::{ShapeDefinition, ShapeInstance, ShapeKind};

use crate::config::EditorConfig;
use crate::controller::{CapsuleEditor, SceneContext, TickOutcome};
use crate::handles::HandleRegistry;

/// An editor for any supported primitive kind.
#[derive(Debug)]
pub enum ShapeEditor {
    Capsule(CapsuleEditor),
}

impl ShapeEditor {
    pub fn for_kind(kind: ShapeKind, config: EditorConfig, handles: HandleRegistry) -> Self {
        match kind {
            ShapeKind::Capsule => ShapeEditor::Capsule(CapsuleEditor::with_handles(config, handles)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeEditor::Capsule(_) => ShapeKind::Capsule,
        }
    }

    pub fn node_type_name(&self) -> &'static str {
        self.kind().node_type_name()
    }

    /// Default definition for the editor's "create" command.
    pub fn create_definition(&self) -> ShapeDefinition {
        match self {
            ShapeEditor::Capsule(_) => CapsuleEditor::create_definition(),
        }
    }

    pub fn handles(&self) -> &HandleRegistry {
        match self {
            ShapeEditor::Capsule(editor) => editor.handles(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            ShapeEditor::Capsule(editor) => editor.reset(),
        }
    }

    pub fn on_scene(&mut self, instance: &mut ShapeInstance, ctx: &mut SceneContext<'_>) -> TickOutcome {
        match self {
            ShapeEditor::Capsule(editor) => editor.on_scene(instance, ctx),
        }
    }

    pub fn as_capsule(&self) -> Option<&CapsuleEditor> {
        match self {
            ShapeEditor::Capsule(editor) => Some(editor),
        }
    }
}
