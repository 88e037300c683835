use tracing::debug;
use uuid::Uuid;

use capsule_types::{ShapeDefinition, ShapeInstance};

/// Receives one undo-unit per committed edit, before the mutation.
pub trait UndoRecorder {
    fn record(&mut self, label: &str, target: Uuid, before: &ShapeDefinition);
}

/// A definition snapshot of one instance.
///
/// On the undo stack `definition` holds the state to restore; applying the
/// command swaps it with the live definition, so the same command moves to
/// the redo stack holding the state it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommand {
    pub label: String,
    pub target: Uuid,
    pub definition: ShapeDefinition,
}

impl EditCommand {
    fn apply(&mut self, instance: &mut ShapeInstance) {
        std::mem::swap(&mut self.definition, &mut instance.definition);
    }
}

/// Two-stack undo/redo history of definition snapshots.
#[derive(Debug, Default)]
pub struct UndoStack {
    undo: Vec<EditCommand>,
    redo: Vec<EditCommand>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command onto the undo stack, clearing the redo stack.
    pub fn push(&mut self, cmd: EditCommand) {
        self.undo.push(cmd);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undoable commands.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// The command `undo` would apply next.
    pub fn peek_undo(&self) -> Option<&EditCommand> {
        self.undo.last()
    }

    /// Restore the most recent snapshot if it belongs to `instance`.
    /// Returns the label of the undone command.
    pub fn undo(&mut self, instance: &mut ShapeInstance) -> Option<String> {
        let mut cmd = pop_for(&mut self.undo, instance.id)?;
        cmd.apply(instance);
        debug!(label = %cmd.label, target = %cmd.target, "undo");
        let label = cmd.label.clone();
        self.redo.push(cmd);
        Some(label)
    }

    /// Reapply the most recently undone command if it belongs to `instance`.
    pub fn redo(&mut self, instance: &mut ShapeInstance) -> Option<String> {
        let mut cmd = pop_for(&mut self.redo, instance.id)?;
        cmd.apply(instance);
        debug!(label = %cmd.label, target = %cmd.target, "redo");
        let label = cmd.label.clone();
        self.undo.push(cmd);
        Some(label)
    }
}

fn pop_for(stack: &mut Vec<EditCommand>, target: Uuid) -> Option<EditCommand> {
    if stack.last()?.target != target {
        return None;
    }
    stack.pop()
}

impl UndoRecorder for UndoStack {
    fn record(&mut self, label: &str, target: Uuid, before: &ShapeDefinition) {
        self.push(EditCommand {
            label: label.to_owned(),
            target,
            definition: before.clone(),
        });
    }
}
