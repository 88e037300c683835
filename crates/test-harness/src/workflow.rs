//! EditSession: fluent API for scripting handle drags in tests.
//!
//! Drives the real `EditorArena` and `UndoStack` against scripted host
//! doubles. Instances are addressed by name instead of UUID.

use std::collections::HashMap;

use capsule_editor::{
    EditorArena, EditorConfig, EditorKey, HandleId, HandleRole, SceneContext, ShapeEditor,
    TickOutcome, UndoStack,
};
use capsule_types::{CapsuleDefinition, ShapeInstance, ShapeKind};

use crate::helpers::*;

/// A scene of named capsule instances with one editor each.
pub struct EditSession {
    pub arena: EditorArena,
    pub undo: UndoStack,
    pub handles: ScriptedHandles,
    pub outline: RecordingOutline,
    instances: Vec<ShapeInstance>,
    names: HashMap<String, usize>,
    commits: usize,
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            arena: EditorArena::new(config),
            undo: UndoStack::new(),
            handles: ScriptedHandles::new(),
            outline: RecordingOutline::new(),
            instances: Vec::new(),
            names: HashMap::new(),
            commits: 0,
        }
    }

    // ── Scene ───────────────────────────────────────────────────────────

    /// Add a capsule and create its editor.
    pub fn add_capsule(
        &mut self,
        name: &str,
        definition: CapsuleDefinition,
    ) -> Result<&mut Self, HarnessError> {
        self.add(name, ShapeInstance::capsule(definition))
    }

    /// Add an instance through the "create" command of its kind.
    pub fn create(&mut self, name: &str, kind: ShapeKind) -> Result<&mut Self, HarnessError> {
        self.add(name, ShapeInstance::create(kind))
    }

    fn add(&mut self, name: &str, instance: ShapeInstance) -> Result<&mut Self, HarnessError> {
        if self.names.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.arena.editor_for(&instance);
        self.names.insert(name.to_string(), self.instances.len());
        self.instances.push(instance);
        Ok(self)
    }

    pub fn instance(&self, name: &str) -> Result<&ShapeInstance, HarnessError> {
        let index = self.index(name)?;
        Ok(&self.instances[index])
    }

    pub fn capsule(&self, name: &str) -> Result<&CapsuleDefinition, HarnessError> {
        self.instance(name)?
            .definition
            .as_capsule()
            .ok_or_else(|| HarnessError::AssertionFailed {
                detail: format!("{name} is not a capsule"),
            })
    }

    pub fn editor(&self, name: &str) -> Result<&ShapeEditor, HarnessError> {
        let key = self.key(name)?;
        self.arena.get(key).ok_or_else(|| HarnessError::InstanceNotFound {
            name: name.to_string(),
        })
    }

    pub fn handle_id(&self, name: &str, role: HandleRole) -> Result<HandleId, HarnessError> {
        Ok(self.editor(name)?.handles().id(role))
    }

    fn index(&self, name: &str) -> Result<usize, HarnessError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::InstanceNotFound {
                name: name.to_string(),
            })
    }

    fn key(&self, name: &str) -> Result<EditorKey, HarnessError> {
        let id = self.instance(name)?.id;
        self.arena
            .key_of(id)
            .ok_or_else(|| HarnessError::InstanceNotFound {
                name: name.to_string(),
            })
    }

    // ── Scripted Interaction ────────────────────────────────────────────

    /// Make the next ticks return `radius` from the radius handle of `name`.
    pub fn drag_radius(&mut self, name: &str, radius: f64) -> Result<&mut Self, HarnessError> {
        let id = self.handle_id(name, HandleRole::Radius)?;
        self.handles.script_radius(id, radius).focus(Some(id));
        Ok(self)
    }

    pub fn drag_top(&mut self, name: &str, y: f64) -> Result<&mut Self, HarnessError> {
        let id = self.handle_id(name, HandleRole::TopDirection)?;
        self.handles.script_height(id, y).focus(Some(id));
        Ok(self)
    }

    pub fn drag_bottom(&mut self, name: &str, y: f64) -> Result<&mut Self, HarnessError> {
        let id = self.handle_id(name, HandleRole::BottomDirection)?;
        self.handles.script_height(id, y).focus(Some(id));
        Ok(self)
    }

    /// Stop scripting handle values and drop focus.
    pub fn release(&mut self) -> &mut Self {
        self.handles.clear();
        self.handles.focus(None);
        self
    }

    // ── Ticks ───────────────────────────────────────────────────────────

    /// Run one tick for `name`, recording drawn output from scratch.
    pub fn tick(&mut self, name: &str) -> Result<TickOutcome, HarnessError> {
        let index = self.index(name)?;
        self.outline.clear();
        self.handles.calls.clear();
        let mut ctx = SceneContext::new(&mut self.handles, &mut self.outline, &mut self.undo);
        let outcome = self.arena.visualize(&mut self.instances[index], &mut ctx);
        if outcome.is_committed() {
            self.commits += 1;
        }
        Ok(outcome)
    }

    /// Run one tick for `name` and fail if it was skipped.
    pub fn tick_ok(&mut self, name: &str) -> Result<TickOutcome, HarnessError> {
        match self.tick(name)? {
            TickOutcome::Skipped(source) => Err(HarnessError::Skipped {
                name: name.to_string(),
                source,
            }),
            outcome => Ok(outcome),
        }
    }

    /// Run one tick for every instance in insertion order.
    pub fn tick_all(&mut self) -> Vec<TickOutcome> {
        self.outline.clear();
        self.handles.calls.clear();
        let mut ctx = SceneContext::new(&mut self.handles, &mut self.outline, &mut self.undo);
        let outcomes = self.arena.visualize_all(&mut self.instances, &mut ctx);
        self.commits += outcomes.iter().filter(|o| o.is_committed()).count();
        outcomes
    }

    /// Commits observed since the session started.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    // ── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self, name: &str) -> Result<&mut Self, HarnessError> {
        let index = self.index(name)?;
        match self.undo.undo(&mut self.instances[index]) {
            Some(_) => Ok(self),
            None => Err(HarnessError::AssertionFailed {
                detail: format!("nothing to undo for {name}"),
            }),
        }
    }

    pub fn redo(&mut self, name: &str) -> Result<&mut Self, HarnessError> {
        let index = self.index(name)?;
        match self.undo.redo(&mut self.instances[index]) {
            Some(_) => Ok(self),
            None => Err(HarnessError::AssertionFailed {
                detail: format!("nothing to redo for {name}"),
            }),
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
