//! One editor per visualized instance.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;
use uuid::Uuid;

use capsule_types::ShapeInstance;

use crate::config::EditorConfig;
use crate::controller::{SceneContext, TickOutcome};
use crate::handles::HandleRegistry;
use crate::registry::ShapeEditor;

new_key_type! {
    /// Key of an editor in an [`EditorArena`].
    pub struct EditorKey;
}

#[derive(Debug)]
struct Entry {
    target: Uuid,
    editor: ShapeEditor,
}

/// Editors keyed by the instance they edit.
///
/// Each editor gets its own handle block and vertex buffer, so visualizing
/// several instances in one tick never draws one instance with another's
/// positions.
#[derive(Debug, Default)]
pub struct EditorArena {
    editors: SlotMap<EditorKey, Entry>,
    by_target: HashMap<Uuid, EditorKey>,
    config: EditorConfig,
    next_block: u32,
    /// Handle blocks of released editors, reused before fresh ones.
    free_blocks: Vec<u32>,
}

impl EditorArena {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The editor for `instance`, created on first use.
    pub fn editor_for(&mut self, instance: &ShapeInstance) -> EditorKey {
        if let Some(&key) = self.by_target.get(&instance.id) {
            return key;
        }
        let handles = HandleRegistry::new(self.allocate_block());
        let editor = ShapeEditor::for_kind(instance.definition.kind(), self.config, handles);
        let key = self.editors.insert(Entry {
            target: instance.id,
            editor,
        });
        self.by_target.insert(instance.id, key);
        debug!(target = %instance.id, block = handles.block(), "created editor");
        key
    }

    /// Live editors never share a block, and blocks are recycled on
    /// release, so the block count stays bounded by the live editor count.
    fn allocate_block(&mut self) -> u32 {
        if let Some(block) = self.free_blocks.pop() {
            return block;
        }
        let block = self.next_block;
        self.next_block += 1;
        block
    }

    pub fn get(&self, key: EditorKey) -> Option<&ShapeEditor> {
        self.editors.get(key).map(|entry| &entry.editor)
    }

    pub fn key_of(&self, target: Uuid) -> Option<EditorKey> {
        self.by_target.get(&target).copied()
    }

    /// Run one tick for `instance` with its own editor.
    pub fn visualize(&mut self, instance: &mut ShapeInstance, ctx: &mut SceneContext<'_>) -> TickOutcome {
        let key = self.editor_for(instance);
        self.editors[key].editor.on_scene(instance, ctx)
    }

    /// Run one tick for every instance, each with its own editor, in order.
    pub fn visualize_all(
        &mut self,
        instances: &mut [ShapeInstance],
        ctx: &mut SceneContext<'_>,
    ) -> Vec<TickOutcome> {
        instances
            .iter_mut()
            .map(|instance| self.visualize(instance, ctx))
            .collect()
    }

    /// Drop the editor of a deleted instance.
    pub fn release(&mut self, target: Uuid) -> bool {
        let Some(key) = self.by_target.remove(&target) else {
            return false;
        };
        match self.editors.remove(key) {
            Some(entry) => {
                self.free_blocks.push(entry.editor.handles().block());
                true
            }
            None => false,
        }
    }

    /// Reset every editor, as after an inspector reset.
    pub fn reset_all(&mut self) {
        for entry in self.editors.values_mut() {
            entry.editor.reset();
        }
    }

    pub fn targets(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.editors.values().map(|entry| entry.target)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}
