use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capsule::CapsuleDefinition;
use crate::limits::ShapeLimits;

/// The closed set of primitive kinds an editor can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Capsule,
}

impl ShapeKind {
    /// User-visible node type name, also used in undo labels.
    pub fn node_type_name(self) -> &'static str {
        match self {
            ShapeKind::Capsule => "Capsule",
        }
    }
}

/// Parametric state of a primitive, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeDefinition {
    Capsule(CapsuleDefinition),
}

impl ShapeDefinition {
    /// Default definition for a newly created primitive of `kind`.
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Capsule => ShapeDefinition::Capsule(CapsuleDefinition::default()),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeDefinition::Capsule(_) => ShapeKind::Capsule,
        }
    }

    pub fn node_type_name(&self) -> &'static str {
        self.kind().node_type_name()
    }

    pub fn revalidate(&mut self, limits: &ShapeLimits) {
        match self {
            ShapeDefinition::Capsule(capsule) => capsule.revalidate(limits),
        }
    }

    pub fn as_capsule(&self) -> Option<&CapsuleDefinition> {
        match self {
            ShapeDefinition::Capsule(capsule) => Some(capsule),
        }
    }
}

/// A host-owned primitive: its identity, definition and clamping limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub id: Uuid,
    pub definition: ShapeDefinition,
    pub limits: ShapeLimits,
}

impl ShapeInstance {
    pub fn new(definition: ShapeDefinition) -> Self {
        Self {
            id: Uuid::new_v4(),
            definition,
            limits: ShapeLimits::default(),
        }
    }

    /// Create a primitive with the default definition for `kind`.
    pub fn create(kind: ShapeKind) -> Self {
        Self::new(ShapeDefinition::default_for(kind))
    }

    pub fn capsule(definition: CapsuleDefinition) -> Self {
        Self::new(ShapeDefinition::Capsule(definition))
    }

    pub fn node_type_name(&self) -> &'static str {
        self.definition.node_type_name()
    }

    /// Clamp and repair the definition in place against this instance's limits.
    pub fn revalidate(&mut self) {
        self.definition.revalidate(&self.limits);
    }
}
