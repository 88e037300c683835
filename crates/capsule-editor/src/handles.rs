//! Handle identities and the host's handle primitives.

use capsule_kernel::{Point3d, Vec3};

use crate::color::Rgba;
use crate::facing::ViewState;

/// The three manipulators of a capsule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Radius,
    TopDirection,
    BottomDirection,
}

impl HandleRole {
    pub const ALL: [HandleRole; 3] = [
        HandleRole::Radius,
        HandleRole::TopDirection,
        HandleRole::BottomDirection,
    ];

    fn index(self) -> u32 {
        match self {
            HandleRole::Radius => 0,
            HandleRole::TopDirection => 1,
            HandleRole::BottomDirection => 2,
        }
    }
}

/// Stable handle identity, unique across all editors sharing a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u32);

/// Maps handle roles of one editor onto its block of [`HandleId`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRegistry {
    block: u32,
}

impl HandleRegistry {
    const ROLES: u32 = HandleRole::ALL.len() as u32;

    pub fn new(block: u32) -> Self {
        Self { block }
    }

    pub fn block(&self) -> u32 {
        self.block
    }

    pub fn id(&self, role: HandleRole) -> HandleId {
        HandleId(self.block * Self::ROLES + role.index())
    }

    pub fn role_of(&self, id: HandleId) -> Option<HandleRole> {
        HandleRole::ALL.into_iter().find(|role| self.id(*role) == id)
    }

    pub fn owns(&self, id: HandleId) -> bool {
        self.role_of(id).is_some()
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Interactive handle primitives supplied by the host.
///
/// Each handle call draws the handle and returns its value after this tick's
/// user interaction; an untouched handle returns its input unchanged.
pub trait HandleHost {
    /// Start tracking whether any handle changed during this tick.
    fn begin_change_check(&mut self) {}

    fn radius_handle(
        &mut self,
        id: HandleId,
        axis: Vec3,
        center: Point3d,
        radius: f64,
        color: Rgba,
    ) -> f64;

    fn direction_handle(&mut self, id: HandleId, point: Point3d, axis: Vec3, color: Rgba) -> Point3d;

    /// The handle currently grabbed or hovered by the user.
    fn focused_handle(&self) -> Option<HandleId>;

    fn handles_disabled(&self) -> bool {
        false
    }

    fn view(&self) -> ViewState;
}
