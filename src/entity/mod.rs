//! Movable units on the grid.
//!
//! An entity has two positions: the logical cell it occupies, which the movement rules work with, and a visual
//! position that renderers draw from and that eases toward the logical one every frame.

pub mod arena;

use std::fmt;

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter};

pub use arena::EntityArena;

/// Stable handle to an entity in an [`EntityArena`]. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// The arena slot this handle addresses.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tag denoting the type of entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Player,
    Crate,
}

impl EntityKind {
    /// Returns the capability flags an entity of this kind is spawned with.
    pub fn default_flags(&self) -> EntityFlags {
        match self {
            EntityKind::Player => EntityFlags::PUSHER,
            EntityKind::Crate => EntityFlags::PUSHABLE,
        }
    }
}

bitflags! {
    /// What an entity is allowed to do during movement resolution.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct EntityFlags: u8 {
        /// May shove whatever stands in its way.
        const PUSHER = 1 << 0;
        /// May be shoved by a pusher.
        const PUSHABLE = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub kind: EntityKind,
    pub flags: EntityFlags,
    /// Logical cell. Only meaningful while `placed` is set.
    pub(crate) position: IVec2,
    /// Presentation position in cell units. Not constrained to integers.
    pub visual: Vec2,
    pub(crate) placed: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            flags: kind.default_flags(),
            position: IVec2::ZERO,
            visual: Vec2::ZERO,
            placed: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The authoritative grid cell of this entity.
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Whether a grid cell currently references this entity.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_pusher(&self) -> bool {
        self.flags.contains(EntityFlags::PUSHER)
    }

    pub fn is_pushable(&self) -> bool {
        self.flags.contains(EntityFlags::PUSHABLE)
    }

    /// Snaps the visual position onto the logical one, skipping any easing.
    pub fn snap_visual(&mut self) {
        self.visual = self.position.as_vec2();
    }
}
