//! Entity identity and instance data.
//!
//! Every object on the grid — ordinary things and word tiles alike — is an
//! `Entity`: a stable id, an immutable type, and a mutable facing direction.
//! Ids are allocated by the [`LevelMap`](crate::grid::LevelMap) and never
//! reused, so entities compare by identity rather than by value.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::types::TypeId;

/// Unique identifier for a grid entity.
///
/// Ids are never reused within a level; an action that destroys an entity and
/// an action that later re-creates it (undo) refer to the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// An entity instance on the grid.
///
/// The type reference is immutable for the life of the entity; a
/// transformation destroys the old entity and creates a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identity.
    pub id: EntityId,
    /// The entity's type, resolved through the [`TypeRegistry`](crate::core::TypeRegistry).
    pub type_id: TypeId,
    /// Current facing direction.
    pub direction: Direction,
}

impl Entity {
    /// Create an entity facing the default direction (down).
    #[must_use]
    pub fn new(id: EntityId, type_id: TypeId) -> Self {
        Self {
            id,
            type_id,
            direction: Direction::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_facing_is_down() {
        let entity = Entity::new(EntityId(7), TypeId(0));
        assert_eq!(entity.direction, Direction::Down);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_ids_order_by_raw_value() {
        assert!(EntityId(1) < EntityId(2));
    }
}
