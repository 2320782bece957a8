//! Reversible actions and the undo/redo stack.
//!
//! Every state change during play is expressed as an [`Action`] carrying
//! enough data to apply itself forward and backward exactly. A turn bundles
//! its actions into a [`CompositeAction`]; the [`ActionStack`] holds executed
//! composites for undo and undone ones for redo.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Entity, EntityId, TypeId};
use crate::grid::{LevelMap, Position};

/// A single reversible mutation of the level map.
///
/// Create-like variants carry pre-allocated ids so that redo re-creates the
/// exact same entity the original execution did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Relocate an entity. Facing is unchanged by movement.
    Move {
        entity: EntityId,
        from: Position,
        to: Position,
    },
    /// Bring a new entity into existence.
    Create {
        entity: EntityId,
        type_id: TypeId,
        direction: Direction,
        at: Position,
    },
    /// Remove an entity, remembering everything needed to restore it.
    Destroy {
        entity: EntityId,
        type_id: TypeId,
        direction: Direction,
        at: Position,
    },
    /// Replace an entity with a fresh one of another type, in place.
    Transform {
        entity: EntityId,
        replacement: EntityId,
        from_type: TypeId,
        to_type: TypeId,
        at: Position,
        direction: Direction,
    },
    /// Change an entity's facing direction.
    Rotate {
        entity: EntityId,
        from: Direction,
        to: Direction,
    },
}

impl Action {
    /// Apply the action to the map.
    pub fn execute(&self, map: &mut LevelMap) {
        match *self {
            Action::Move { entity, to, .. } => map.set_position(entity, to),
            Action::Create {
                entity,
                type_id,
                direction,
                at,
            } => map.insert(
                Entity {
                    id: entity,
                    type_id,
                    direction,
                },
                at,
            ),
            Action::Destroy { entity, .. } => {
                map.remove(entity);
            }
            Action::Transform {
                entity,
                replacement,
                to_type,
                at,
                direction,
                ..
            } => {
                map.remove(entity);
                map.insert(
                    Entity {
                        id: replacement,
                        type_id: to_type,
                        direction,
                    },
                    at,
                );
            }
            Action::Rotate { entity, to, .. } => map.set_direction(entity, to),
        }
    }

    /// Apply the exact inverse of the action.
    pub fn undo(&self, map: &mut LevelMap) {
        match *self {
            Action::Move { entity, from, .. } => map.set_position(entity, from),
            Action::Create { entity, .. } => {
                map.remove(entity);
            }
            Action::Destroy {
                entity,
                type_id,
                direction,
                at,
            } => map.insert(
                Entity {
                    id: entity,
                    type_id,
                    direction,
                },
                at,
            ),
            Action::Transform {
                entity,
                replacement,
                from_type,
                at,
                direction,
                ..
            } => {
                map.remove(replacement);
                map.insert(
                    Entity {
                        id: entity,
                        type_id: from_type,
                        direction,
                    },
                    at,
                );
            }
            Action::Rotate { entity, from, .. } => map.set_direction(entity, from),
        }
    }
}

/// Which kinds of action a composite contained; reported to callers so a
/// frontend can pick sounds or animations without inspecting the actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCategories {
    pub moved: bool,
    pub created: bool,
    pub destroyed: bool,
    pub transformed: bool,
    pub rotated: bool,
}

/// An ordered batch of actions executed and undone as a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeAction {
    actions: Vec<Action>,
}

impl CompositeAction {
    /// Create an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Append all actions of another composite, preserving order.
    pub fn combine(&mut self, other: CompositeAction) {
        self.actions.extend(other.actions);
    }

    /// Whether the composite holds no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The contained actions, in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Apply all actions in order.
    pub fn execute(&self, map: &mut LevelMap) {
        for action in &self.actions {
            action.execute(map);
        }
    }

    /// Apply the inverse of every action, in reverse order.
    pub fn undo(&self, map: &mut LevelMap) {
        for action in self.actions.iter().rev() {
            action.undo(map);
        }
    }

    /// Summarize which action kinds occurred.
    #[must_use]
    pub fn categories(&self) -> ActionCategories {
        let mut categories = ActionCategories::default();
        for action in &self.actions {
            match action {
                Action::Move { .. } => categories.moved = true,
                Action::Create { .. } => categories.created = true,
                Action::Destroy { .. } => categories.destroyed = true,
                Action::Transform { .. } => categories.transformed = true,
                Action::Rotate { .. } => categories.rotated = true,
            }
        }
        categories
    }
}

/// Two-stack undo/redo history of executed composites.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionStack {
    undo: Vec<CompositeAction>,
    redo: Vec<CompositeAction>,
}

impl ActionStack {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly executed composite. Clears the redo stack: history
    /// is linear, a new turn forks away any undone future.
    pub fn record(&mut self, action: CompositeAction) {
        self.undo.push(action);
        self.redo.clear();
    }

    /// Undo the most recent composite, if any. Returns whether anything
    /// happened.
    pub fn undo(&mut self, map: &mut LevelMap) -> bool {
        match self.undo.pop() {
            Some(action) => {
                action.undo(map);
                self.redo.push(action);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone composite, if any. Returns whether
    /// anything happened.
    pub fn redo(&mut self, map: &mut LevelMap) -> bool {
        match self.redo.pop() {
            Some(action) => {
                action.execute(map);
                self.undo.push(action);
                true
            }
            None => false,
        }
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of composites available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of composites available to redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
