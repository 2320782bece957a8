//! Movement intents.

use crate::core::{Direction, EntityId};

/// A request for one entity to move one cell this turn.
///
/// Player intents carry the input direction; autonomous intents (MOVE
/// entities) re-read the entity's facing at resolution time, so an earlier
/// bounce in the same batch is respected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    pub entity: EntityId,
    pub direction: Direction,
    pub autonomous: bool,
}

impl MoveIntent {
    /// A player-driven intent.
    #[must_use]
    pub fn player(entity: EntityId, direction: Direction) -> Self {
        Self {
            entity,
            direction,
            autonomous: false,
        }
    }

    /// An autonomous (MOVE rule) intent.
    #[must_use]
    pub fn autonomous(entity: EntityId, direction: Direction) -> Self {
        Self {
            entity,
            direction,
            autonomous: true,
        }
    }
}
