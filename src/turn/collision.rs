//! Collision resolution: turning movement intents into actions.
//!
//! Intents are grouped by direction and each group is resolved front-first
//! against a speculative clone of the map, so a mover sees the cells its
//! predecessors in the same group already vacated. The real map is only
//! touched when the orchestrator executes the returned composite.

use crate::core::{Direction, EntityId, Property, TypeRegistry};
use crate::eval::RuleEvaluator;
use crate::grid::LevelMap;
use crate::rules::Ruleset;

use super::intent::MoveIntent;
use crate::actions::{Action, CompositeAction};

/// Resolves movement intents into a reversible action batch.
pub struct CollisionResolver<'a> {
    registry: &'a TypeRegistry,
    rules: &'a Ruleset,
}

impl<'a> CollisionResolver<'a> {
    /// Borrow the registry and active ruleset for this resolution pass.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, rules: &'a Ruleset) -> Self {
        Self { registry, rules }
    }

    /// Resolve all intents against the given map state.
    ///
    /// Nothing is applied to `map`; the caller executes the returned
    /// composite.
    #[must_use]
    pub fn resolve(&self, intents: &[MoveIntent], map: &LevelMap) -> CompositeAction {
        let mut out = CompositeAction::new();
        for batch_direction in Direction::ALL {
            let mut batch: Vec<&MoveIntent> = intents
                .iter()
                .filter(|intent| intent.direction == batch_direction)
                .collect();
            if batch.is_empty() {
                continue;
            }
            // Front-first: movers closest to where the group is heading go
            // first, so a follower steps into a freshly vacated cell.
            batch.sort_by_key(|intent| {
                let pos = map.position(intent.entity);
                let rank = match batch_direction {
                    Direction::Up => pos.y,
                    Direction::Down => -pos.y,
                    Direction::Left => pos.x,
                    Direction::Right => -pos.x,
                };
                (rank, intent.entity)
            });

            let mut working = map.clone();
            for intent in batch {
                // Autonomous movers re-read their facing: a bounce earlier in
                // the batch redirects them.
                let direction = if intent.autonomous {
                    working.entity(intent.entity).direction
                } else {
                    intent.direction
                };
                if self.try_push(intent.entity, direction, &mut out, &mut working) {
                    let from = working.position(intent.entity);
                    let to = from.step(direction);
                    out.push(Action::Move {
                        entity: intent.entity,
                        from,
                        to,
                    });
                    working.set_position(intent.entity, to);
                } else {
                    self.handle_stop(intent, direction, &mut out, &mut working);
                }
            }
        }
        out
    }

    /// Whether `entity` can advance one cell in `direction`, pushing whatever
    /// stands in the way. Pushed movement is recorded in `out` and mirrored
    /// into `working`; the mover's own step is the caller's job.
    fn try_push(
        &self,
        entity: EntityId,
        direction: Direction,
        out: &mut CompositeAction,
        working: &mut LevelMap,
    ) -> bool {
        let target = working.position(entity).step(direction);
        if !working.in_bounds(target) {
            return false;
        }

        let pushable: Vec<EntityId> = {
            let evaluator = RuleEvaluator::new(self.registry, working, self.rules);
            let mut pushable = Vec::new();
            for occupant in working.entities_at(target) {
                let push = evaluator.has_property(occupant, Property::Push);
                if !push && evaluator.has_property(occupant, Property::Stop) {
                    return false;
                }
                if push {
                    pushable.push(occupant);
                }
            }
            pushable
        };
        let Some(&lead) = pushable.first() else {
            return true;
        };

        // The whole stack at the target cell moves or nothing does.
        if !self.try_push(lead, direction, out, working) {
            return false;
        }
        for occupant in pushable {
            let from = working.position(occupant);
            let to = from.step(direction);
            out.push(Action::Move {
                entity: occupant,
                from,
                to,
            });
            working.set_position(occupant, to);
        }
        true
    }

    /// A blocked move. Autonomous movers turn around and immediately try the
    /// opposite cell; player movers just turn to face where they tried to go.
    fn handle_stop(
        &self,
        intent: &MoveIntent,
        direction: Direction,
        out: &mut CompositeAction,
        working: &mut LevelMap,
    ) {
        if intent.autonomous {
            let opposite = direction.opposite();
            let facing = working.entity(intent.entity).direction;
            if facing != opposite {
                out.push(Action::Rotate {
                    entity: intent.entity,
                    from: facing,
                    to: opposite,
                });
                working.set_direction(intent.entity, opposite);
            }
            if self.try_push(intent.entity, opposite, out, working) {
                let from = working.position(intent.entity);
                let to = from.step(opposite);
                out.push(Action::Move {
                    entity: intent.entity,
                    from,
                    to,
                });
                working.set_position(intent.entity, to);
            }
        } else {
            let facing = working.entity(intent.entity).direction;
            if facing != direction {
                out.push(Action::Rotate {
                    entity: intent.entity,
                    from: facing,
                    to: direction,
                });
                working.set_direction(intent.entity, direction);
            }
        }
    }
}
