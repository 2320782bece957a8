//! Condition evaluator: per-entity spatial predicates.

use crate::core::{ConditionKind, EntityId, TypeRegistry};
use crate::grid::{LevelMap, Position};
use crate::rules::{Condition, Ruleset};

use super::inheritance::InheritanceResolver;

/// Evaluates a rule's condition list against one entity. Conditions are
/// ANDed; an empty list is trivially satisfied.
pub struct ConditionEvaluator<'a> {
    registry: &'a TypeRegistry,
    map: &'a LevelMap,
    rules: &'a Ruleset,
}

impl<'a> ConditionEvaluator<'a> {
    /// Borrow the current world state for condition checks.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, map: &'a LevelMap, rules: &'a Ruleset) -> Self {
        Self {
            registry,
            map,
            rules,
        }
    }

    /// Whether the entity satisfies every condition in the list.
    #[must_use]
    pub fn evaluate(&self, entity: EntityId, conditions: &[Condition]) -> bool {
        conditions
            .iter()
            .all(|condition| self.satisfied(entity, condition))
    }

    fn satisfied(&self, entity: EntityId, condition: &Condition) -> bool {
        match condition.kind {
            ConditionKind::On => {
                self.target_at(entity, condition, self.map.position(entity))
            }
            ConditionKind::Near => {
                // The full 3x3 block around the entity, own cell included.
                let center = self.map.position(entity);
                (-1..=1).any(|dy| {
                    (-1..=1).any(|dx| {
                        let pos = Position::new(center.x + dx, center.y + dy);
                        self.map.in_bounds(pos) && self.target_at(entity, condition, pos)
                    })
                })
            }
            ConditionKind::Facing => {
                let ahead = self
                    .map
                    .position(entity)
                    .step(self.map.entity(entity).direction);
                self.map.in_bounds(ahead) && self.target_at(entity, condition, ahead)
            }
            ConditionKind::InstanceOf => {
                InheritanceResolver::new(self.registry, self.map, self.rules)
                    .is_instance_of(entity, condition.target)
            }
        }
    }

    /// Whether some *other* entity at `pos` is an instance of the condition
    /// target.
    fn target_at(&self, entity: EntityId, condition: &Condition, pos: Position) -> bool {
        let resolver = InheritanceResolver::new(self.registry, self.map, self.rules);
        self.map
            .entities_at(pos)
            .any(|other| other != entity && resolver.is_instance_of(other, condition.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, TypeId};
    use smallvec::SmallVec;

    struct World {
        registry: TypeRegistry,
        map: LevelMap,
        rules: Ruleset,
        fox: TypeId,
        rock: TypeId,
    }

    fn world() -> World {
        let mut registry = TypeRegistry::new();
        let fox = registry.register_plain("fox");
        let rock = registry.register_plain("rock");
        World {
            registry,
            map: LevelMap::new(8, 8),
            rules: Ruleset::new(),
            fox,
            rock,
        }
    }

    fn condition(kind: ConditionKind, target: TypeId) -> Condition {
        Condition {
            kind,
            target,
            condition_text: EntityId(1000),
            parameter_text: EntityId(1001),
        }
    }

    #[test]
    fn test_empty_condition_list_is_satisfied() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(0, 0));
        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        assert!(eval.evaluate(fox, &[]));
    }

    #[test]
    fn test_on_requires_shared_cell() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(2, 2));
        w.map.spawn(w.rock, Position::new(2, 2));
        let lone = w.map.spawn(w.fox, Position::new(5, 5));

        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let on_rock = condition(ConditionKind::On, w.rock);
        assert!(eval.evaluate(fox, std::slice::from_ref(&on_rock)));
        assert!(!eval.evaluate(lone, std::slice::from_ref(&on_rock)));
    }

    #[test]
    fn test_on_excludes_the_entity_itself() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(2, 2));
        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let on_fox = condition(ConditionKind::On, w.fox);
        assert!(!eval.evaluate(fox, std::slice::from_ref(&on_fox)));
    }

    #[test]
    fn test_near_covers_diagonals() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(3, 3));
        w.map.spawn(w.rock, Position::new(4, 4));

        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let near_rock = condition(ConditionKind::Near, w.rock);
        assert!(eval.evaluate(fox, std::slice::from_ref(&near_rock)));
    }

    #[test]
    fn test_near_misses_two_cells_away() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(3, 3));
        w.map.spawn(w.rock, Position::new(3, 5));

        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let near_rock = condition(ConditionKind::Near, w.rock);
        assert!(!eval.evaluate(fox, std::slice::from_ref(&near_rock)));
    }

    #[test]
    fn test_facing_checks_one_cell_ahead() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(3, 3));
        w.map.set_direction(fox, Direction::Right);
        w.map.spawn(w.rock, Position::new(4, 3));
        // Behind the entity, not ahead.
        w.map.spawn(w.rock, Position::new(2, 3));

        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let facing_rock = condition(ConditionKind::Facing, w.rock);
        assert!(eval.evaluate(fox, std::slice::from_ref(&facing_rock)));

        w.map.set_direction(fox, Direction::Up);
        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        assert!(!eval.evaluate(fox, std::slice::from_ref(&facing_rock)));
    }

    #[test]
    fn test_instance_of_without_spatial_component() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(0, 0));
        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        assert!(eval.evaluate(fox, &[condition(ConditionKind::InstanceOf, w.fox)]));
        assert!(!eval.evaluate(fox, &[condition(ConditionKind::InstanceOf, w.rock)]));
    }

    #[test]
    fn test_conditions_are_anded() {
        let mut w = world();
        let fox = w.map.spawn(w.fox, Position::new(2, 2));
        w.map.spawn(w.rock, Position::new(2, 2));

        let eval = ConditionEvaluator::new(&w.registry, &w.map, &w.rules);
        let both: SmallVec<[Condition; 2]> = [
            condition(ConditionKind::On, w.rock),
            condition(ConditionKind::Near, w.fox),
        ]
        .into_iter()
        .collect();
        // ON holds, NEAR fox does not (no second fox around).
        assert!(!eval.evaluate(fox, &both));
    }
}
