//! Inheritance resolver: instance-of queries over EXTEND rules.

use rustc_hash::FxHashSet;

use crate::core::{EntityId, TypeId, TypeRegistry, VerbKind};
use crate::grid::LevelMap;
use crate::rules::{Effect, Rule, Ruleset};

use super::conditions::ConditionEvaluator;

/// Answers `is_instance_of` by walking the directed graph of active EXTEND
/// rules from the entity's own type.
///
/// An EXTEND edge is only traversable if the specific entity instance
/// currently satisfies the rule's conditions. A visited-type set guards
/// against cycles: `A EXTEND B` plus `B EXTEND A` makes the two types
/// mutually instance-of each other, and the search terminates regardless.
pub struct InheritanceResolver<'a> {
    registry: &'a TypeRegistry,
    map: &'a LevelMap,
    rules: &'a Ruleset,
}

impl<'a> InheritanceResolver<'a> {
    /// Borrow the current world state for inheritance queries.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, map: &'a LevelMap, rules: &'a Ruleset) -> Self {
        Self {
            registry,
            map,
            rules,
        }
    }

    /// Whether the entity is a (direct or inherited) instance of the target
    /// type.
    #[must_use]
    pub fn is_instance_of(&self, entity: EntityId, target: TypeId) -> bool {
        let extends: Vec<&Rule> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| rule.verb == VerbKind::Extend)
            .collect();
        let mut visited = FxHashSet::default();
        self.search(
            entity,
            self.map.entity(entity).type_id,
            target,
            &extends,
            &mut visited,
        )
    }

    fn search(
        &self,
        entity: EntityId,
        current: TypeId,
        target: TypeId,
        extends: &[&Rule],
        visited: &mut FxHashSet<TypeId>,
    ) -> bool {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            return false;
        }
        for rule in extends {
            if rule.subject != current {
                continue;
            }
            let Effect::Type(next) = rule.effect else {
                continue;
            };
            if visited.contains(&next) {
                continue;
            }
            let conditions = ConditionEvaluator::new(self.registry, self.map, self.rules);
            if !conditions.evaluate(entity, &rule.conditions) {
                continue;
            }
            if self.search(entity, next, target, extends, visited) {
                return true;
            }
        }
        false
    }
}
