//! Rule evaluator: property, transformation, and win queries.

use rustc_hash::FxHashSet;

use crate::core::{EntityId, Property, TypeRegistry, VerbKind};
use crate::grid::{LevelMap, Position};
use crate::rules::{Effect, Rule, Ruleset, Transformation};

use super::conditions::ConditionEvaluator;
use super::inheritance::InheritanceResolver;

/// Read-only queries over the grid and the active ruleset.
///
/// Constructed cheaply wherever needed; during push resolution it is rebuilt
/// against the speculative working map.
pub struct RuleEvaluator<'a> {
    registry: &'a TypeRegistry,
    map: &'a LevelMap,
    rules: &'a Ruleset,
}

impl<'a> RuleEvaluator<'a> {
    /// Borrow the current world state for rule queries.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, map: &'a LevelMap, rules: &'a Ruleset) -> Self {
        Self {
            registry,
            map,
            rules,
        }
    }

    /// Whether the entity matches the rule's subject (through inheritance)
    /// and satisfies all of its conditions.
    #[must_use]
    pub fn matches_rule(&self, entity: EntityId, rule: &Rule) -> bool {
        let resolver = InheritanceResolver::new(self.registry, self.map, self.rules);
        if !resolver.is_instance_of(entity, rule.subject) {
            return false;
        }
        ConditionEvaluator::new(self.registry, self.map, self.rules)
            .evaluate(entity, &rule.conditions)
    }

    /// Whether the entity currently has the given property.
    ///
    /// Word tiles have PUSH implicitly, regardless of rules.
    #[must_use]
    pub fn has_property(&self, entity: EntityId, property: Property) -> bool {
        if property == Property::Push && self.registry.is_text(self.map.entity(entity).type_id) {
            return true;
        }
        self.rules
            .rules()
            .iter()
            .filter(|rule| rule.effect == Effect::Property(property))
            .any(|rule| self.matches_rule(entity, rule))
    }

    /// All entities on the map with the given property, in id order.
    #[must_use]
    pub fn entities_with_property(&self, property: Property) -> Vec<EntityId> {
        self.map
            .ids()
            .into_iter()
            .filter(|&id| self.has_property(id, property))
            .collect()
    }

    /// Entities at one cell with the given property, in stacking order.
    #[must_use]
    pub fn entities_with_property_at(&self, property: Property, pos: Position) -> Vec<EntityId> {
        self.map
            .entities_at(pos)
            .filter(|&id| self.has_property(id, property))
            .collect()
    }

    /// Whether any entity at the cell has the property.
    #[must_use]
    pub fn has_property_at(&self, property: Property, pos: Position) -> bool {
        self.map
            .entities_at(pos)
            .any(|id| self.has_property(id, property))
    }

    /// All "X IS Y" transformations pending this turn (Y not a property).
    ///
    /// An entity that also matches an "X IS X" identity rule is exempt. When
    /// several transform rules target one entity, the first matching rule in
    /// ruleset order wins; an entity transforms at most once per turn.
    #[must_use]
    pub fn transformations(&self) -> Vec<Transformation> {
        let transform_rules: Vec<&Rule> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| rule.verb == VerbKind::Is && matches!(rule.effect, Effect::Type(_)))
            .collect();

        // Entities pinned by a self-identity rule.
        let mut pinned: FxHashSet<EntityId> = FxHashSet::default();
        for rule in &transform_rules {
            let Effect::Type(target) = rule.effect else {
                continue;
            };
            for id in self.map.ids() {
                if self.map.entity(id).type_id == target && self.matches_rule(id, rule) {
                    pinned.insert(id);
                }
            }
        }

        let mut claimed: FxHashSet<EntityId> = FxHashSet::default();
        let mut out = Vec::new();
        for rule in &transform_rules {
            let Effect::Type(target) = rule.effect else {
                continue;
            };
            for id in self.map.ids() {
                if pinned.contains(&id) || claimed.contains(&id) {
                    continue;
                }
                if self.matches_rule(id, rule) {
                    claimed.insert(id);
                    out.push(Transformation { source: id, target });
                }
            }
        }
        out
    }

    /// All "X HAS Y" spawn pairs pending this turn, without identity
    /// suppression.
    #[must_use]
    pub fn has_transformations(&self) -> Vec<Transformation> {
        let mut out = Vec::new();
        for rule in self.rules.rules() {
            if rule.verb != VerbKind::Has {
                continue;
            }
            let Effect::Type(target) = rule.effect else {
                continue;
            };
            for id in self.map.ids() {
                if self.matches_rule(id, rule) {
                    out.push(Transformation { source: id, target });
                }
            }
        }
        out
    }

    /// Cells where a WIN entity shares the cell with a YOU entity, sorted
    /// and deduplicated.
    #[must_use]
    pub fn win_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .entities_with_property(Property::Win)
            .into_iter()
            .map(|id| self.map.position(id))
            .filter(|&pos| self.has_property_at(Property::You, pos))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}
