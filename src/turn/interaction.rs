//! Post-movement interactions.
//!
//! After all movement has settled and rules are re-derived, interactions run
//! in a fixed order: transform, more, sink, defeat, melt, has. All passes are
//! evaluated against the settled map; the returned composite is executed by
//! the orchestrator in one go. A destroyed-entity set keeps overlapping
//! passes (a YOU standing on both SINK and DEFEAT, say) from destroying the
//! same entity twice, and transform sources are never also destroyed.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::actions::{Action, CompositeAction};
use crate::core::{Direction, EntityId, Property, TypeRegistry};
use crate::eval::RuleEvaluator;
use crate::grid::{LevelMap, Position};
use crate::rules::{Ruleset, Transformation};

/// Builds the interaction composite for one turn.
pub struct InteractionHandler<'a> {
    registry: &'a TypeRegistry,
    rules: &'a Ruleset,
}

impl<'a> InteractionHandler<'a> {
    /// Borrow the registry and active ruleset for this pass.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, rules: &'a Ruleset) -> Self {
        Self { registry, rules }
    }

    /// Compute all interactions pending on the map.
    ///
    /// The map is only mutated through its id allocator (created entities
    /// reserve their ids up front); the caller executes the composite.
    #[must_use]
    pub fn handle(&self, map: &mut LevelMap) -> CompositeAction {
        let mut out = CompositeAction::new();
        let mut excluded: FxHashSet<EntityId> = FxHashSet::default();

        self.transform_pass(map, &mut out, &mut excluded);
        self.more_pass(map, &mut out);
        self.sink_pass(map, &mut out, &mut excluded);
        self.defeat_pass(map, &mut out, &mut excluded);
        self.melt_pass(map, &mut out, &mut excluded);
        self.has_pass(map, &mut out);
        out
    }

    /// "X IS Y" with Y a type: replace each matching entity in place.
    fn transform_pass(
        &self,
        map: &mut LevelMap,
        out: &mut CompositeAction,
        excluded: &mut FxHashSet<EntityId>,
    ) {
        let transformations =
            RuleEvaluator::new(self.registry, map, self.rules).transformations();
        for Transformation { source, target } in transformations {
            let entity = *map.entity(source);
            let at = map.position(source);
            let replacement = map.allocate_id();
            out.push(Action::Transform {
                entity: source,
                replacement,
                from_type: entity.type_id,
                to_type: target,
                at,
                direction: entity.direction,
            });
            excluded.insert(source);
        }
    }

    /// MORE entities spread into adjacent cells that hold nothing solid and
    /// no entity of the spreading type.
    fn more_pass(&self, map: &mut LevelMap, out: &mut CompositeAction) {
        let spreaders = {
            let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
            evaluator.entities_with_property(Property::More)
        };
        let mut claimed: FxHashSet<Position> = FxHashSet::default();
        let mut creations: Vec<(Position, crate::core::TypeId)> = Vec::new();
        {
            let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
            for spreader in spreaders {
                let type_id = map.entity(spreader).type_id;
                let center = map.position(spreader);
                for direction in Direction::ALL {
                    let pos = center.step(direction);
                    if !map.in_bounds(pos) || claimed.contains(&pos) {
                        continue;
                    }
                    let blocked = map.entities_at(pos).any(|occupant| {
                        map.entity(occupant).type_id == type_id
                            || evaluator.has_property(occupant, Property::Push)
                            || evaluator.has_property(occupant, Property::Stop)
                    });
                    if blocked {
                        continue;
                    }
                    claimed.insert(pos);
                    creations.push((pos, type_id));
                }
            }
        }
        for (pos, type_id) in creations {
            out.push(Action::Create {
                entity: map.allocate_id(),
                type_id,
                direction: Direction::Down,
                at: pos,
            });
        }
    }

    /// A cell holding a SINK entity and anything else loses everything in it.
    fn sink_pass(
        &self,
        map: &LevelMap,
        out: &mut CompositeAction,
        excluded: &mut FxHashSet<EntityId>,
    ) {
        let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
        let mut sink_cells: Vec<Position> = evaluator
            .entities_with_property(Property::Sink)
            .into_iter()
            .map(|id| map.position(id))
            .collect();
        sink_cells.sort_unstable();
        sink_cells.dedup();

        for cell in sink_cells {
            let occupants: Vec<EntityId> = map
                .entities_at(cell)
                .filter(|id| !excluded.contains(id))
                .collect();
            if occupants.len() < 2 {
                continue;
            }
            if !occupants
                .iter()
                .any(|&id| evaluator.has_property(id, Property::Sink))
            {
                continue;
            }
            for id in occupants {
                self.destroy(map, id, out, excluded);
            }
        }
    }

    /// YOU entities standing on a DEFEAT cell are destroyed.
    fn defeat_pass(
        &self,
        map: &LevelMap,
        out: &mut CompositeAction,
        excluded: &mut FxHashSet<EntityId>,
    ) {
        let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
        for victim in evaluator.entities_with_property(Property::You) {
            if excluded.contains(&victim) {
                continue;
            }
            if evaluator.has_property_at(Property::Defeat, map.position(victim)) {
                self.destroy(map, victim, out, excluded);
            }
        }
    }

    /// MELT entities standing on a HOT cell are destroyed.
    fn melt_pass(
        &self,
        map: &LevelMap,
        out: &mut CompositeAction,
        excluded: &mut FxHashSet<EntityId>,
    ) {
        let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
        for victim in evaluator.entities_with_property(Property::Melt) {
            if excluded.contains(&victim) {
                continue;
            }
            if evaluator.has_property_at(Property::Hot, map.position(victim)) {
                self.destroy(map, victim, out, excluded);
            }
        }
    }

    /// "X HAS Y": every destruction of a matching X leaves a Y behind, at the
    /// victim's cell with the victim's facing.
    fn has_pass(&self, map: &mut LevelMap, out: &mut CompositeAction) {
        let spawns: FxHashMap<EntityId, Vec<crate::core::TypeId>> = {
            let evaluator = RuleEvaluator::new(self.registry, map, self.rules);
            let mut spawns: FxHashMap<EntityId, Vec<crate::core::TypeId>> = FxHashMap::default();
            for Transformation { source, target } in evaluator.has_transformations() {
                spawns.entry(source).or_default().push(target);
            }
            spawns
        };

        let destroyed: Vec<(EntityId, Position, Direction)> = out
            .actions()
            .iter()
            .filter_map(|action| match *action {
                Action::Destroy {
                    entity,
                    direction,
                    at,
                    ..
                } => Some((entity, at, direction)),
                _ => None,
            })
            .collect();

        for (victim, at, direction) in destroyed {
            let Some(targets) = spawns.get(&victim) else {
                continue;
            };
            for &type_id in targets {
                out.push(Action::Create {
                    entity: map.allocate_id(),
                    type_id,
                    direction,
                    at,
                });
            }
        }
    }

    fn destroy(
        &self,
        map: &LevelMap,
        id: EntityId,
        out: &mut CompositeAction,
        excluded: &mut FxHashSet<EntityId>,
    ) {
        let entity = *map.entity(id);
        out.push(Action::Destroy {
            entity: id,
            type_id: entity.type_id,
            direction: entity.direction,
            at: map.position(id),
        });
        excluded.insert(id);
    }
}
