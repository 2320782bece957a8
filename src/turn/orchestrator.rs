//! The turn pipeline.
//!
//! One turn runs in fixed phases:
//!
//! 1. Player movement: every YOU entity gets an intent in the input
//!    direction (a `None` input is a wait turn).
//! 2. Autonomous movement: every MOVE entity gets an intent along its own
//!    facing.
//! 3. Rules are re-derived from the settled tiles.
//! 4. Interactions (transform, more, sink, defeat, melt, has) are computed
//!    and executed.
//! 5. Rules are re-derived once more and the win and lose states checked.
//!
//! All mutations funnel through one [`CompositeAction`] so the whole turn
//! undoes as a unit.

use log::debug;

use crate::actions::CompositeAction;
use crate::core::{Direction, Property, TypeRegistry};
use crate::eval::RuleEvaluator;
use crate::grid::LevelMap;
use crate::rules::{parse_rules, Ruleset, RulesetDelta};

use super::collision::CollisionResolver;
use super::intent::MoveIntent;
use super::interaction::InteractionHandler;

/// What one turn did to the world.
#[derive(Clone, Debug)]
pub struct TurnReport {
    /// Every action of the turn, in execution order.
    pub action: CompositeAction,
    /// A YOU entity shares a cell with a WIN entity.
    pub won: bool,
    /// No YOU entity remains.
    pub lost: bool,
    /// How the ruleset changed over the whole turn.
    pub delta: RulesetDelta,
}

/// Run one full turn, mutating the map and ruleset in place.
pub fn run_turn(
    map: &mut LevelMap,
    ruleset: &mut Ruleset,
    registry: &TypeRegistry,
    direction: Option<Direction>,
) -> TurnReport {
    let mut total = CompositeAction::new();

    if let Some(direction) = direction {
        let intents: Vec<MoveIntent> = {
            let evaluator = RuleEvaluator::new(registry, map, ruleset);
            evaluator
                .entities_with_property(Property::You)
                .into_iter()
                .map(|entity| MoveIntent::player(entity, direction))
                .collect()
        };
        debug!("resolving {} player intents going {direction:?}", intents.len());
        let moved = CollisionResolver::new(registry, ruleset).resolve(&intents, map);
        moved.execute(map);
        total.combine(moved);
    }

    let intents: Vec<MoveIntent> = {
        let evaluator = RuleEvaluator::new(registry, map, ruleset);
        // `ids()` is sorted and duplicate-free, so each mover gets exactly
        // one intent no matter how many MOVE rules match it.
        evaluator
            .entities_with_property(Property::Move)
            .into_iter()
            .map(|entity| MoveIntent::autonomous(entity, map.entity(entity).direction))
            .collect()
    };
    if !intents.is_empty() {
        debug!("resolving {} autonomous intents", intents.len());
        let moved = CollisionResolver::new(registry, ruleset).resolve(&intents, map);
        moved.execute(map);
        total.combine(moved);
    }

    // Movement may have rearranged word tiles; interactions run under the
    // rules the tiles now spell.
    let mut settled = Ruleset::new();
    settled.replace(parse_rules(map, registry));
    let interactions = InteractionHandler::new(registry, &settled).handle(map);
    interactions.execute(map);
    total.combine(interactions);

    // Interactions may in turn have created or destroyed word tiles. The
    // delta is reported against the ruleset the turn started with.
    let delta = ruleset.replace(parse_rules(map, registry));
    if delta != RulesetDelta::Unchanged {
        debug!("ruleset {delta:?}, now {} rules", ruleset.rules().len());
    }

    let evaluator = RuleEvaluator::new(registry, map, ruleset);
    let won = !evaluator.win_positions().is_empty();
    let lost = evaluator.entities_with_property(Property::You).is_empty();

    TurnReport {
        action: total,
        won,
        lost,
        delta,
    }
}
