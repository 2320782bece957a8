//! The engine facade.
//!
//! `GameEngine` owns the level map, the derived ruleset, and the undo/redo
//! history, and exposes the handful of calls a frontend needs: load a level,
//! run a turn, undo, redo, reset, and query state.

use log::debug;

use crate::actions::{ActionCategories, ActionStack};
use crate::core::{Direction, EngineConfig, EngineError, EntityId, Property, TypeRegistry};
use crate::eval::RuleEvaluator;
use crate::grid::{LevelMap, Position};
use crate::rules::{parse_rules, Ruleset, RulesetDelta};
use crate::turn::run_turn;

/// Result summary of one turn, undo, or redo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Which kinds of action the step contained.
    pub categories: ActionCategories,
    /// The level is won. Latched: stays set until [`GameEngine::reset`].
    pub won: bool,
    /// No YOU entity remains.
    pub lost: bool,
    /// How the active ruleset changed.
    pub rules_delta: RulesetDelta,
}

/// A complete game state: map, rules, history, and win/lose flags.
///
/// ## Example
///
/// ```
/// use wordbound::core::{Direction, EngineConfig, Property, TypeRegistry, VerbKind};
/// use wordbound::engine::GameEngine;
/// use wordbound::grid::{LevelMap, Position};
///
/// let mut registry = TypeRegistry::new();
/// let fox = registry.register_plain("fox");
/// let text_fox = registry.register_noun("text_fox", fox);
/// let is = registry.register_verb("text_is", VerbKind::Is, true, true);
/// let you = registry.register_property("text_you", Property::You);
///
/// let mut map = LevelMap::new(8, 8);
/// map.spawn(text_fox, Position::new(0, 7));
/// map.spawn(is, Position::new(1, 7));
/// map.spawn(you, Position::new(2, 7));
/// let id = map.spawn(fox, Position::new(3, 3));
///
/// let mut engine = GameEngine::new(registry, EngineConfig::default());
/// engine.set_level_map(map)?;
/// engine.run_turn(Some(Direction::Right))?;
/// assert_eq!(engine.map().position(id), Position::new(4, 3));
/// # Ok::<(), wordbound::core::EngineError>(())
/// ```
pub struct GameEngine {
    registry: TypeRegistry,
    config: EngineConfig,
    map: LevelMap,
    snapshot: LevelMap,
    ruleset: Ruleset,
    stack: ActionStack,
    won: bool,
    lost: bool,
}

impl GameEngine {
    /// Create an engine with no level loaded.
    #[must_use]
    pub fn new(registry: TypeRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            map: LevelMap::new(0, 0),
            snapshot: LevelMap::new(0, 0),
            ruleset: Ruleset::new(),
            stack: ActionStack::new(),
            won: false,
            lost: false,
        }
    }

    /// Load a level, keeping a pristine snapshot for [`reset`](Self::reset).
    ///
    /// Clears history and the win flag, and derives the initial ruleset.
    pub fn set_level_map(&mut self, map: LevelMap) -> Result<(), EngineError> {
        self.check_population(&map)?;
        self.snapshot = map.clone();
        self.map = map;
        self.stack.clear();
        self.won = false;
        self.ruleset.replace(parse_rules(&self.map, &self.registry));
        self.lost = self.no_you_left();
        debug!(
            "level loaded: {} entities, {} rules",
            self.map.len(),
            self.ruleset.rules().len()
        );
        Ok(())
    }

    /// Run one turn. `None` is a wait turn: no player movement, but MOVE
    /// entities and interactions still run.
    pub fn run_turn(&mut self, direction: Option<Direction>) -> Result<TurnOutcome, EngineError> {
        let report = run_turn(&mut self.map, &mut self.ruleset, &self.registry, direction);
        let categories = report.action.categories();
        if !report.action.is_empty() {
            self.stack.record(report.action);
        }
        // Recorded before the cap check so an oversized turn is still undoable.
        self.check_population(&self.map)?;
        self.won = self.won || report.won;
        self.lost = report.lost;
        Ok(TurnOutcome {
            categories,
            won: self.won,
            lost: self.lost,
            rules_delta: report.delta,
        })
    }

    /// Undo the last turn, if any. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if !self.stack.undo(&mut self.map) {
            return false;
        }
        self.resync();
        true
    }

    /// Re-apply the last undone turn, if any. Returns whether anything
    /// changed.
    pub fn redo(&mut self) -> bool {
        if !self.stack.redo(&mut self.map) {
            return false;
        }
        self.resync();
        true
    }

    /// Restore the level to its loaded state, dropping all history and
    /// clearing the win flag.
    pub fn reset(&mut self) {
        self.map = self.snapshot.clone();
        self.stack.clear();
        self.won = false;
        self.ruleset.replace(parse_rules(&self.map, &self.registry));
        self.lost = self.no_you_left();
    }

    /// The current level state.
    #[must_use]
    pub fn map(&self) -> &LevelMap {
        &self.map
    }

    /// The active ruleset.
    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The shared type registry.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Whether the entity currently has the property.
    #[must_use]
    pub fn has_property(&self, entity: EntityId, property: Property) -> bool {
        RuleEvaluator::new(&self.registry, &self.map, &self.ruleset)
            .has_property(entity, property)
    }

    /// Cells where a YOU entity stands on a WIN entity right now.
    #[must_use]
    pub fn win_positions(&self) -> Vec<Position> {
        RuleEvaluator::new(&self.registry, &self.map, &self.ruleset).win_positions()
    }

    /// Whether the level has been won at any point since load or reset.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Whether no YOU entity remains.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.lost
    }

    /// Number of turns available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.stack.undo_depth()
    }

    fn resync(&mut self) {
        self.ruleset.replace(parse_rules(&self.map, &self.registry));
        self.lost = self.no_you_left();
    }

    fn no_you_left(&self) -> bool {
        RuleEvaluator::new(&self.registry, &self.map, &self.ruleset)
            .entities_with_property(Property::You)
            .is_empty()
    }

    fn check_population(&self, map: &LevelMap) -> Result<(), EngineError> {
        if map.len() > self.config.max_entities {
            return Err(EngineError::LevelTooComplex {
                count: map.len(),
                limit: self.config.max_entities,
            });
        }
        Ok(())
    }
}
