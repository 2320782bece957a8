//! A turn-based grid game core where the rules are part of the board.
//!
//! Word tiles on the grid spell out sentences ("fox is you", "rock is
//! push"); the engine re-derives the active ruleset from tile positions
//! every turn, so pushing a word around literally rewrites the game's
//! physics mid-play.
//!
//! The crate is organized in layers:
//!
//! - [`core`]: identities, types, directions, configuration.
//! - [`grid`]: the level map — an entity arena with a per-cell index,
//!   backed by persistent maps so speculative clones are cheap.
//! - [`rules`]: rule derivation — scanning tile runs, expanding stacked
//!   tiles, parsing the grammar, deduplicating by tile identity.
//! - [`eval`]: rule evaluation — inheritance, spatial conditions, property
//!   and transformation queries.
//! - [`actions`]: reversible actions and the undo/redo stack.
//! - [`turn`]: the turn pipeline — movement intents, collision resolution,
//!   post-movement interactions.
//! - [`engine`]: the [`GameEngine`](engine::GameEngine) facade tying it all
//!   together.
//!
//! ## Example
//!
//! ```
//! use wordbound::core::{Direction, EngineConfig, Property, TypeRegistry, VerbKind};
//! use wordbound::engine::GameEngine;
//! use wordbound::grid::{LevelMap, Position};
//!
//! let mut registry = TypeRegistry::new();
//! let fox = registry.register_plain("fox");
//! let flag = registry.register_plain("flag");
//! let text_fox = registry.register_noun("text_fox", fox);
//! let text_flag = registry.register_noun("text_flag", flag);
//! let is = registry.register_verb("text_is", VerbKind::Is, true, true);
//! let you = registry.register_property("text_you", Property::You);
//! let win = registry.register_property("text_win", Property::Win);
//!
//! let mut map = LevelMap::new(8, 8);
//! map.spawn(text_fox, Position::new(0, 0));
//! map.spawn(is, Position::new(1, 0));
//! map.spawn(you, Position::new(2, 0));
//! map.spawn(text_flag, Position::new(0, 1));
//! map.spawn(is, Position::new(1, 1));
//! map.spawn(win, Position::new(2, 1));
//! map.spawn(fox, Position::new(4, 4));
//! map.spawn(flag, Position::new(5, 4));
//!
//! let mut engine = GameEngine::new(registry, EngineConfig::default());
//! engine.set_level_map(map)?;
//! let outcome = engine.run_turn(Some(Direction::Right))?;
//! assert!(outcome.won);
//! # Ok::<(), wordbound::core::EngineError>(())
//! ```

pub mod actions;
pub mod core;
pub mod engine;
pub mod eval;
pub mod grid;
pub mod rules;
pub mod turn;

pub use engine::{GameEngine, TurnOutcome};
