//! Shared test vocabulary and level-building helpers.

#![allow(dead_code)]

use wordbound::core::{
    ConditionKind, EngineConfig, EntityId, Property, TypeId, TypeRegistry, VerbKind,
};
use wordbound::engine::GameEngine;
use wordbound::grid::{LevelMap, Position};

/// A full vocabulary covering every word class the grammar knows.
pub struct Vocab {
    pub registry: TypeRegistry,

    pub fox: TypeId,
    pub rock: TypeId,
    pub wall: TypeId,
    pub water: TypeId,
    pub lava: TypeId,
    pub flag: TypeId,

    pub text_fox: TypeId,
    pub text_rock: TypeId,
    pub text_wall: TypeId,
    pub text_water: TypeId,
    pub text_lava: TypeId,
    pub text_flag: TypeId,

    pub is: TypeId,
    pub has: TypeId,
    pub extend: TypeId,

    pub you: TypeId,
    pub push: TypeId,
    pub stop: TypeId,
    pub win: TypeId,
    pub defeat: TypeId,
    pub sink: TypeId,
    pub hot: TypeId,
    pub melt: TypeId,
    pub move_word: TypeId,
    pub more: TypeId,

    pub on: TypeId,
    pub near: TypeId,
    pub facing: TypeId,
    pub and: TypeId,
}

impl Vocab {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        let fox = registry.register_plain("fox");
        let rock = registry.register_plain("rock");
        let wall = registry.register_plain("wall");
        let water = registry.register_plain("water");
        let lava = registry.register_plain("lava");
        let flag = registry.register_plain("flag");

        let text_fox = registry.register_noun("text_fox", fox);
        let text_rock = registry.register_noun("text_rock", rock);
        let text_wall = registry.register_noun("text_wall", wall);
        let text_water = registry.register_noun("text_water", water);
        let text_lava = registry.register_noun("text_lava", lava);
        let text_flag = registry.register_noun("text_flag", flag);

        let is = registry.register_verb("text_is", VerbKind::Is, true, true);
        let has = registry.register_verb("text_has", VerbKind::Has, true, false);
        let extend = registry.register_verb("text_extend", VerbKind::Extend, true, false);

        let you = registry.register_property("text_you", Property::You);
        let push = registry.register_property("text_push", Property::Push);
        let stop = registry.register_property("text_stop", Property::Stop);
        let win = registry.register_property("text_win", Property::Win);
        let defeat = registry.register_property("text_defeat", Property::Defeat);
        let sink = registry.register_property("text_sink", Property::Sink);
        let hot = registry.register_property("text_hot", Property::Hot);
        let melt = registry.register_property("text_melt", Property::Melt);
        let move_word = registry.register_property("text_move", Property::Move);
        let more = registry.register_property("text_more", Property::More);

        let on = registry.register_condition("text_on", ConditionKind::On);
        let near = registry.register_condition("text_near", ConditionKind::Near);
        let facing = registry.register_condition("text_facing", ConditionKind::Facing);
        let and = registry.register_and("text_and");

        Self {
            registry,
            fox,
            rock,
            wall,
            water,
            lava,
            flag,
            text_fox,
            text_rock,
            text_wall,
            text_water,
            text_lava,
            text_flag,
            is,
            has,
            extend,
            you,
            push,
            stop,
            win,
            defeat,
            sink,
            hot,
            melt,
            move_word,
            more,
            on,
            near,
            facing,
            and,
        }
    }
}

/// Spawn a horizontal sentence starting at `(x, y)`, one tile per cell.
pub fn spawn_row(map: &mut LevelMap, x: i32, y: i32, types: &[TypeId]) -> Vec<EntityId> {
    types
        .iter()
        .enumerate()
        .map(|(offset, &type_id)| map.spawn(type_id, Position::new(x + offset as i32, y)))
        .collect()
}

/// Build an engine with the default configuration around a prepared level.
pub fn engine_with(vocab: &Vocab, map: LevelMap) -> GameEngine {
    let mut engine = GameEngine::new(vocab.registry.clone(), EngineConfig::default());
    engine
        .set_level_map(map)
        .unwrap_or_else(|err| panic!("level rejected: {err}"));
    engine
}
