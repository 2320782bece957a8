//! Undo and redo across every action kind.

mod common;

use common::{engine_with, spawn_row, Vocab};
use proptest::prelude::*;
use wordbound::core::Direction;
use wordbound::grid::{LevelMap, Position};

#[test]
fn test_undo_restores_a_push() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.you]);
    spawn_row(&mut map, 0, 11, &[vocab.text_rock, vocab.is, vocab.push]);
    map.spawn(vocab.fox, Position::new(1, 2));
    map.spawn(vocab.rock, Position::new(2, 2));

    let mut engine = engine_with(&vocab, map);
    let before = engine.map().clone();

    engine.run_turn(Some(Direction::Right)).unwrap();
    assert_ne!(*engine.map(), before);
    assert!(engine.undo());
    assert_eq!(*engine.map(), before);
}

#[test]
fn test_undo_revives_sunk_entities() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.you]);
    spawn_row(&mut map, 0, 11, &[vocab.text_water, vocab.is, vocab.sink]);
    let fox = map.spawn(vocab.fox, Position::new(2, 2));
    let water = map.spawn(vocab.water, Position::new(3, 2));

    let mut engine = engine_with(&vocab, map);
    let before = engine.map().clone();

    engine.run_turn(Some(Direction::Right)).unwrap();
    assert!(!engine.map().contains(fox));
    assert!(engine.has_lost());

    assert!(engine.undo());
    assert_eq!(*engine.map(), before);
    assert!(engine.map().contains(fox));
    assert!(engine.map().contains(water));
    // The lose state is recomputed from the restored map.
    assert!(!engine.has_lost());
}

#[test]
fn test_undo_reverses_a_transformation() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.text_rock]);
    let fox = map.spawn(vocab.fox, Position::new(3, 3));

    let mut engine = engine_with(&vocab, map);
    let before = engine.map().clone();

    engine.run_turn(None).unwrap();
    assert!(!engine.map().contains(fox));

    assert!(engine.undo());
    assert_eq!(*engine.map(), before);
    assert_eq!(engine.map().entity(fox).type_id, vocab.fox);
}

#[test]
fn test_undo_removes_has_drops_and_more_spawns() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 9, &[vocab.text_fox, vocab.is, vocab.you]);
    spawn_row(&mut map, 0, 10, &[vocab.text_lava, vocab.is, vocab.defeat]);
    spawn_row(&mut map, 0, 11, &[vocab.text_fox, vocab.has, vocab.text_flag]);
    spawn_row(&mut map, 4, 9, &[vocab.text_water, vocab.is, vocab.more]);
    map.spawn(vocab.fox, Position::new(2, 2));
    map.spawn(vocab.lava, Position::new(3, 2));
    map.spawn(vocab.water, Position::new(8, 5));

    let mut engine = engine_with(&vocab, map);
    let before = engine.map().clone();
    let population = engine.map().len();

    engine.run_turn(Some(Direction::Right)).unwrap();
    // A flag dropped and water spread: the population changed.
    assert_ne!(engine.map().len(), population);

    assert!(engine.undo());
    assert_eq!(*engine.map(), before);
}

#[test]
fn test_redo_replays_exactly() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.you]);
    spawn_row(&mut map, 0, 11, &[vocab.text_fox, vocab.has, vocab.text_flag]);
    spawn_row(&mut map, 4, 10, &[vocab.text_water, vocab.is, vocab.sink]);
    map.spawn(vocab.fox, Position::new(2, 2));
    map.spawn(vocab.water, Position::new(3, 2));

    let mut engine = engine_with(&vocab, map);
    engine.run_turn(Some(Direction::Right)).unwrap();
    let after = engine.map().clone();

    assert!(engine.undo());
    assert!(engine.redo());
    assert_eq!(*engine.map(), after);
}

#[test]
fn test_new_turn_discards_the_redo_branch() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.you]);
    let fox = map.spawn(vocab.fox, Position::new(5, 5));

    let mut engine = engine_with(&vocab, map);
    engine.run_turn(Some(Direction::Right)).unwrap();
    assert!(engine.undo());

    engine.run_turn(Some(Direction::Up)).unwrap();
    assert!(!engine.redo());
    assert_eq!(engine.map().position(fox), Position::new(5, 4));
}

#[test]
fn test_undo_restores_rules_spelled_by_pushed_tiles() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(12, 12);
    spawn_row(&mut map, 0, 10, &[vocab.text_fox, vocab.is, vocab.you]);
    // Breaking "rock is push" by shoving its subject tile upward.
    let tiles = spawn_row(&mut map, 2, 5, &[vocab.text_rock, vocab.is, vocab.push]);
    map.spawn(vocab.fox, Position::new(2, 6));
    let rock = map.spawn(vocab.rock, Position::new(8, 8));

    let mut engine = engine_with(&vocab, map);
    assert!(engine.has_property(rock, wordbound::core::Property::Push));

    let outcome = engine.run_turn(Some(Direction::Up)).unwrap();
    assert_eq!(engine.map().position(tiles[0]), Position::new(2, 4));
    assert_eq!(outcome.rules_delta, wordbound::rules::RulesetDelta::Shrank);
    assert!(!engine.has_property(rock, wordbound::core::Property::Push));

    assert!(engine.undo());
    assert!(engine.has_property(rock, wordbound::core::Property::Push));
}

fn direction_from(raw: u8) -> Option<Direction> {
    match raw % 5 {
        0 => None,
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Left),
        _ => Some(Direction::Right),
    }
}

proptest! {
    /// Any sequence of turns fully unwinds to the loaded level.
    #[test]
    fn test_random_walk_unwinds_completely(raw in prop::collection::vec(0u8..10, 1..15)) {
        let vocab = Vocab::new();
        let mut map = LevelMap::new(12, 12);
        spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.is, vocab.you]);
        spawn_row(&mut map, 0, 1, &[vocab.text_rock, vocab.is, vocab.push]);
        spawn_row(&mut map, 0, 10, &[vocab.text_water, vocab.is, vocab.sink]);
        spawn_row(&mut map, 0, 11, &[vocab.text_fox, vocab.has, vocab.text_flag]);
        map.spawn(vocab.fox, Position::new(5, 5));
        map.spawn(vocab.rock, Position::new(6, 5));
        map.spawn(vocab.rock, Position::new(5, 6));
        map.spawn(vocab.water, Position::new(8, 5));
        map.spawn(vocab.water, Position::new(5, 8));

        let mut engine = engine_with(&vocab, map);
        let initial = engine.map().clone();

        for &step in &raw {
            let _ = engine.run_turn(direction_from(step));
        }
        prop_assert!(engine.undo_depth() <= raw.len());

        while engine.undo() {}
        prop_assert_eq!(engine.map().clone(), initial);
    }
}
