//! Grammar behavior through the public parsing entry point.

mod common;

use common::{spawn_row, Vocab};
use wordbound::grid::{LevelMap, Position};
use wordbound::rules::parse_rules;

fn descriptions(vocab: &Vocab, map: &LevelMap) -> Vec<String> {
    let mut described: Vec<String> = parse_rules(map, &vocab.registry)
        .iter()
        .map(|rule| rule.describe(&vocab.registry))
        .collect();
    described.sort();
    described
}

#[test]
fn test_simple_sentence() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.is, vocab.you]);

    assert_eq!(descriptions(&vocab, &map), vec!["fox is you"]);
}

#[test]
fn test_vertical_sentences_parse_too() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    map.spawn(vocab.text_fox, Position::new(3, 2));
    map.spawn(vocab.is, Position::new(3, 3));
    map.spawn(vocab.you, Position::new(3, 4));

    assert_eq!(descriptions(&vocab, &map), vec!["fox is you"]);
}

#[test]
fn test_verb_chaining_yields_two_rules() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    // fox is push and has rock
    spawn_row(
        &mut map,
        0,
        0,
        &[vocab.text_fox, vocab.is, vocab.push, vocab.and, vocab.has, vocab.text_rock],
    );

    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox has rock", "fox is push"]
    );
}

#[test]
fn test_sentence_chaining_reuses_the_effect_noun() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    // fox is rock and wall facing water has lava:
    // "wall" ends the first sentence and subjects the second.
    spawn_row(
        &mut map,
        0,
        0,
        &[
            vocab.text_fox,
            vocab.is,
            vocab.text_rock,
            vocab.and,
            vocab.text_wall,
            vocab.facing,
            vocab.text_water,
            vocab.has,
            vocab.text_lava,
        ],
    );

    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox is rock", "fox is wall", "wall (facing water) has lava"]
    );
}

#[test]
fn test_condition_kind_elision() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(20, 20);
    // fox on rock and near water and flag is you:
    // the third condition reuses NEAR.
    spawn_row(
        &mut map,
        0,
        0,
        &[
            vocab.text_fox,
            vocab.on,
            vocab.text_rock,
            vocab.and,
            vocab.near,
            vocab.text_water,
            vocab.and,
            vocab.text_flag,
            vocab.is,
            vocab.you,
        ],
    );

    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox (on rock) (near water) (near flag) is you"]
    );
}

#[test]
fn test_trailing_garbage_is_tolerated() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    // fox is flag and and
    spawn_row(
        &mut map,
        0,
        0,
        &[vocab.text_fox, vocab.is, vocab.text_flag, vocab.and, vocab.and],
    );

    assert_eq!(descriptions(&vocab, &map), vec!["fox is flag"]);
}

#[test]
fn test_invalid_sequences_yield_nothing() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    spawn_row(&mut map, 0, 0, &[vocab.is, vocab.text_fox, vocab.you]);
    spawn_row(&mut map, 0, 2, &[vocab.text_fox, vocab.text_rock, vocab.you]);
    spawn_row(&mut map, 0, 4, &[vocab.and, vocab.and, vocab.and]);

    assert!(descriptions(&vocab, &map).is_empty());
}

#[test]
fn test_semantic_filter_rejects_property_effect_on_has() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    // HAS only accepts noun effects.
    spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.has, vocab.you]);

    assert!(descriptions(&vocab, &map).is_empty());
}

#[test]
fn test_short_runs_are_ignored() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.is]);

    assert!(descriptions(&vocab, &map).is_empty());
}

#[test]
fn test_stacked_tiles_expand_to_both_readings() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.is, vocab.you]);
    // A second effect tile stacked on the YOU cell.
    map.spawn(vocab.push, Position::new(2, 0));

    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox is push", "fox is you"]
    );
}

#[test]
fn test_crossing_sentences_share_the_subject_tile() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    // Horizontal: fox is you. Vertical through the same subject tile:
    // fox is push.
    spawn_row(&mut map, 2, 2, &[vocab.text_fox, vocab.is, vocab.you]);
    map.spawn(vocab.is, Position::new(2, 3));
    map.spawn(vocab.push, Position::new(2, 4));

    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox is push", "fox is you"]
    );
}

#[test]
fn test_duplicate_sentences_from_distinct_tiles_both_survive() {
    let vocab = Vocab::new();
    let mut map = LevelMap::new(16, 16);
    spawn_row(&mut map, 0, 0, &[vocab.text_fox, vocab.is, vocab.you]);
    spawn_row(&mut map, 0, 2, &[vocab.text_fox, vocab.is, vocab.you]);

    // Same sentence, different tiles: two distinct rules.
    assert_eq!(
        descriptions(&vocab, &map),
        vec!["fox is you", "fox is you"]
    );
}
