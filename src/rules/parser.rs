//! Grammar parser: concrete word sequences into rules.
//!
//! A sentence is one or more subjects (nouns, each optionally trailed by a
//! condition chain) joined with AND, a verb, and one or more effects joined
//! with AND. Three extensions to that minimal shape:
//!
//! - `AND <verb>` after an effect starts a new clause with the same subjects
//!   and conditions (`X IS PUSH AND EXTEND Y`).
//! - An effect noun directly followed by a condition or verb token also
//!   begins a new sentence (`A IS B AND C FACING D HAS E` makes `C` both an
//!   effect of the first clause and the subject of the second).
//! - Inside a condition chain, a bare noun after AND inherits the preceding
//!   condition kind (`X ON A AND B IS YOU` reads `ON B`).
//!
//! A sequence that fails to match produces no rules — that is an expected
//! outcome, not an error. Trailing tokens after a complete clause are
//! ignored.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{ConditionKind, EntityId, Property, TypeId, TypeKind, TypeRegistry, VerbKind};
use crate::grid::LevelMap;

use super::permute;
use super::rule::{Condition, Effect, Rule};
use super::scanner;

/// Full parse pipeline: scan, expand, parse, filter, deduplicate.
#[must_use]
pub fn parse_rules(map: &LevelMap, registry: &TypeRegistry) -> Vec<Rule> {
    let runs = scanner::scan(map, registry);
    let sequences = permute::expand_all(&runs);

    let mut rules = Vec::new();
    for sequence in &sequences {
        parse_sequence(sequence, map, registry, &mut rules);
    }
    rules.retain(|rule| is_semantically_valid(rule, map, registry));
    let rules = deduplicate(rules);
    log::debug!(
        "parsed {} rule(s) from {} candidate sequence(s)",
        rules.len(),
        sequences.len()
    );
    rules
}

/// One word tile, classified for the grammar.
#[derive(Clone, Copy, Debug)]
enum Token {
    Noun { tile: EntityId, refers_to: TypeId },
    Verb { tile: EntityId, kind: VerbKind },
    PropertyWord { tile: EntityId, property: Property },
    Cond { tile: EntityId, kind: ConditionKind },
    And,
}

fn classify(sequence: &[EntityId], map: &LevelMap, registry: &TypeRegistry) -> Vec<Token> {
    sequence
        .iter()
        .map(|&tile| match *registry.kind(map.entity(tile).type_id) {
            TypeKind::Noun { refers_to } => Token::Noun { tile, refers_to },
            TypeKind::Verb { kind, .. } => Token::Verb { tile, kind },
            TypeKind::Property(property) => Token::PropertyWord { tile, property },
            TypeKind::Condition(kind) => Token::Cond { tile, kind },
            TypeKind::And => Token::And,
            // Plain entities never reach the parser; the scanner filters them.
            TypeKind::Plain => unreachable!("plain entity in word sequence"),
        })
        .collect()
}

/// Parse one concrete entity sequence, appending any rules it spells out.
pub(crate) fn parse_sequence(
    sequence: &[EntityId],
    map: &LevelMap,
    registry: &TypeRegistry,
    out: &mut Vec<Rule>,
) {
    let tokens = classify(sequence, map, registry);
    parse_sentence(&tokens, 0, out);
}

fn parse_sentence(tokens: &[Token], start: usize, out: &mut Vec<Rule>) {
    let mut i = start;

    // Subject list: noun (AND noun)*.
    let mut subjects: SmallVec<[(EntityId, TypeId); 2]> = SmallVec::new();
    let Some(&Token::Noun { tile, refers_to }) = tokens.get(i) else {
        return;
    };
    subjects.push((tile, refers_to));
    i += 1;
    while let (Some(Token::And), Some(&Token::Noun { tile, refers_to })) =
        (tokens.get(i), tokens.get(i + 1))
    {
        subjects.push((tile, refers_to));
        i += 2;
    }

    // Optional condition chain, shared by all subjects.
    let mut conditions: SmallVec<[Condition; 2]> = SmallVec::new();
    if let Some(&Token::Cond { tile, kind }) = tokens.get(i) {
        let mut kind = kind;
        let mut kind_tile = tile;
        i += 1;
        loop {
            let Some(&Token::Noun {
                tile: parameter_text,
                refers_to: target,
            }) = tokens.get(i)
            else {
                return; // malformed condition: no rule
            };
            conditions.push(Condition {
                kind,
                target,
                condition_text: kind_tile,
                parameter_text,
            });
            i += 1;
            match (tokens.get(i), tokens.get(i + 1)) {
                (Some(Token::And), Some(&Token::Cond { tile, kind: next })) => {
                    kind = next;
                    kind_tile = tile;
                    i += 2;
                }
                // Bare noun after AND inherits the current condition kind.
                (Some(Token::And), Some(Token::Noun { .. })) => {
                    i += 1;
                }
                _ => break,
            }
        }
    }

    // Verb.
    let Some(&Token::Verb {
        tile: verb_text,
        kind: verb,
    }) = tokens.get(i)
    else {
        return;
    };
    let mut verb = verb;
    let mut verb_text = verb_text;
    i += 1;

    // Effect list, with verb chaining and sentence chaining.
    let mut effects: SmallVec<[(EntityId, Effect); 2]> = SmallVec::new();
    let mut chain_from = None;
    loop {
        match tokens.get(i) {
            Some(&Token::PropertyWord { tile, property }) => {
                effects.push((tile, Effect::Property(property)));
                i += 1;
            }
            Some(&Token::Noun { tile, refers_to }) => {
                effects.push((tile, Effect::Type(refers_to)));
                // An effect noun directly followed by a condition or verb
                // also begins a new sentence.
                if matches!(
                    tokens.get(i + 1),
                    Some(Token::Cond { .. }) | Some(Token::Verb { .. })
                ) {
                    chain_from = Some(i);
                    break;
                }
                i += 1;
            }
            _ => break,
        }
        match (tokens.get(i), tokens.get(i + 1)) {
            (Some(Token::And), Some(&Token::Verb { tile, kind })) => {
                // Emit the finished clause, then continue with the new verb
                // and the same subjects and conditions.
                emit(out, &subjects, &conditions, verb, verb_text, &effects);
                verb = kind;
                verb_text = tile;
                effects.clear();
                i += 2;
            }
            (Some(Token::And), Some(Token::PropertyWord { .. } | Token::Noun { .. })) => {
                i += 1;
            }
            _ => break,
        }
    }

    if !effects.is_empty() {
        emit(out, &subjects, &conditions, verb, verb_text, &effects);
    }
    if let Some(from) = chain_from {
        parse_sentence(tokens, from, out);
    }
}

fn emit(
    out: &mut Vec<Rule>,
    subjects: &[(EntityId, TypeId)],
    conditions: &[Condition],
    verb: VerbKind,
    verb_text: EntityId,
    effects: &[(EntityId, Effect)],
) {
    for &(subject_text, subject) in subjects {
        for &(effect_text, effect) in effects {
            out.push(Rule {
                subject,
                verb,
                effect,
                conditions: conditions.iter().cloned().collect(),
                subject_text,
                verb_text,
                effect_text,
            });
        }
    }
}

/// Drop rules whose verb does not permit the kind of their effect.
fn is_semantically_valid(rule: &Rule, map: &LevelMap, registry: &TypeRegistry) -> bool {
    let TypeKind::Verb {
        accepts_noun,
        accepts_property,
        ..
    } = *registry.kind(map.entity(rule.verb_text).type_id)
    else {
        return false;
    };
    match rule.effect {
        Effect::Type(_) => accepts_noun,
        Effect::Property(_) => accepts_property,
    }
}

/// Drop rules whose signature duplicates an already-kept rule.
///
/// AND-expansion over stacked tiles can regenerate the same tile combination
/// more than once; the first occurrence wins.
fn deduplicate(rules: Vec<Rule>) -> Vec<Rule> {
    let mut seen = FxHashSet::default();
    rules
        .into_iter()
        .filter(|rule| seen.insert(rule.signature()))
        .collect()
}
