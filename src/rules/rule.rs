//! Rules, conditions, and the active ruleset.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConditionKind, EntityId, Property, TypeId, TypeRegistry, VerbKind};

/// A spatial predicate attached to a rule, with the word tiles it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The predicate kind.
    pub kind: ConditionKind,
    /// The resolved target type (noun parameters are dereferenced).
    pub target: TypeId,
    /// The condition word tile.
    pub condition_text: EntityId,
    /// The parameter noun tile.
    pub parameter_text: EntityId,
}

/// What a rule grants or turns its subject into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// An abstract property (YOU, PUSH, ...).
    Property(Property),
    /// A concrete type (noun effects are dereferenced).
    Type(TypeId),
}

/// A parsed rule: subject, verb, effect, and zero or more ANDed conditions.
///
/// Rules keep references to the word tiles that spelled them out. Two rules
/// are equal iff those tile identities match — the rule's *signature* — not
/// merely their resolved types; the same sentence spelled by different tiles
/// is a different rule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rule {
    /// Resolved subject type.
    pub subject: TypeId,
    /// The verb.
    pub verb: VerbKind,
    /// Resolved effect.
    pub effect: Effect,
    /// Shared condition list, ANDed.
    pub conditions: SmallVec<[Condition; 2]>,
    /// The subject noun tile.
    pub subject_text: EntityId,
    /// The verb tile.
    pub verb_text: EntityId,
    /// The effect tile.
    pub effect_text: EntityId,
}

impl Rule {
    /// The rule's identity: the word tiles that formed it.
    #[must_use]
    pub fn signature(&self) -> RuleSignature {
        let mut tiles: SmallVec<[EntityId; 8]> = SmallVec::new();
        tiles.push(self.subject_text);
        tiles.push(self.verb_text);
        tiles.push(self.effect_text);
        for condition in &self.conditions {
            tiles.push(condition.condition_text);
            tiles.push(condition.parameter_text);
        }
        RuleSignature { tiles }
    }

    /// Human-readable form for diagnostics, e.g. `rock (on water) is push`.
    #[must_use]
    pub fn describe(&self, registry: &TypeRegistry) -> String {
        let mut out = String::new();
        out.push_str(registry.name(self.subject));
        for condition in &self.conditions {
            out.push_str(&format!(
                " ({:?} {})",
                condition.kind,
                registry.name(condition.target)
            ));
        }
        out.push_str(&format!(" {:?} ", self.verb));
        match self.effect {
            Effect::Property(p) => out.push_str(&format!("{p:?}")),
            Effect::Type(t) => out.push_str(registry.name(t)),
        }
        out.to_lowercase()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for Rule {}

/// Identity of the originating word tiles, used for deduplication and for
/// detecting that a reparse changed nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleSignature {
    tiles: SmallVec<[EntityId; 8]>,
}

/// How a ruleset replacement compared to what it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulesetDelta {
    /// Identical by signature.
    Unchanged,
    /// Rules appeared (or changed at equal count).
    Grew,
    /// Rules disappeared.
    Shrank,
}

/// The current list of active rules, replaced wholesale once per parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    /// Create an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Replace the rule list wholesale, reporting how it changed.
    pub fn replace(&mut self, rules: Vec<Rule>) -> RulesetDelta {
        let unchanged = self.rules.len() == rules.len()
            && self
                .rules
                .iter()
                .zip(&rules)
                .all(|(a, b)| a.signature() == b.signature());
        if unchanged {
            return RulesetDelta::Unchanged;
        }
        let delta = if rules.len() >= self.rules.len() {
            RulesetDelta::Grew
        } else {
            RulesetDelta::Shrank
        };
        self.rules = rules;
        delta
    }

    /// Word tiles participating in any active rule (for highlighting).
    #[must_use]
    pub fn active_text_tiles(&self) -> FxHashSet<EntityId> {
        let mut tiles = FxHashSet::default();
        for rule in &self.rules {
            tiles.insert(rule.subject_text);
            tiles.insert(rule.verb_text);
            tiles.insert(rule.effect_text);
            for condition in &rule.conditions {
                tiles.insert(condition.condition_text);
                tiles.insert(condition.parameter_text);
            }
        }
        tiles
    }
}

/// A pending entity-to-type change produced by rule evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transformation {
    /// The entity to transform (or, for HAS, the destroyed carrier).
    pub source: EntityId,
    /// The type it becomes (or spawns).
    pub target: TypeId,
}
