//! Entity types and the vocabulary registry.
//!
//! The engine never hardcodes a vocabulary. Games register their types at
//! startup: plain object types, noun tiles that reference them, the three
//! verbs, property tiles, condition tiles, and the AND connective. The
//! registry is configuration — the grammar and evaluators only ever match on
//! the closed [`TypeKind`] variants.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Identifier of a registered entity type (index into the registry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Abstract traits grantable to any type via a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    You,
    Push,
    Stop,
    Win,
    Defeat,
    Sink,
    Hot,
    Melt,
    Move,
    More,
}

/// Spatial predicates usable in rule conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    /// Another entity of the target type shares the cell.
    On,
    /// An entity of the target type is within the surrounding 3x3 block.
    Near,
    /// An entity of the target type occupies the cell the entity faces.
    Facing,
    /// Pure type test through EXTEND inheritance, no spatial component.
    InstanceOf,
}

/// The three rule verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbKind {
    Is,
    Has,
    Extend,
}

/// Closed classification of entity types.
///
/// Everything except `Plain` is a word tile ("text"). Text entities are
/// implicitly pushable regardless of rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// An ordinary in-world object.
    Plain,
    /// A word tile denoting another entity type.
    Noun {
        /// The type this noun refers to when used in a rule.
        refers_to: TypeId,
    },
    /// A word tile carrying a verb and its effect capabilities.
    Verb {
        kind: VerbKind,
        /// Whether this verb accepts a noun (type) effect.
        accepts_noun: bool,
        /// Whether this verb accepts a property effect.
        accepts_property: bool,
    },
    /// A word tile denoting an abstract property.
    Property(Property),
    /// A word tile denoting a spatial predicate.
    Condition(ConditionKind),
    /// The AND connective.
    And,
}

impl TypeKind {
    /// Whether entities of this kind are word tiles.
    #[must_use]
    pub fn is_text(&self) -> bool {
        !matches!(self, TypeKind::Plain)
    }
}

/// A registered entity type: string identifier plus its classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Identifier within the registry.
    pub id: TypeId,
    /// Unique string identifier (e.g. `"rock"`, `"text_rock"`).
    pub name: String,
    /// Closed classification driving grammar and evaluation.
    pub kind: TypeKind,
}

/// Vocabulary registry mapping string identifiers to typed descriptors.
///
/// ## Example
///
/// ```
/// use wordbound::core::{TypeRegistry, TypeKind, VerbKind, Property};
///
/// let mut registry = TypeRegistry::new();
/// let rock = registry.register_plain("rock");
/// let text_rock = registry.register_noun("text_rock", rock);
/// let is = registry.register_verb("text_is", VerbKind::Is, true, true);
/// let push = registry.register_property("text_push", Property::Push);
///
/// assert_eq!(registry.lookup("rock"), Some(rock));
/// assert!(registry.kind(text_rock).is_text());
/// assert!(!registry.kind(rock).is_text());
/// # let _ = (is, push);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: Vec<TypeDescriptor>,
    #[serde(skip)]
    by_name: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            panic!("type {name:?} already registered");
        }
        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.types.push(TypeDescriptor { id, name, kind });
        id
    }

    /// Register an ordinary object type.
    pub fn register_plain(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::Plain)
    }

    /// Register a noun tile referencing an already-registered type.
    pub fn register_noun(&mut self, name: impl Into<String>, refers_to: TypeId) -> TypeId {
        assert!(
            (refers_to.0 as usize) < self.types.len(),
            "noun references unknown type {refers_to:?}"
        );
        self.register(name, TypeKind::Noun { refers_to })
    }

    /// Register a verb tile with its effect capability flags.
    pub fn register_verb(
        &mut self,
        name: impl Into<String>,
        kind: VerbKind,
        accepts_noun: bool,
        accepts_property: bool,
    ) -> TypeId {
        self.register(
            name,
            TypeKind::Verb {
                kind,
                accepts_noun,
                accepts_property,
            },
        )
    }

    /// Register a property tile.
    pub fn register_property(&mut self, name: impl Into<String>, property: Property) -> TypeId {
        self.register(name, TypeKind::Property(property))
    }

    /// Register a condition tile.
    pub fn register_condition(&mut self, name: impl Into<String>, kind: ConditionKind) -> TypeId {
        self.register(name, TypeKind::Condition(kind))
    }

    /// Register the AND connective tile.
    pub fn register_and(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::And)
    }

    /// Get the descriptor for a type.
    ///
    /// Panics on an unregistered id — type ids only originate from this
    /// registry, so a miss is an internal consistency bug.
    #[must_use]
    pub fn descriptor(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.0 as usize]
    }

    /// Get the classification of a type.
    #[must_use]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.descriptor(id).kind
    }

    /// Get the string name of a type.
    #[must_use]
    pub fn name(&self, id: TypeId) -> &str {
        &self.descriptor(id).name
    }

    /// Whether entities of the given type are word tiles.
    #[must_use]
    pub fn is_text(&self, id: TypeId) -> bool {
        self.kind(id).is_text()
    }

    /// Look up a type by its string identifier.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// Rebuild the name index after deserialization.
    pub fn rebuild_index(&mut self) {
        self.by_name = self
            .types
            .iter()
            .map(|d| (d.name.clone(), d.id))
            .collect();
    }
}
