//! The level map proper.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{Direction, Entity, EntityId, TypeId};

use super::position::Position;

/// Width x height grid holding zero or more entities per cell.
///
/// Cloning duplicates only the index tables (persistent maps), which is what
/// makes speculative push resolution cheap.
///
/// ## Example
///
/// ```
/// use wordbound::core::TypeRegistry;
/// use wordbound::grid::{LevelMap, Position};
///
/// let mut registry = TypeRegistry::new();
/// let rock = registry.register_plain("rock");
///
/// let mut map = LevelMap::new(8, 8);
/// let id = map.spawn(rock, Position::new(2, 3));
/// assert_eq!(map.position(id), Position::new(2, 3));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "LevelMapData", into = "LevelMapData")]
pub struct LevelMap {
    width: i32,
    height: i32,
    entities: ImHashMap<EntityId, Entity>,
    positions: ImHashMap<EntityId, Position>,
    cells: ImHashMap<Position, Vector<EntityId>>,
    next_entity_id: u32,
}

impl LevelMap {
    /// Create an empty map with the given dimensions.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 0 && height >= 0, "dimensions must be non-negative");
        Self {
            width,
            height,
            entities: ImHashMap::new(),
            positions: ImHashMap::new(),
            cells: ImHashMap::new(),
            next_entity_id: 0,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the coordinate lies within the map bounds.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the map holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Allocate a fresh entity id without placing anything.
    ///
    /// Actions that create entities allocate their id up front so redo
    /// re-creates the exact same entity.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Create a new entity of the given type at a position, facing down.
    ///
    /// This is the level-building entry point; during play entities are only
    /// created through actions.
    pub fn spawn(&mut self, type_id: TypeId, pos: Position) -> EntityId {
        let id = self.allocate_id();
        self.insert(Entity::new(id, type_id), pos);
        id
    }

    /// Insert a fully-formed entity at a position.
    ///
    /// Panics if the id is already tracked or the position is out of bounds.
    pub fn insert(&mut self, entity: Entity, pos: Position) {
        assert!(
            !self.entities.contains_key(&entity.id),
            "{} already tracked",
            entity.id
        );
        assert!(self.in_bounds(pos), "insert out of bounds at {pos}");
        let id = entity.id;
        self.entities.insert(id, entity);
        self.positions.insert(id, pos);
        self.cells.entry(pos).or_default().push_back(id);
    }

    /// Remove an entity, returning its last state.
    ///
    /// Panics if the entity is not tracked.
    pub fn remove(&mut self, id: EntityId) -> Entity {
        let entity = self
            .entities
            .remove(&id)
            .unwrap_or_else(|| panic!("{id} not tracked by this map"));
        let pos = self.positions.remove(&id).expect("position index out of sync");
        self.detach_from_cell(id, pos);
        entity
    }

    /// Move an entity to a new cell.
    ///
    /// Panics if the entity is not tracked or the target is out of bounds.
    pub fn set_position(&mut self, id: EntityId, pos: Position) {
        assert!(self.in_bounds(pos), "move out of bounds at {pos}");
        let old = *self
            .positions
            .get(&id)
            .unwrap_or_else(|| panic!("{id} not tracked by this map"));
        if old == pos {
            return;
        }
        self.detach_from_cell(id, old);
        self.positions.insert(id, pos);
        self.cells.entry(pos).or_default().push_back(id);
    }

    /// Set an entity's facing direction.
    pub fn set_direction(&mut self, id: EntityId, direction: Direction) {
        match self.entities.get_mut(&id) {
            Some(entity) => entity.direction = direction,
            None => panic!("{id} not tracked by this map"),
        }
    }

    /// The entity's current position. Panics if not tracked.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Position {
        *self
            .positions
            .get(&id)
            .unwrap_or_else(|| panic!("{id} not tracked by this map"))
    }

    /// The entity's instance data. Panics if not tracked.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &Entity {
        self.entities
            .get(&id)
            .unwrap_or_else(|| panic!("{id} not tracked by this map"))
    }

    /// Whether the map tracks the given id.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entity ids stacked at a cell, in insertion order.
    pub fn entities_at(&self, pos: Position) -> impl Iterator<Item = EntityId> + '_ {
        self.cells
            .get(&pos)
            .into_iter()
            .flat_map(|cell| cell.iter().copied())
    }

    /// All tracked entity ids, sorted for deterministic iteration.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn detach_from_cell(&mut self, id: EntityId, pos: Position) {
        let cell = self.cells.get_mut(&pos).expect("cell index out of sync");
        let index = cell
            .iter()
            .position(|&e| e == id)
            .expect("cell index out of sync");
        cell.remove(index);
        if cell.is_empty() {
            self.cells.remove(&pos);
        }
    }
}

/// Layout equality: same dimensions and identical entities at identical
/// positions. The id allocator is deliberately ignored — undo restores the
/// layout, not the allocation counter.
impl PartialEq for LevelMap {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.entities == other.entities
            && self.positions == other.positions
    }
}

impl Eq for LevelMap {}

/// Flat serialization form; the cell index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct LevelMapData {
    width: i32,
    height: i32,
    entities: Vec<(Entity, Position)>,
    next_entity_id: u32,
}

impl From<LevelMapData> for LevelMap {
    fn from(data: LevelMapData) -> Self {
        let mut map = LevelMap::new(data.width, data.height);
        for (entity, pos) in data.entities {
            map.insert(entity, pos);
        }
        map.next_entity_id = data.next_entity_id;
        map
    }
}

impl From<LevelMap> for LevelMapData {
    fn from(map: LevelMap) -> Self {
        let mut entities: Vec<(Entity, Position)> = map
            .entities
            .values()
            .map(|e| (*e, map.position(e.id)))
            .collect();
        entities.sort_by_key(|(e, _)| e.id);
        Self {
            width: map.width,
            height: map.height,
            entities,
            next_entity_id: map.next_entity_id,
        }
    }
}
