//! The level grid: a mutable spatial index of entities.
//!
//! `LevelMap` follows an arena+index layout: entities live in an id-keyed
//! table, and two index tables map entity→position and cell→entities. The
//! tables are `im` persistent maps, so the full structural clone the
//! collision resolver takes per direction batch is O(1) and shares entity
//! payloads with the original.
//!
//! Index consistency is an invariant: every tracked entity appears in
//! exactly one cell, and the two indexes always agree. Querying an entity
//! the map does not track is a contract violation and panics.

mod map;
mod position;

pub use map::LevelMap;
pub use position::Position;
