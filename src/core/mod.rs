//! Core model: entities, directions, types, configuration.

mod config;
mod direction;
mod entity;
mod types;

pub use config::{EngineConfig, EngineError};
pub use direction::Direction;
pub use entity::{Entity, EntityId};
pub use types::{
    ConditionKind, Property, TypeDescriptor, TypeId, TypeKind, TypeRegistry, VerbKind,
};
