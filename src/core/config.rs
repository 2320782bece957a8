//! Engine configuration and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine-wide limits supplied by the embedding game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of entities a level may hold.
    ///
    /// Creation cascades (MORE) can grow a level without bound; when the
    /// population exceeds this limit the turn reports
    /// [`EngineError::LevelTooComplex`] so the caller can abort to a safe
    /// state.
    pub max_entities: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_entities: 4096 }
    }
}

/// Errors the engine reports upward.
///
/// A grid sequence that fails to parse as a rule is not an error — the
/// absence of a rule is a valid outcome. Internal consistency violations
/// (querying an entity the grid does not track) panic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The level's entity population exceeded the configured limit.
    #[error("level too complex: {count} entities exceeds limit {limit}")]
    LevelTooComplex { count: usize, limit: usize },
}
