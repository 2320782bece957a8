//! Turn execution: intents, collision resolution, interactions.

mod collision;
mod intent;
mod interaction;
mod orchestrator;

pub use collision::CollisionResolver;
pub use intent::MoveIntent;
pub use interaction::InteractionHandler;
pub use orchestrator::{run_turn, TurnReport};
