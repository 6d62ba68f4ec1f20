mod fruit;
mod fruit_manager;
mod game_state;

// Re-export all public types
pub use fruit::{Fruit, FruitKind, SpriteVariant};
pub use fruit_manager::FruitManager;
pub use game_state::GameState;
