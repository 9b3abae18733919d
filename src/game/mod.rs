//! Core game logic for Snake
//!
//! This module contains the grid model, the tick rule and the food distance
//! field, without any I/O or rendering dependencies.

pub mod action;
pub mod config;
pub mod distance;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{FoodPlacement, GameConfig, MAX_TILE_SIZE};
pub use distance::{DistanceField, UNREACHED};
pub use engine::{GameEngine, StepResult, StepStatus};
pub use state::{CollisionType, GameState, Position, Snake};
