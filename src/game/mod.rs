//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The play loop drives it with ticks and turns and draws from a [`Snapshot`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameState, TickOutcome};
pub use snapshot::Snapshot;
pub use state::{CollisionType, Phase, Position, Snake};
