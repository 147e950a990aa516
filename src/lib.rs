//! Grid Snake - the classic Snake game on a fixed grid, played in the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Phase-aware keyboard mapping (input module)
//! - TUI rendering from game snapshots (render module)
//! - In-memory session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
