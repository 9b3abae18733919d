//! Snake Field - a terminal Snake game with a food distance overlay
//!
//! This library provides:
//! - Core game logic and the breadth-first distance field (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
