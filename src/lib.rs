//! My Time Machine: a time paradox puzzle of the 20th century
//!
//! Travel between five eras, collect era-specific items and use them to put
//! history back on track. Three levels, one timeline.
//!
//! # Game Mechanics
//!
//! - **Eras**: 1920s, 1940s, 1960s, 1980s and 1990s, each with two items
//!   and two events
//! - **Inventory**: items travel with you; each can be held once
//! - **Levels**: every level has exactly one solving combination of item,
//!   event and era
//! - **Integrity**: the timeline's health, fully restored on victory
//!
//! # Architecture
//!
//! - `data` - Static tables for eras, items, events and the level script
//! - `game` - Session state, transition rules and the deferred-effect clock
//! - `config` - Timings and environment overrides
//! - `tui` - Terminal user interface with ratatui

pub mod config;
pub mod data;
pub mod game;
pub mod tui;

pub use config::{Config, Timings};
pub use data::*;
pub use game::{Game, GameSession, Intent, Outcome, Rejection};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown era: {0}")]
    UnknownEra(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}
