//! Core types: players, per-player storage, RNG, errors.
//!
//! These are game-agnostic; the rules engine and the planner both build on
//! them.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{ActionError, ConfigError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
