//! The game-state contract the planner searches over.
//!
//! Games implement `GameState` to define:
//! - Who acts and which actions are legal
//! - How an action moves the state to the next decision point
//! - Terminal rewards
//!
//! The planner calls into `GameState` but never interprets game-specific
//! concepts directly.

pub mod engine;

pub use engine::GameState;
