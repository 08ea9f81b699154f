//! # nothanks-mcts
//!
//! Move selection for the card game *No Thanks!* using Monte Carlo Tree
//! Search.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Search**: The planner only sees the `GameState`
//!    trait. No Thanks! is one implementation of it.
//!
//! 2. **N-Player First**: Rewards, coins and cards are kept per player in a
//!    `PlayerMap`. Nothing assumes two players.
//!
//! 3. **Hidden Cards Stay Hidden**: Omitted cards are never chosen, only
//!    counted, so no state copy can reveal them.
//!
//! ## Architecture
//!
//! - **Owned Snapshots**: Every tree node holds its own copy of the game.
//!   Copies fork the RNG so siblings sample different futures.
//!
//! - **Persistent Data Structures**: Card sets use `im` so copies share
//!   structure until they diverge.
//!
//! - **Explicit Failure**: Illegal actions, bad configurations and searches
//!   that cannot decide are errors, never silent no-ops.
//!
//! ## Modules
//!
//! - `core`: Players, per-player maps, RNG, errors
//! - `rules`: The `GameState` trait
//! - `games`: The No Thanks! rules engine
//! - `mcts`: Monte Carlo Tree Search planner

pub mod core;
pub mod rules;
pub mod games;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{ActionError, ConfigError, GameRng, PlayerId, PlayerMap};

pub use crate::rules::GameState;

pub use crate::games::no_thanks::{
    GameConfig, NoThanksAction, NoThanksBuilder, NoThanksState,
};

pub use crate::mcts::{
    plan, ChildReport, MCTSPlanner, PlannerConfig, SearchError, SearchObserver,
    SearchStats, TracingObserver, TreeStats,
};
