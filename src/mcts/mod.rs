//! Monte Carlo Tree Search planner.
//!
//! ## Overview
//!
//! A plain UCT planner that works with any `GameState`:
//!
//! - **Arena Tree**: Nodes own their state snapshot; parents are indices
//! - **N-Player Values**: Rewards are stored per player and read from the
//!   viewpoint of whoever acts at the parent
//! - **Time Budget**: Iterations run until the wall clock runs out
//! - **Observable**: Verbose searches report root statistics to a
//!   `SearchObserver` instead of printing
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use nothanks_mcts::games::no_thanks::NoThanksBuilder;
//! use nothanks_mcts::mcts::{MCTSPlanner, PlannerConfig};
//!
//! let mut state = NoThanksBuilder::new().player_count(3).build(7).unwrap();
//!
//! let config = PlannerConfig::default().with_max_iterations(500);
//! let mut planner = MCTSPlanner::new(config);
//! let action = planner.search(&mut state, Duration::from_secs(5)).unwrap();
//!
//! for (action, prob) in planner.action_probabilities() {
//!     println!("{}: {:.2}%", action, prob * 100.0);
//! }
//! # let _ = action;
//! ```

pub mod config;
pub mod node;
pub mod observer;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::PlannerConfig;
pub use node::{NodeId, SearchNode};
pub use observer::{ChildReport, RecordingObserver, SearchObserver, TracingObserver};
pub use policy::{ucb1, RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::{plan, MCTSPlanner, SearchError};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
