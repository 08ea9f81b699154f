//! Planner policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: Which visited child to descend into (UCB1)
//! - `SimulationPolicy`: How to play out a rollout (uniform random)

use crate::core::{ActionError, GameRng, PlayerMap};
use crate::rules::GameState;

use super::config::PlannerConfig;
use super::node::NodeId;
use super::tree::SearchTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
///
/// Only consulted once every child of `parent` has been visited; unvisited
/// children are picked at random by the planner first.
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Returns the position in `parent.children` of the child to follow.
    fn select(&self, tree: &SearchTree<S>, parent: NodeId, config: &PlannerConfig) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: Q(a) + c * sqrt(ln(N) / n(a)), with Q measured for the player
/// acting at the parent. Ties keep the earliest child.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl<S: GameState> SelectionPolicy<S> for UCB1 {
    fn select(&self, tree: &SearchTree<S>, parent: NodeId, config: &PlannerConfig) -> usize {
        let node = tree.get(parent);
        let player = node.state.acting_player();

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, &child_id) in node.children.iter().enumerate() {
            let child = tree.get(child_id);
            let score = ucb1(
                child.value[player],
                child.visits,
                node.visits,
                config.exploration_constant,
            );
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}

/// UCB1 score of a child with `total_value` over `visits`.
///
/// Unvisited children score infinity.
#[must_use]
pub fn ucb1(total_value: f64, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = visits as f64;
    let exploitation = total_value / visits;
    let ln_parent = (parent_visits.max(1) as f64).ln();
    exploitation + exploration * (ln_parent / visits).sqrt()
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Play `state` out to the end, returning rewards per player.
    ///
    /// `state` is a scratch copy; it is consumed by the rollout.
    fn simulate(&self, state: &mut S, rng: &mut GameRng) -> Result<PlayerMap<f64>, ActionError>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal actions until the game ends.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<S: GameState> SimulationPolicy<S> for RandomSimulation {
    fn simulate(&self, state: &mut S, rng: &mut GameRng) -> Result<PlayerMap<f64>, ActionError> {
        while !state.is_terminal() {
            let actions = state.legal_actions();
            let Some(&action) = rng.choose(&actions) else {
                break;
            };
            state.apply(action)?;
        }
        Ok(state.terminal_values())
    }
}
