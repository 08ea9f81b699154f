//! Core MCTS search algorithm.
//!
//! Each iteration runs select, expand, simulate, backpropagate:
//!
//! 1. Selection: from the root, while the node has children, pick a random
//!    unvisited child if there is one, else the UCB1 maximiser
//! 2. Expansion: a leaf that has been visited before and is not terminal
//!    gets one child per legal action; descend into a random one
//! 3. Simulation: random playout from a scratch copy of the leaf's state
//! 4. Backpropagation: add the reward vector to every node up to the root
//!
//! Iterations repeat until the wall-clock budget is spent. The budget is
//! only checked between iterations, so a search can run over by up to one
//! rollout. The tree is built fresh for each search and dropped before the
//! call returns.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{ActionError, GameRng};
use crate::rules::GameState;

use super::config::PlannerConfig;
use super::node::NodeId;
use super::observer::{ChildReport, SearchObserver, TracingObserver};
use super::policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::{SearchTree, TreeStats};

/// Errors that can occur during a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Cannot plan from a finished game")]
    TerminalRoot,

    #[error("No decision after {iterations} iterations; time budget too small")]
    NoDecision { iterations: u32 },

    #[error("Rejected action during search: {0}")]
    Action(#[from] ActionError),
}

/// MCTS planner.
///
/// Generic over the game state type. Holds configuration, its own RNG and
/// the policies; the tree exists only for the duration of one search.
pub struct MCTSPlanner<S: GameState> {
    /// Search configuration.
    config: PlannerConfig,

    /// RNG for selection, expansion and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy<S>>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<S>>,

    /// Statistics of the last search.
    stats: SearchStats,

    /// Shape of the last tree, taken before it was dropped.
    tree_stats: TreeStats,

    /// Root children of the last search, in legal-action order.
    root_children: Vec<ChildReport<S::Action>>,
}

impl<S: GameState> MCTSPlanner<S> {
    /// Create a new planner.
    pub fn new(config: PlannerConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
            tree_stats: TreeStats::default(),
            root_children: Vec::new(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<P: SelectionPolicy<S> + 'static>(mut self, selection: P) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<P: SimulationPolicy<S> + 'static>(mut self, simulation: P) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Search from `state` for `budget` and return the chosen action.
    ///
    /// Verbose diagnostics, if enabled, go to `tracing`.
    ///
    /// Takes `&mut S` because copying the state into the tree forks its RNG.
    pub fn search(&mut self, state: &mut S, budget: Duration) -> Result<S::Action, SearchError> {
        self.search_observed(state, budget, &mut TracingObserver)
    }

    /// Like `search`, with verbose diagnostics sent to `observer`.
    pub fn search_observed(
        &mut self,
        state: &mut S,
        budget: Duration,
        observer: &mut dyn SearchObserver<S::Action>,
    ) -> Result<S::Action, SearchError> {
        let start = Instant::now();
        self.stats.reset();
        self.tree_stats = TreeStats::default();
        self.root_children.clear();

        if state.is_terminal() {
            return Err(SearchError::TerminalRoot);
        }

        let mut tree = SearchTree::new(state.clone_state());

        while !self.budget_spent(start, budget) {
            self.iteration(&mut tree)?;
            self.stats.iterations += 1;
        }

        let elapsed = start.elapsed();
        self.stats.time_us = elapsed.as_micros() as u64;
        self.stats.overshoot_us = elapsed.saturating_sub(budget).as_micros() as u64;
        self.tree_stats = tree.stats();
        self.root_children = summarize_root(&tree);
        drop(tree);

        if self.config.verbose {
            for report in &self.root_children {
                observer.on_child(report);
            }
            observer.on_finish(&self.stats);
        }

        debug!(
            iterations = self.stats.iterations,
            nodes = self.tree_stats.node_count,
            time_us = self.stats.time_us,
            overshoot_us = self.stats.overshoot_us,
            iterations_per_second = self.stats.iterations_per_second(),
            "search complete"
        );

        self.best_action().ok_or(SearchError::NoDecision {
            iterations: self.stats.iterations,
        })
    }

    fn budget_spent(&self, start: Instant, budget: Duration) -> bool {
        let capped = self.config.max_iterations > 0
            && self.stats.iterations >= self.config.max_iterations;
        capped || start.elapsed() >= budget
    }

    /// Single iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree<S>) -> Result<(), SearchError> {
        let mut current = tree.root();

        // === SELECTION ===
        while !tree.get(current).is_leaf() {
            current = self.select_child(tree, current);
        }

        // === EXPANSION ===
        let node = tree.get(current);
        if node.visits > 0 && !node.state.is_terminal() {
            current = self.expand(tree, current)?;
        }

        // === SIMULATION ===
        let mut scratch = tree.get_mut(current).state.clone_state();
        let rewards = self.simulation.simulate(&mut scratch, &mut self.rng)?;
        self.stats.simulations += 1;

        // === BACKPROPAGATION ===
        tree.backpropagate(current, &rewards);
        Ok(())
    }

    /// Pick an unvisited child at random, else defer to the selection policy.
    fn select_child(&mut self, tree: &SearchTree<S>, parent: NodeId) -> NodeId {
        let node = tree.get(parent);
        let unvisited: SmallVec<[NodeId; 8]> = node
            .children
            .iter()
            .copied()
            .filter(|&child| tree.get(child).visits == 0)
            .collect();

        if let Some(&child) = self.rng.choose(&unvisited) {
            return child;
        }

        let idx = self.selection.select(tree, parent, &self.config);
        node.children[idx]
    }

    /// Give `node_id` one child per legal action and return a random one.
    fn expand(&mut self, tree: &mut SearchTree<S>, node_id: NodeId) -> Result<NodeId, SearchError> {
        let actions = tree.get(node_id).state.legal_actions();

        for action in actions {
            let mut child_state = tree.get_mut(node_id).state.clone_state();
            child_state.apply(action)?;
            tree.add_child(node_id, child_state, action);
        }

        let node = tree.get(node_id);
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(node.depth + 1);
        trace!(node = %node_id, children = node.children.len(), "expanded");

        Ok(self.rng.choose(&node.children).copied().unwrap_or(node_id))
    }

    /// Most visited root child; the earliest wins a tie.
    fn best_action(&self) -> Option<S::Action> {
        let mut best: Option<&ChildReport<S::Action>> = None;
        for report in &self.root_children {
            if best.map_or(true, |b| report.visits > b.visits) {
                best = Some(report);
            }
        }
        best.map(|report| report.action)
    }

    /// Get statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Shape of the last search tree.
    #[must_use]
    pub fn tree_stats(&self) -> &TreeStats {
        &self.tree_stats
    }

    /// Root children of the last search.
    #[must_use]
    pub fn root_children(&self) -> &[ChildReport<S::Action>] {
        &self.root_children
    }

    /// Get action visit counts from the last root.
    pub fn action_visits(&self) -> Vec<(S::Action, u32)> {
        self.root_children
            .iter()
            .map(|r| (r.action, r.visits))
            .collect()
    }

    /// Get action probabilities from the last root.
    ///
    /// Returns (action, probability) pairs where probabilities sum to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(S::Action, f64)> {
        let total: u32 = self.root_children.iter().map(|r| r.visits).sum();

        if total == 0 {
            let uniform = 1.0 / self.root_children.len().max(1) as f64;
            return self
                .root_children
                .iter()
                .map(|r| (r.action, uniform))
                .collect();
        }

        self.root_children
            .iter()
            .map(|r| (r.action, r.visits as f64 / total as f64))
            .collect()
    }

    /// Get the configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

fn summarize_root<S: GameState>(tree: &SearchTree<S>) -> Vec<ChildReport<S::Action>> {
    let root = tree.root_node();
    let player = root.state.acting_player();

    root.children
        .iter()
        .filter_map(|&id| {
            let child = tree.get(id);
            child.action.map(|action| ChildReport {
                action,
                visits: child.visits,
                value: child.value.clone(),
                mean_value: child.mean_value(player),
            })
        })
        .collect()
}

/// Choose an action for the player to act in `state`.
///
/// Runs a default-configured search for `time_budget_secs` seconds. With
/// `verbose`, per-child records are logged through `tracing`.
///
/// Zero, negative and NaN budgets run no iterations and fail with
/// `NoDecision`. Budgets too large for a `Duration`, infinity included, are
/// clamped to `Duration::MAX`.
pub fn plan<S: GameState>(
    state: &mut S,
    time_budget_secs: f64,
    verbose: bool,
) -> Result<S::Action, SearchError> {
    let budget = budget_from_secs(time_budget_secs);
    let config = PlannerConfig::default().with_verbose(verbose);
    MCTSPlanner::new(config).search(state, budget)
}

fn budget_from_secs(secs: f64) -> Duration {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
