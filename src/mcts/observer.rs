//! Diagnostic records emitted by a verbose search.
//!
//! The planner never prints. With `verbose` set it hands one
//! `ChildReport` per root child to a `SearchObserver`, and the caller
//! decides how to show them.

use std::fmt::Debug;

use tracing::debug;

use super::stats::SearchStats;
use crate::core::PlayerMap;

/// Statistics for one child of the root after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildReport<A> {
    /// Action leading to this child.
    pub action: A,

    /// Times the child was visited.
    pub visits: u32,

    /// Summed rollout rewards, per player.
    pub value: PlayerMap<f64>,

    /// Average reward for the player acting at the root.
    pub mean_value: f64,
}

/// Receiver for search diagnostics.
pub trait SearchObserver<A> {
    /// Called once per root child, in legal-action order.
    fn on_child(&mut self, report: &ChildReport<A>);

    /// Called after the last child report.
    fn on_finish(&mut self, _stats: &SearchStats) {}
}

/// Forwards reports to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<A: Debug> SearchObserver<A> for TracingObserver {
    fn on_child(&mut self, report: &ChildReport<A>) {
        debug!(
            action = ?report.action,
            visits = report.visits,
            value = ?report.value.as_slice(),
            mean_value = report.mean_value,
            "root child"
        );
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        debug!(
            iterations = stats.iterations,
            simulations = stats.simulations,
            nodes_expanded = stats.nodes_expanded,
            time_us = stats.time_us,
            "search finished"
        );
    }
}

/// Keeps every report in memory.
#[derive(Clone, Debug)]
pub struct RecordingObserver<A> {
    pub reports: Vec<ChildReport<A>>,
    pub finished: Option<SearchStats>,
}

impl<A> Default for RecordingObserver<A> {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            finished: None,
        }
    }
}

impl<A: Clone> SearchObserver<A> for RecordingObserver<A> {
    fn on_child(&mut self, report: &ChildReport<A>) {
        self.reports.push(report.clone());
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        self.finished = Some(stats.clone());
    }
}
