//! `GameState` trait for game implementations.
//!
//! A state is owned by whoever holds it (the application, or one node of a
//! search tree) and only ever changes through `apply`.

use std::fmt::Debug;

use crate::core::{ActionError, PlayerId, PlayerMap};

/// Capability set the planner needs from a playable game state.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty if and only if the state is terminal
/// - `apply`: must reject anything outside `legal_actions` with an error
/// - `clone_state`: deep copy with a forked RNG, sharing no mutable data
/// - `terminal_values`: all zero until the state is terminal
pub trait GameState: Sized {
    /// Action identifier. Small and copyable; compared for legality checks.
    type Action: Copy + Eq + Debug;

    /// Number of seats at the table.
    fn player_count(&self) -> usize;

    /// Player who must choose next. Unspecified once terminal.
    fn acting_player(&self) -> PlayerId;

    /// Legal actions for the acting player, in a stable order.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Whether `action` may be applied right now.
    fn is_legal(&self, action: Self::Action) -> bool {
        self.legal_actions().contains(&action)
    }

    /// Advance the state to the next decision point.
    fn apply(&mut self, action: Self::Action) -> Result<(), ActionError>;

    /// Deep, independent copy.
    ///
    /// Takes `&mut self` because the copy receives a fork of this state's
    /// RNG, so its future draws differ from the original's.
    fn clone_state(&mut self) -> Self;

    /// Check if the game is over.
    fn is_terminal(&self) -> bool;

    /// Per-player rewards. Meaningful only when terminal; all zero otherwise.
    fn terminal_values(&self) -> PlayerMap<f64>;
}
