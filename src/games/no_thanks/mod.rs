//! No Thanks!, the card game.
//!
//! - Cards run from `min_card` to `max_card`; a few are set aside unseen
//! - On your turn: take the card in play with its coins, or pay one coin
//!   to pass it to the next player
//! - Taking a card keeps the turn with you for the next card
//! - Only the lowest card of each run of consecutive cards scores;
//!   each coin held subtracts one; lowest score wins
//!
//! Supports 2-255 players.

mod config;
mod game;
mod scoring;

pub use config::{GameConfig, NoThanksBuilder, MAX_DECK_SIZE};
pub use game::{NoThanksAction, NoThanksState};
pub use scoring::{group_runs, resolve_winner, score_cards, Card, Score};
