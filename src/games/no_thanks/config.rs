//! Table setup for a game of No Thanks!

use serde::{Deserialize, Serialize};

use super::game::NoThanksState;
use super::scoring::Card;
use crate::core::ConfigError;

/// Most card values a deck may span.
pub const MAX_DECK_SIZE: u32 = u16::MAX as u32;

/// Immutable game parameters.
///
/// Cards run from `min_card` to `max_card` inclusive. `omitted_cards` of
/// them are set aside unseen before play and never revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Lowest card value.
    pub min_card: Card,

    /// Highest card value.
    pub max_card: Card,

    /// Number of seats (2-255).
    pub player_count: usize,

    /// Coins each player starts with.
    pub starting_coins: u32,

    /// Cards removed from play without being revealed.
    pub omitted_cards: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_card: 3,
            max_card: 35,
            player_count: 3,
            starting_coins: 11,
            omitted_cards: 9,
        }
    }
}

impl GameConfig {
    /// Create and validate a configuration.
    pub fn new(
        min_card: Card,
        max_card: Card,
        player_count: usize,
        starting_coins: u32,
        omitted_cards: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            min_card,
            max_card,
            player_count,
            starting_coins,
            omitted_cards,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that a game with these parameters can be played to the end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=255).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.max_card < self.min_card {
            return Err(ConfigError::EmptyCardRange {
                min: self.min_card,
                max: self.max_card,
            });
        }
        if self.max_card - self.min_card >= MAX_DECK_SIZE {
            return Err(ConfigError::DeckTooLarge {
                min: self.min_card,
                max: self.max_card,
                limit: MAX_DECK_SIZE,
            });
        }
        if self
            .starting_coins
            .checked_mul(self.player_count as u32)
            .is_none()
        {
            return Err(ConfigError::TooManyCoins {
                coins: self.starting_coins,
                players: self.player_count,
            });
        }
        let deck_size = self.deck_size();
        if self.omitted_cards.saturating_add(1) >= deck_size {
            return Err(ConfigError::TooManyOmitted {
                omitted: self.omitted_cards,
                deck_size,
            });
        }
        Ok(())
    }

    /// Number of distinct card values, omitted ones included.
    ///
    /// Only meaningful for a configuration that passes `validate`.
    #[must_use]
    pub fn deck_size(&self) -> u32 {
        self.max_card - self.min_card + 1
    }

    /// Number of cards that will be offered over a full game.
    #[must_use]
    pub fn dealt_cards(&self) -> u32 {
        self.deck_size() - self.omitted_cards
    }

    /// Coins at the table; conserved for the whole game.
    ///
    /// Saturates for configurations that `validate` rejects.
    #[must_use]
    pub fn total_coins(&self) -> u32 {
        self.starting_coins.saturating_mul(self.player_count as u32)
    }

    /// Whether `card` lies inside the card range.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        (self.min_card..=self.max_card).contains(&card)
    }

    pub fn with_card_range(mut self, min_card: Card, max_card: Card) -> Self {
        self.min_card = min_card;
        self.max_card = max_card;
        self
    }

    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_starting_coins(mut self, coins: u32) -> Self {
        self.starting_coins = coins;
        self
    }

    pub fn with_omitted_cards(mut self, omitted: u32) -> Self {
        self.omitted_cards = omitted;
        self
    }
}

/// Builder for a fresh game state.
///
/// ```
/// use nothanks_mcts::games::no_thanks::NoThanksBuilder;
///
/// let state = NoThanksBuilder::new()
///     .player_count(4)
///     .starting_coins(7)
///     .build(42)
///     .unwrap();
///
/// assert!(state.card_in_play().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct NoThanksBuilder {
    config: GameConfig,
    first_card: Option<Card>,
}

impl NoThanksBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_range(mut self, min_card: Card, max_card: Card) -> Self {
        self.config = self.config.with_card_range(min_card, max_card);
        self
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.config = self.config.with_player_count(count);
        self
    }

    pub fn starting_coins(mut self, coins: u32) -> Self {
        self.config = self.config.with_starting_coins(coins);
        self
    }

    pub fn omitted_cards(mut self, omitted: u32) -> Self {
        self.config = self.config.with_omitted_cards(omitted);
        self
    }

    /// Open with a chosen card instead of a random draw.
    pub fn first_card(mut self, card: Card) -> Self {
        self.first_card = Some(card);
        self
    }

    /// The configuration built so far (unvalidated).
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Validate the configuration and deal the first card.
    pub fn build(self, seed: u64) -> Result<NoThanksState, ConfigError> {
        match self.first_card {
            Some(card) => NoThanksState::with_first_card(self.config, card, seed),
            None => NoThanksState::new(self.config, seed),
        }
    }
}
