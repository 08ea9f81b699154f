//! No Thanks! game state and rules.

use std::fmt;

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::GameConfig;
use super::scoring::{group_runs, resolve_winner, score_cards, Card, Score};
use crate::core::{ActionError, ConfigError, GameRng, PlayerId, PlayerMap};
use crate::rules::GameState;

/// The two choices facing the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NoThanksAction {
    /// Take the card and the coins on it. Always legal.
    Take = 0,
    /// Pay one coin onto the card and pass it on. Needs a coin.
    Pass = 1,
}

impl NoThanksAction {
    /// Stable numeric id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl From<NoThanksAction> for u8 {
    fn from(action: NoThanksAction) -> Self {
        action.id()
    }
}

impl TryFrom<u8> for NoThanksAction {
    type Error = ActionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Take),
            1 => Ok(Self::Pass),
            other => Err(ActionError::UnknownId(other)),
        }
    }
}

impl fmt::Display for NoThanksAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Take => write!(f, "take"),
            Self::Pass => write!(f, "no thanks"),
        }
    }
}

/// Full state of a game in progress.
///
/// Card ownership uses `im` persistent sets so the many clones made by the
/// planner share structure until they diverge.
///
/// Omitted cards are never chosen up front. Their deck flags stay set for
/// the whole game, so the number of set flags is always
/// `cards_in_deck + omitted_cards`; whichever cards are still flagged when
/// the deck runs out were the omitted ones.
#[derive(Clone, Debug)]
pub struct NoThanksState {
    config: GameConfig,

    /// Presence flag per card value, indexed from `min_card`. Cleared once dealt.
    deck: Vector<bool>,

    /// Cards still to be dealt, omitted cards excluded.
    cards_in_deck: u32,

    card_in_play: Option<Card>,
    coins_in_play: u32,

    player_cards: PlayerMap<OrdSet<Card>>,

    /// Runs of consecutive cards per player; rebuilt on every take.
    player_runs: PlayerMap<Vec<Vec<Card>>>,

    player_coins: PlayerMap<u32>,
    current_player: PlayerId,
    game_over: bool,

    /// Resolved once, when the last card is taken.
    winner: Option<PlayerId>,

    rng: GameRng,
}

impl NoThanksState {
    /// Start a game, dealing a random first card.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut state = Self::undealt(config, seed)?;
        state.deal_next();
        Ok(state)
    }

    /// Start a game with a chosen first card.
    pub fn with_first_card(config: GameConfig, card: Card, seed: u64) -> Result<Self, ConfigError> {
        if !config.contains(card) {
            return Err(ConfigError::FirstCardOutOfRange {
                card,
                min: config.min_card,
                max: config.max_card,
            });
        }
        let mut state = Self::undealt(config, seed)?;
        state.remove_from_deck(card);
        Ok(state)
    }

    fn undealt(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = config.player_count;

        Ok(Self {
            config,
            deck: std::iter::repeat(true).take(config.deck_size() as usize).collect(),
            cards_in_deck: config.dealt_cards(),
            card_in_play: None,
            coins_in_play: 0,
            player_cards: PlayerMap::with_default(players),
            player_runs: PlayerMap::with_default(players),
            player_coins: PlayerMap::with_value(players, config.starting_coins),
            current_player: PlayerId::new(0),
            game_over: false,
            winner: None,
            rng: GameRng::new(seed),
        })
    }

    /// Draw uniformly from the cards nobody has seen yet.
    ///
    /// The pool counts undealt and omitted cards alike, so an omitted card
    /// is indistinguishable from one still waiting in the deck.
    fn draw_card(&mut self) -> Option<Card> {
        let unknown = (self.cards_in_deck + self.config.omitted_cards) as usize;
        if unknown == 0 {
            return None;
        }
        let target = self.rng.gen_range_usize(0..unknown);

        self.deck
            .iter()
            .enumerate()
            .filter(|(_, &present)| present)
            .nth(target)
            .map(|(offset, _)| self.config.min_card + offset as Card)
    }

    fn remove_from_deck(&mut self, card: Card) {
        self.deck.set((card - self.config.min_card) as usize, false);
        self.cards_in_deck -= 1;
        self.card_in_play = Some(card);
    }

    /// Put the next card on the table, or end the game if none are left.
    fn deal_next(&mut self) {
        if self.cards_in_deck == 0 {
            self.finish();
            return;
        }
        match self.draw_card() {
            Some(card) => self.remove_from_deck(card),
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.card_in_play = None;
        self.game_over = true;

        let scores = self.scores();
        let winner = resolve_winner(&scores, &self.player_coins, &mut self.rng);
        debug!(%winner, scores = ?scores.as_slice(), "game over");
        self.winner = Some(winner);
    }

    fn take(&mut self) {
        let player = self.current_player;
        self.player_coins[player] += self.coins_in_play;
        self.coins_in_play = 0;

        if let Some(card) = self.card_in_play.take() {
            self.player_cards[player].insert(card);
            self.player_runs[player] = group_runs(self.player_cards[player].iter().copied());
        }

        // The taker keeps the turn and faces the next card.
        self.deal_next();
    }

    fn pass(&mut self) {
        self.player_coins[self.current_player] -= 1;
        self.coins_in_play += 1;
        self.current_player = self.current_player.next(self.config.player_count);
    }

    /// Current scores, lowest best. Live standings before the game ends.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<Score> {
        PlayerMap::new(self.config.player_count, |p| {
            score_cards(self.player_cards[p].iter().copied(), self.player_coins[p])
        })
    }

    /// Winner after tie-breaks, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn card_in_play(&self) -> Option<Card> {
        self.card_in_play
    }

    #[must_use]
    pub fn coins_in_play(&self) -> u32 {
        self.coins_in_play
    }

    /// Cards still to be dealt, omitted cards excluded.
    #[must_use]
    pub fn cards_in_deck(&self) -> u32 {
        self.cards_in_deck
    }

    /// Whether `card` has not been dealt yet (it may be an omitted card).
    #[must_use]
    pub fn is_undealt(&self, card: Card) -> bool {
        self.config.contains(card)
            && self
                .deck
                .get((card - self.config.min_card) as usize)
                .copied()
                .unwrap_or(false)
    }

    /// Count of cards nobody has seen: undealt plus omitted.
    #[must_use]
    pub fn unseen_cards(&self) -> usize {
        self.deck.iter().filter(|&&present| present).count()
    }

    /// Cards owned by `player`, ascending.
    #[must_use]
    pub fn player_cards(&self, player: PlayerId) -> &OrdSet<Card> {
        &self.player_cards[player]
    }

    /// Runs of consecutive cards owned by `player`, ascending.
    #[must_use]
    pub fn player_runs(&self, player: PlayerId) -> &[Vec<Card>] {
        &self.player_runs[player]
    }

    #[must_use]
    pub fn player_coins(&self, player: PlayerId) -> u32 {
        self.player_coins[player]
    }
}

impl GameState for NoThanksState {
    type Action = NoThanksAction;

    fn player_count(&self) -> usize {
        self.config.player_count
    }

    fn acting_player(&self) -> PlayerId {
        self.current_player
    }

    fn legal_actions(&self) -> Vec<NoThanksAction> {
        if self.game_over {
            Vec::new()
        } else if self.player_coins[self.current_player] == 0 {
            vec![NoThanksAction::Take]
        } else {
            vec![NoThanksAction::Take, NoThanksAction::Pass]
        }
    }

    fn apply(&mut self, action: NoThanksAction) -> Result<(), ActionError> {
        if self.game_over {
            return Err(ActionError::GameOver);
        }
        if !self.is_legal(action) {
            return Err(ActionError::Illegal {
                action: format!("{:?}", action),
                player: self.current_player,
            });
        }

        match action {
            NoThanksAction::Take => self.take(),
            NoThanksAction::Pass => self.pass(),
        }
        Ok(())
    }

    fn clone_state(&mut self) -> Self {
        let rng = self.rng.fork();
        Self { rng, ..self.clone() }
    }

    fn is_terminal(&self) -> bool {
        self.game_over
    }

    fn terminal_values(&self) -> PlayerMap<f64> {
        PlayerMap::new(self.config.player_count, |p| match self.winner {
            Some(winner) if winner == p => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        })
    }
}

impl fmt::Display for NoThanksState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(winner) => writeln!(f, "Game over, {} wins", winner)?,
            None => writeln!(f, "{}'s turn", self.current_player)?,
        }
        match self.card_in_play {
            Some(card) => writeln!(f, "Card in play: {} ({} coins)", card, self.coins_in_play)?,
            None => writeln!(f, "Card in play: none")?,
        }
        for (player, runs) in self.player_runs.iter() {
            let runs: Vec<String> = runs
                .iter()
                .map(|run| {
                    run.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
                })
                .collect();
            writeln!(
                f,
                "{}: [{}] coins {}",
                player,
                runs.join(" | "),
                self.player_coins[player]
            )?;
        }
        Ok(())
    }
}
