//! Error types shared by the rules engine and the planner.

use thiserror::Error;

use super::player::PlayerId;

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Need between 2 and 255 players, got {0}")]
    PlayerCount(usize),

    #[error("Card range {min}..={max} is empty")]
    EmptyCardRange { min: u32, max: u32 },

    #[error("Omitting {omitted} of {deck_size} cards leaves fewer than two to deal")]
    TooManyOmitted { omitted: u32, deck_size: u32 },

    #[error("Card range {min}..={max} holds more than {limit} values")]
    DeckTooLarge { min: u32, max: u32, limit: u32 },

    #[error("{coins} coins for each of {players} players overflows the coin supply")]
    TooManyCoins { coins: u32, players: usize },

    #[error("First card {card} is outside {min}..={max}")]
    FirstCardOutOfRange { card: u32, min: u32, max: u32 },
}

/// An action that cannot be applied to the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Illegal action {action} for {player}")]
    Illegal { action: String, player: PlayerId },

    #[error("Game is already over")]
    GameOver,

    #[error("Unknown action id {0}")]
    UnknownId(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ActionError::Illegal {
            action: "Pass".to_string(),
            player: PlayerId::new(2),
        };
        assert_eq!(err.to_string(), "Illegal action Pass for Player 2");

        let err = ConfigError::TooManyOmitted { omitted: 4, deck_size: 5 };
        assert!(err.to_string().contains("fewer than two"));
    }
}
