//! Run grouping, scoring, and winner resolution.
//!
//! Only the lowest card of each run of consecutive values counts against a
//! player; every coin still held counts for them. Lowest score wins.

use crate::core::{GameRng, PlayerId, PlayerMap};

/// Face value of a card.
pub type Card = u32;

/// Final score. Lower is better and may be negative.
pub type Score = i64;

/// Partition cards into maximal runs of consecutive values, ascending.
///
/// ```
/// use nothanks_mcts::games::no_thanks::group_runs;
///
/// assert_eq!(group_runs([9, 4, 3, 5]), vec![vec![3, 4, 5], vec![9]]);
/// ```
pub fn group_runs(cards: impl IntoIterator<Item = Card>) -> Vec<Vec<Card>> {
    let mut sorted: Vec<Card> = cards.into_iter().collect();
    sorted.sort_unstable();

    let mut runs: Vec<Vec<Card>> = Vec::new();
    for card in sorted {
        match runs.last_mut() {
            Some(run) if run.last().map_or(false, |&prev| prev + 1 == card) => run.push(card),
            _ => runs.push(vec![card]),
        }
    }
    runs
}

/// Score a hand: the lowest card of each run, minus remaining coins.
pub fn score_cards(cards: impl IntoIterator<Item = Card>, coins: u32) -> Score {
    let penalty: Score = group_runs(cards)
        .iter()
        .filter_map(|run| run.first())
        .map(|&card| Score::from(card))
        .sum();
    penalty - Score::from(coins)
}

/// Pick the winner from final scores.
///
/// Lowest score wins. Ties go to the player holding the most coins; a tie
/// on coins too is broken uniformly at random among the remaining players.
pub fn resolve_winner(
    scores: &PlayerMap<Score>,
    coins: &PlayerMap<u32>,
    rng: &mut GameRng,
) -> PlayerId {
    let best = scores.values().copied().min().unwrap_or_default();
    let tied: Vec<PlayerId> = scores
        .iter()
        .filter(|(_, &score)| score == best)
        .map(|(player, _)| player)
        .collect();

    if tied.len() == 1 {
        return tied[0];
    }

    let most_coins = tied.iter().map(|&p| coins[p]).max().unwrap_or_default();
    let finalists: Vec<PlayerId> = tied.into_iter().filter(|&p| coins[p] == most_coins).collect();

    match rng.choose(&finalists) {
        Some(&winner) => winner,
        None => PlayerId::new(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_runs() {
        assert_eq!(group_runs([3, 4, 5, 9]), vec![vec![3, 4, 5], vec![9]]);
        assert_eq!(group_runs([20, 10, 12, 11]), vec![vec![10, 11, 12], vec![20]]);
        assert!(group_runs(Vec::new()).is_empty());
    }

    #[test]
    fn test_score_counts_lowest_of_each_run() {
        assert_eq!(score_cards([3, 4, 5, 9], 2), 10);
        assert_eq!(score_cards([35], 0), 35);
        assert_eq!(score_cards(Vec::new(), 11), -11);
    }

    #[test]
    fn test_unique_lowest_score_wins() {
        let scores = PlayerMap::from_vec(vec![12, 4, 30]);
        let coins = PlayerMap::from_vec(vec![9, 0, 9]);
        let mut rng = GameRng::new(1);

        assert_eq!(resolve_winner(&scores, &coins, &mut rng), PlayerId::new(1));
    }

    #[test]
    fn test_tie_broken_by_coins() {
        let scores = PlayerMap::from_vec(vec![7, 7, 2, 2]);
        let coins = PlayerMap::from_vec(vec![20, 1, 3, 5]);
        let mut rng = GameRng::new(1);

        assert_eq!(resolve_winner(&scores, &coins, &mut rng), PlayerId::new(3));
    }

    #[test]
    fn test_full_tie_is_uniform() {
        let scores = PlayerMap::from_vec(vec![5, 5, 5, 9]);
        let coins = PlayerMap::from_vec(vec![2, 2, 2, 2]);
        let mut rng = GameRng::new(42);

        let mut wins = [0u32; 4];
        for _ in 0..3000 {
            wins[resolve_winner(&scores, &coins, &mut rng).index()] += 1;
        }

        assert_eq!(wins[3], 0);
        for &count in &wins[..3] {
            assert!((850..=1150).contains(&count), "skewed tie-break: {:?}", wins);
        }
    }
}
