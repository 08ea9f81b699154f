//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index at the table, 0-based, supporting up to 255 players.
//!
//! ## PlayerMap
//!
//! One value per seat (coins, owned cards, rollout rewards), backed by a
//! `Vec` and indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    ///
    /// ```
    /// use nothanks_mcts::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use nothanks_mcts::core::{PlayerId, PlayerMap};
///
/// let mut coins: PlayerMap<u32> = PlayerMap::with_value(3, 11);
/// coins[PlayerId::new(1)] -= 1;
///
/// assert_eq!(coins[PlayerId::new(1)], 10);
/// assert_eq!(coins.values().sum::<u32>(), 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Build from a vector holding one entry per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// View the values as a slice in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl PlayerMap<f64> {
    /// Add every entry of `other` into `self`, seat by seat.
    pub fn accumulate(&mut self, other: &PlayerMap<f64>) {
        for (total, value) in self.data.iter_mut().zip(other.data.iter()) {
            *total += value;
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_next_wraps() {
        let last = PlayerId::new(3);
        assert_eq!(last.next(4), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(format!("{}", last), "Player 3");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_from_vec() {
        let coins = PlayerMap::from_vec(vec![4u32, 0, 7]);

        assert_eq!(coins.player_count(), 3);
        assert_eq!(coins[PlayerId::new(2)], 7);
        assert_eq!(coins.as_slice(), &[4, 0, 7]);
    }

    #[test]
    fn test_player_map_accumulate() {
        let mut totals: PlayerMap<f64> = PlayerMap::with_value(2, 0.0);
        let rollout = PlayerMap::from_vec(vec![1.0, -1.0]);

        totals.accumulate(&rollout);
        totals.accumulate(&rollout);

        assert_eq!(totals.as_slice(), &[2.0, -2.0]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i64> = PlayerMap::new(3, |p| p.index() as i64 * -2);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[1], (PlayerId::new(1), &-2));
        assert_eq!(pairs[2], (PlayerId::new(2), &-4));
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u32> = PlayerMap::new(2, |p| p.index() as u32 + 11);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u32> = PlayerMap::with_value(0, 0);
    }
}
