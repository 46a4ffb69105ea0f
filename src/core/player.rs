//! Player identification, per-player storage, and the player record.
//!
//! ## PlayerId
//!
//! Type-safe 0-based player identifier supporting 1-255 players. Ids are
//! assigned at game start and never reused within a game.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! Name, color, liveness and the cached territory size of one seat.

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

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use quiz_conquest::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(255) as u8).map(PlayerId)
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
/// use quiz_conquest::core::{PlayerId, PlayerMap};
///
/// let mut cells: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// cells[PlayerId::new(1)] += 3;
/// assert_eq!(cells[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether a player id is in range.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Display configuration for one seat, supplied by the menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    pub name: String,
    /// Display color, usually `#RRGGBB`.
    pub color: String,
}

impl PlayerConfig {
    /// Create a player config.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A seat in the active game.
///
/// `cells_count` is a cache of the grid's ownership and is refreshed after
/// every ownership change. A player is marked dead only by losing a battle
/// and never comes back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable id, equal to the seat index.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// False once eliminated.
    pub is_alive: bool,
    /// Number of cells owned.
    pub cells_count: u32,
}

impl Player {
    /// Create a living player with no territory yet.
    #[must_use]
    pub fn new(id: PlayerId, config: &PlayerConfig) -> Self {
        Self {
            id,
            name: config.name.clone(),
            color: config.color.clone(),
            is_alive: true,
            cells_count: 0,
        }
    }

    /// Mark the player as eliminated.
    pub fn eliminate(&mut self) {
        self.is_alive = false;
        self.cells_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<u32> = PlayerMap::new(3, |p| p.index() as u32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(2)], 20);
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_player_map_out_of_range() {
        let map: PlayerMap<u32> = PlayerMap::with_value(2, 0);

        assert!(map.contains(PlayerId::new(1)));
        assert!(!map.contains(PlayerId::new(2)));
        assert!(map.get(PlayerId::new(2)).is_none());
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<u32> = PlayerMap::new(2, |p| p.index() as u32 + 1);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(pairs, vec![(PlayerId::new(0), &1), (PlayerId::new(1), &2)]);
    }

    #[test]
    fn test_eliminate_clears_cells() {
        let config = PlayerConfig::new("Ada", "#FF5733");
        let mut player = Player::new(PlayerId::new(0), &config);
        player.cells_count = 7;

        player.eliminate();

        assert!(!player.is_alive);
        assert_eq!(player.cells_count, 0);
    }
}
