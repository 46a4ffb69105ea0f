//! Game settings chosen in the menu before a game starts.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::player::PlayerId;

/// Fewest seats a game can start with; one seat has nobody to attack.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of seats (bounded by `PlayerId`).
pub const MAX_PLAYERS: usize = 255;

/// Longest per-side battle clock, in seconds.
pub const MAX_TIME_LIMIT: u32 = 3_600;

/// Largest supported grid side.
pub const MAX_GRID_SIZE: usize = 256;

/// Settings for one game.
///
/// ## Example
///
/// ```
/// use quiz_conquest::core::GameSettings;
///
/// let settings = GameSettings::default()
///     .with_grid_size(6)
///     .with_player_count(3)
///     .with_time_limit(30);
///
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.cell_count(), 36);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Side length of the square grid.
    pub grid_size: usize,

    /// Number of seats.
    pub player_count: usize,

    /// Seconds on each side's battle clock.
    pub time_limit: u32,

    /// Fixed first attacker. `None` picks one at random.
    #[serde(default)]
    pub starting_player: Option<PlayerId>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 5,
            player_count: 2,
            time_limit: 45,
            starting_player: None,
        }
    }
}

impl GameSettings {
    /// Set the grid side length.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the per-side battle clock in seconds.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Fix the first attacker.
    #[must_use]
    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }

    /// Total number of cells on the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Check the settings before any state is touched.
    ///
    /// A grid too small for the requested seats is always reported as
    /// `Capacity`, even when the player count is also out of range.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidSettings(format!(
                "grid size must be in 1..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.player_count > self.cell_count() {
            return Err(GameError::Capacity {
                players: self.player_count,
                cells: self.cell_count(),
            });
        }
        if self.player_count < MIN_PLAYERS || self.player_count > MAX_PLAYERS {
            return Err(GameError::InvalidSettings(format!(
                "player count must be in {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.time_limit == 0 || self.time_limit > MAX_TIME_LIMIT {
            return Err(GameError::InvalidSettings(format!(
                "time limit must be in 1..={MAX_TIME_LIMIT} seconds, got {}",
                self.time_limit
            )));
        }
        if let Some(first) = self.starting_player {
            if first.index() >= self.player_count {
                return Err(GameError::InvalidSettings(format!(
                    "starting player {} is not seated",
                    first.0
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.grid_size, 5);
        assert_eq!(settings.player_count, 2);
        assert_eq!(settings.time_limit, 45);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_capacity_error() {
        let settings = GameSettings::default().with_grid_size(2).with_player_count(5);
        assert_eq!(
            settings.validate(),
            Err(GameError::Capacity { players: 5, cells: 4 })
        );
    }

    #[test]
    fn test_single_player_rejected() {
        let settings = GameSettings::default().with_player_count(1);
        assert!(matches!(settings.validate(), Err(GameError::InvalidSettings(_))));
        assert!(GameSettings::default().with_player_count(MIN_PLAYERS).validate().is_ok());
    }

    #[test]
    fn test_capacity_reported_before_player_range() {
        let settings = GameSettings::default().with_grid_size(10).with_player_count(300);
        assert_eq!(
            settings.validate(),
            Err(GameError::Capacity { players: 300, cells: 100 })
        );

        // Enough cells, but more seats than ids exist.
        let settings = GameSettings::default().with_grid_size(20).with_player_count(300);
        assert!(matches!(settings.validate(), Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn test_every_cell_seated_is_valid() {
        let settings = GameSettings::default().with_grid_size(2).with_player_count(4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            GameSettings::default().with_grid_size(0).validate(),
            Err(GameError::InvalidSettings(_))
        ));
        assert!(matches!(
            GameSettings::default().with_player_count(0).validate(),
            Err(GameError::InvalidSettings(_))
        ));
        assert!(matches!(
            GameSettings::default().with_time_limit(0).validate(),
            Err(GameError::InvalidSettings(_))
        ));
        assert!(matches!(
            GameSettings::default().with_time_limit(MAX_TIME_LIMIT + 1).validate(),
            Err(GameError::InvalidSettings(_))
        ));
        assert!(matches!(
            GameSettings::default().with_starting_player(PlayerId::new(2)).validate(),
            Err(GameError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_serialization_without_starting_player() {
        let json = r#"{"grid_size":4,"player_count":3,"time_limit":20}"#;
        let settings: GameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.starting_player, None);
        assert_eq!(settings.grid_size, 4);
    }
}
