//! Game phases and the battle awaiting a topic.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the active game is in its lifecycle.
///
/// ```text
/// MENU -> MAP_SELECTION -> TOPIC_SELECTION -> BATTLE -> MAP_SELECTION ...
///                                                   \-> GAME_OVER
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// No game running.
    #[default]
    Menu,
    /// Current player picks an enemy cell to attack.
    MapSelection,
    /// Attacker picks the question category.
    TopicSelection,
    /// Duel in progress.
    Battle,
    /// One player left. Only a reset leaves this phase.
    GameOver,
}

impl GamePhase {
    /// True while a game is being played or has just finished.
    #[must_use]
    pub fn has_board(self) -> bool {
        !matches!(self, GamePhase::Menu)
    }
}

/// Attack chosen on the map, waiting for its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBattle {
    /// Player attacking.
    pub attacker: PlayerId,
    /// Owner of the clicked cell.
    pub defender: PlayerId,
}
