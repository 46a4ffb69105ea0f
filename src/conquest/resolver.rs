//! Applies a finished battle to the map.
//!
//! The loser's entire territory goes to the winner and the loser is
//! eliminated. Isolated enclaves created by earlier generation or
//! conquests are left as they are.

use tracing::info;

use super::record::BattleRecord;
use crate::battle::{BattleOutcome, BattleState};
use crate::core::{Player, PlayerId};
use crate::grid::Grid;

/// Effect of one conquest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Record to append to the battle log.
    pub record: BattleRecord,
    /// Cells that changed hands.
    pub cells_transferred: u32,
    /// Last player standing, when the conquest ended the game.
    pub champion: Option<PlayerId>,
}

/// Transfer territory, eliminate the loser, and build the battle record.
///
/// `cells_count` of both participants is refreshed from the grid, so the
/// total number of owned cells is unchanged.
pub fn resolve_conquest(
    grid: &mut Grid,
    players: &mut [Player],
    battle: &BattleState,
    outcome: BattleOutcome,
    time_limit: u32,
) -> Resolution {
    let BattleOutcome { winner, loser } = outcome;
    let cells_transferred = grid.transfer_all(loser, winner);

    if let Some(p) = players.get_mut(winner.index()) {
        p.cells_count = grid.count_owned(winner);
    }
    if let Some(p) = players.get_mut(loser.index()) {
        p.eliminate();
    }

    let name = |id: PlayerId| {
        players
            .get(id.index())
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    };
    let record = BattleRecord {
        attacker: battle.attacker,
        defender: battle.defender,
        winner,
        attacker_name: name(battle.attacker),
        defender_name: name(battle.defender),
        winner_name: name(winner),
        category: battle.category.clone(),
        attacker_score: battle.attacker_score,
        defender_score: battle.defender_score,
        duration_secs: battle.elapsed_secs(time_limit),
    };

    let mut alive = players.iter().filter(|p| p.is_alive);
    let champion = match (alive.next(), alive.next()) {
        (Some(last), None) => Some(last.id),
        _ => None,
    };

    info!(
        winner = winner.0,
        loser = loser.0,
        cells_transferred,
        duration_secs = record.duration_secs,
        "Conquest resolved"
    );

    Resolution {
        record,
        cells_transferred,
        champion,
    }
}
