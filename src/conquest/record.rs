//! Battle history and per-player standings.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};

/// Summary of one finished battle. Immutable once logged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    /// Attacking player.
    pub attacker: PlayerId,
    /// Defending player.
    pub defender: PlayerId,
    /// Player who kept their clock.
    pub winner: PlayerId,
    /// Attacker's name at the time of the battle.
    pub attacker_name: String,
    /// Defender's name at the time of the battle.
    pub defender_name: String,
    /// Winner's name at the time of the battle.
    pub winner_name: String,
    /// Topic of the duel.
    pub category: String,
    /// Correct answers by the attacker.
    pub attacker_score: u32,
    /// Correct answers by the defender.
    pub defender_score: u32,
    /// Seconds of clock consumed by both sides.
    pub duration_secs: u32,
}

impl BattleRecord {
    /// Whether the attacker won.
    #[must_use]
    pub fn attacker_won(&self) -> bool {
        self.winner == self.attacker
    }
}

/// Aggregate results for one player name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Player name.
    pub name: String,
    /// Battles won.
    pub wins: u32,
    /// Battles fought.
    pub battles: u32,
    /// Correct answers over all battles.
    pub total_score: u32,
}

/// Append-only log of finished battles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    records: Vector<BattleRecord>,
}

impl BattleLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: BattleRecord) {
        self.records.push_back(record);
    }

    /// Number of battles logged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True before the first battle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&BattleRecord> {
        self.records.last()
    }

    /// Records oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &BattleRecord> {
        self.records.iter()
    }

    /// Battles a player took part in.
    pub fn involving(&self, player: PlayerId) -> impl Iterator<Item = &BattleRecord> {
        self.records
            .iter()
            .filter(move |r| r.attacker == player || r.defender == player)
    }

    /// Standings by name, most wins first.
    ///
    /// Every listed player appears, including eliminated ones and those who
    /// never fought. Ties keep seat order.
    #[must_use]
    pub fn standings(&self, players: &[Player]) -> Vec<Standing> {
        let mut stats: Vec<Standing> = Vec::with_capacity(players.len());
        let mut slots: FxHashMap<String, usize> = FxHashMap::default();

        for player in players {
            standing_slot(&mut stats, &mut slots, &player.name);
        }

        for record in &self.records {
            let attacker = standing_slot(&mut stats, &mut slots, &record.attacker_name);
            stats[attacker].battles += 1;
            stats[attacker].total_score += record.attacker_score;

            let defender = standing_slot(&mut stats, &mut slots, &record.defender_name);
            stats[defender].battles += 1;
            stats[defender].total_score += record.defender_score;

            let winner = standing_slot(&mut stats, &mut slots, &record.winner_name);
            stats[winner].wins += 1;
        }

        stats.sort_by(|a, b| b.wins.cmp(&a.wins));
        stats
    }
}

/// Index of `name` in `stats`, adding an empty entry on first sight.
fn standing_slot(stats: &mut Vec<Standing>, slots: &mut FxHashMap<String, usize>, name: &str) -> usize {
    if let Some(&slot) = slots.get(name) {
        return slot;
    }
    stats.push(Standing {
        name: name.to_string(),
        wins: 0,
        battles: 0,
        total_score: 0,
    });
    slots.insert(name.to_string(), stats.len() - 1);
    stats.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerConfig;

    fn record(attacker: u8, defender: u8, winner: u8, scores: (u32, u32)) -> BattleRecord {
        let name = |id: u8| format!("P{id}");
        BattleRecord {
            attacker: PlayerId::new(attacker),
            defender: PlayerId::new(defender),
            winner: PlayerId::new(winner),
            attacker_name: name(attacker),
            defender_name: name(defender),
            winner_name: name(winner),
            category: "Math".into(),
            attacker_score: scores.0,
            defender_score: scores.1,
            duration_secs: 30,
        }
    }

    fn players(n: u8) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(i), &PlayerConfig::new(format!("P{i}"), "#000000")))
            .collect()
    }

    #[test]
    fn test_push_and_iter() {
        let mut log = BattleLog::new();
        assert!(log.is_empty());

        log.push(record(0, 1, 0, (3, 1)));
        log.push(record(2, 0, 0, (0, 2)));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|r| r.attacker), Some(PlayerId::new(2)));
        assert_eq!(log.involving(PlayerId::new(1)).count(), 1);
        assert_eq!(log.involving(PlayerId::new(0)).count(), 2);
        assert!(log.iter().next().is_some_and(BattleRecord::attacker_won));
    }

    #[test]
    fn test_standings() {
        let mut log = BattleLog::new();
        log.push(record(0, 1, 0, (3, 1)));
        log.push(record(2, 0, 0, (0, 2)));

        let standings = log.standings(&players(3));

        assert_eq!(standings.len(), 3);
        assert_eq!(standings[0].name, "P0");
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[0].battles, 2);
        assert_eq!(standings[0].total_score, 5);
        assert_eq!(standings[1].name, "P1");
        assert_eq!(standings[1].total_score, 1);
        assert_eq!(standings[2].name, "P2");
        assert_eq!(standings[2].battles, 1);
    }

    #[test]
    fn test_standings_without_battles() {
        let standings = BattleLog::new().standings(&players(2));
        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|s| s.wins == 0 && s.battles == 0));
    }
}
