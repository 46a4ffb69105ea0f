//! Save games.
//!
//! A snapshot is the whole session as plain data. Snapshots are stored
//! under a versioned key; bumping the version orphans old saves instead of
//! migrating them. A snapshot that fails to decode or does not describe a
//! consistent game is never patched up: loading falls back to a fresh menu.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::game::GameSession;
use super::phase::{GamePhase, PendingBattle};
use super::store::SnapshotStore;
use crate::battle::BattleState;
use crate::conquest::BattleLog;
use crate::core::{Clock, GameError, GameRng, GameRngState, GameSettings, Player, PlayerConfig, PlayerId, Result};
use crate::grid::Grid;
use crate::questions::QuestionBank;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 3;

/// Storage key for the current snapshot format.
pub const SNAPSHOT_KEY: &str = "quiz_conquest_save_v3";

/// Serializable copy of a [`GameSession`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Format version, must equal [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// Phase at save time.
    pub phase: GamePhase,
    /// Game settings.
    pub settings: GameSettings,
    /// Menu player configs.
    pub player_configs: Vec<PlayerConfig>,
    /// Seats.
    pub players: Vec<Player>,
    /// Map, absent in the menu.
    pub grid: Option<Grid>,
    /// Player to move on the map.
    pub current_player: Option<PlayerId>,
    /// Attack awaiting a category.
    pub pending_battle: Option<PendingBattle>,
    /// Battle in progress.
    pub battle: Option<BattleState>,
    /// Finished battles.
    pub battle_log: BattleLog,
    /// Question pool: authored questions and whether built-ins are used.
    pub questions: QuestionBank,
    /// RNG position.
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Check that the snapshot describes a game the session can continue.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(GameError::Snapshot(msg));

        if self.version != SNAPSHOT_VERSION {
            return fail(format!("version {} is not {SNAPSHOT_VERSION}", self.version));
        }
        if (self.phase == GamePhase::Battle) != self.battle.is_some() {
            return fail(format!("phase {:?} does not match battle presence", self.phase));
        }
        if (self.phase == GamePhase::TopicSelection) != self.pending_battle.is_some() {
            return fail(format!("phase {:?} does not match pending battle", self.phase));
        }
        if !self.phase.has_board() {
            return Ok(());
        }

        self.settings.validate()?;
        let Some(grid) = &self.grid else {
            return fail(format!("phase {:?} without a grid", self.phase));
        };
        let count = self.settings.player_count;
        if grid.size() != self.settings.grid_size || grid.player_count() != count {
            return fail("grid does not match settings".into());
        }
        if self.players.len() != count {
            return fail(format!("{} players for {count} seats", self.players.len()));
        }
        for (index, player) in self.players.iter().enumerate() {
            if player.id.index() != index {
                return fail(format!("seat {index} holds {}", player.id));
            }
            if player.cells_count != grid.count_owned(player.id) {
                return fail(format!("{} cell count out of date", player.id));
            }
            if player.is_alive == (player.cells_count == 0) {
                return fail(format!("{} alive flag disagrees with territory", player.id));
            }
        }

        let alive = |p: PlayerId| self.players.get(p.index()).is_some_and(|pl| pl.is_alive);
        let alive_count = self.players.iter().filter(|p| p.is_alive).count();
        if (self.phase == GamePhase::GameOver) != (alive_count == 1) {
            return fail(format!("{alive_count} players alive in phase {:?}", self.phase));
        }
        match self.current_player {
            Some(p) if alive(p) => {}
            _ => return fail("current player is not a living seat".into()),
        }

        if let Some(pending) = &self.pending_battle {
            if pending.attacker == pending.defender {
                return fail("pending battle against oneself".into());
            }
            if !alive(pending.attacker) || !alive(pending.defender) {
                return fail("pending battle names a missing or eliminated player".into());
            }
        }
        if let Some(battle) = &self.battle {
            if battle.attacker == battle.defender {
                return fail("battle against oneself".into());
            }
            if !alive(battle.attacker) || !alive(battle.defender) {
                return fail("battle names a missing or eliminated player".into());
            }
            if battle.side_of(battle.current_turn).is_none() {
                return fail("battle turn belongs to neither side".into());
            }
            let limit = self.settings.time_limit;
            if battle.attacker_time > limit || battle.defender_time > limit {
                return fail(format!("battle clock above the {limit}s limit"));
            }
        }
        Ok(())
    }
}

impl GameSession {
    /// Capture the whole session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            phase: self.phase,
            settings: self.settings.clone(),
            player_configs: self.player_configs.clone(),
            players: self.players.clone(),
            grid: self.grid.clone(),
            current_player: self.current_player,
            pending_battle: self.pending_battle,
            battle: self.battle.clone(),
            battle_log: self.battle_log.clone(),
            questions: self.questions.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a session from a snapshot, rejecting inconsistent ones.
    pub fn from_snapshot(snapshot: GameSnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        snapshot.validate()?;

        Ok(Self {
            phase: snapshot.phase,
            settings: snapshot.settings,
            player_configs: snapshot.player_configs,
            players: snapshot.players,
            grid: snapshot.grid,
            current_player: snapshot.current_player,
            pending_battle: snapshot.pending_battle,
            battle: snapshot.battle,
            battle_log: snapshot.battle_log,
            questions: snapshot.questions,
            rng: GameRng::from_state(&snapshot.rng),
            clock,
        })
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot, clock)
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    /// Decode from the compact binary format.
    pub fn from_bytes(bytes: &[u8], clock: Arc<dyn Clock>) -> Result<Self> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Self::from_snapshot(snapshot, clock)
    }

    /// Persist under [`SNAPSHOT_KEY`].
    pub fn save_to(&self, store: &mut impl SnapshotStore) -> Result<()> {
        store.save(SNAPSHOT_KEY, self.to_json()?);
        Ok(())
    }

    /// Restore the saved game, or start fresh in the menu.
    ///
    /// A missing save, an undecodable one, or one that fails validation all
    /// produce a new session seeded with `seed` and default settings.
    pub fn load_from(store: &impl SnapshotStore, seed: u64, clock: Arc<dyn Clock>) -> Self {
        let Some(json) = store.load(SNAPSHOT_KEY) else {
            return Self::with_clock(seed, clock);
        };

        match Self::from_json(&json, Arc::clone(&clock)) {
            Ok(session) => {
                info!(phase = ?session.phase(), "Restored saved game");
                session
            }
            Err(err) => {
                warn!(error = %err, "Discarding saved game");
                Self::with_clock(seed, clock)
            }
        }
    }
}
