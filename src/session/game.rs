//! The game controller.
//!
//! `GameSession` owns one game: settings, players, grid, the battle in
//! progress, the battle log and the question pool. The presentation layer
//! reads it through accessors and drives it with a handful of commands.
//! Commands that do not fit the current phase are ignored and leave the
//! state untouched.
//!
//! ## Battle timing
//!
//! The host calls [`GameSession::tick`] once per second during a battle.
//! Every battle mutation (tick or answer) is followed by a separate
//! observation step that resolves the battle once a clock is at zero. The
//! resolver runs at most once per battle because it consumes the battle
//! state and leaves the `BATTLE` phase.

use std::sync::Arc;

use tracing::{debug, info};

use super::phase::{GamePhase, PendingBattle};
use crate::battle::{AnswerOutcome, BattleOutcome, BattleState};
use crate::conquest::{resolve_conquest, BattleLog, BattleRecord, Standing};
use crate::core::{
    Clock, GameRng, GameSettings, Player, PlayerConfig, PlayerId, Result, SystemClock,
};
use crate::grid::{CellPos, Grid};
use crate::mapgen::MapGenerator;
use crate::questions::QuestionBank;

/// One active game and everything needed to play it.
#[derive(Debug)]
pub struct GameSession {
    pub(super) phase: GamePhase,
    pub(super) settings: GameSettings,
    pub(super) player_configs: Vec<PlayerConfig>,
    pub(super) players: Vec<Player>,
    pub(super) grid: Option<Grid>,
    pub(super) current_player: Option<PlayerId>,
    pub(super) pending_battle: Option<PendingBattle>,
    pub(super) battle: Option<BattleState>,
    pub(super) battle_log: BattleLog,
    pub(super) questions: QuestionBank,
    pub(super) rng: GameRng,
    pub(super) clock: Arc<dyn Clock>,
}

impl GameSession {
    /// Fresh session in the menu, using the system clock.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, Arc::new(SystemClock))
    }

    /// Fresh session in the menu with a custom time source.
    #[must_use]
    pub fn with_clock(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            phase: GamePhase::Menu,
            settings: GameSettings::default(),
            player_configs: default_player_configs(2),
            players: Vec::new(),
            grid: None,
            current_player: None,
            pending_battle: None,
            battle: None,
            battle_log: BattleLog::new(),
            questions: QuestionBank::new(),
            rng: GameRng::new(seed),
            clock,
        }
    }

    /// Replace the question pool.
    #[must_use]
    pub fn with_questions(mut self, questions: QuestionBank) -> Self {
        self.questions = questions;
        self
    }

    // === Views ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Settings of the current (or next) game.
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Player display configs of the current (or next) game.
    #[must_use]
    pub fn player_configs(&self) -> &[PlayerConfig] {
        &self.player_configs
    }

    /// All seats, eliminated ones included, indexed by id.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Seats still in the game.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    /// The map, absent in the menu.
    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Player whose turn it is on the map.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    /// Attack waiting for its category.
    #[must_use]
    pub fn pending_battle(&self) -> Option<&PendingBattle> {
        self.pending_battle.as_ref()
    }

    /// Battle in progress.
    #[must_use]
    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    /// Whether answers are currently blocked by a penalty.
    #[must_use]
    pub fn is_penalized(&self) -> bool {
        self.battle
            .as_ref()
            .is_some_and(|b| b.is_penalized(self.clock.now_ms()))
    }

    /// Finished battles, oldest first.
    #[must_use]
    pub fn battle_log(&self) -> &BattleLog {
        &self.battle_log
    }

    /// Standings derived from the battle log.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.battle_log.standings(&self.players)
    }

    /// The question pool.
    #[must_use]
    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    /// The question pool, for the editor.
    pub fn questions_mut(&mut self) -> &mut QuestionBank {
        &mut self.questions
    }

    /// Categories the attacker can choose from.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.questions.categories()
    }

    /// The last player standing once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        self.alive_players().next()
    }

    /// Cells the current player may attack right now.
    #[must_use]
    pub fn attackable_cells(&self) -> Vec<CellPos> {
        let (GamePhase::MapSelection, Some(current), Some(grid)) =
            (self.phase, self.current_player, self.grid.as_ref())
        else {
            return Vec::new();
        };

        grid.cells()
            .iter()
            .filter(|c| c.owner.is_some_and(|o| o != current))
            .map(|c| c.pos())
            .filter(|&pos| grid.is_adjacent_to(pos, current))
            .collect()
    }

    // === Commands ===

    /// Generate a map and start a game.
    ///
    /// Returns `Ok(false)` outside the menu. Settings are validated before
    /// anything changes; on error the session is left as it was.
    pub fn start_game(&mut self, settings: GameSettings, player_configs: Vec<PlayerConfig>) -> Result<bool> {
        if self.phase != GamePhase::Menu {
            debug!(phase = ?self.phase, "start_game ignored");
            return Ok(false);
        }
        settings.validate()?;

        let mut rng = self.rng.clone();
        let map = MapGenerator::from_settings(&settings).generate(&mut rng)?;
        let configs = fill_player_configs(player_configs, settings.player_count, &mut rng);

        let players: Vec<Player> = configs
            .iter()
            .zip(PlayerId::all(settings.player_count))
            .map(|(config, id)| {
                let mut player = Player::new(id, config);
                player.cells_count = map.grid.count_owned(id);
                player
            })
            .collect();

        let first = match settings.starting_player {
            Some(p) => p,
            None => PlayerId::new(rng.gen_range_usize(0..settings.player_count) as u8),
        };

        info!(
            grid_size = settings.grid_size,
            players = settings.player_count,
            first = first.0,
            "Game started"
        );

        self.rng = rng;
        self.settings = settings;
        self.player_configs = configs;
        self.players = players;
        self.grid = Some(map.grid);
        self.current_player = Some(first);
        self.pending_battle = None;
        self.battle = None;
        self.battle_log = BattleLog::new();
        self.phase = GamePhase::MapSelection;
        Ok(true)
    }

    /// Click a cell on the map.
    ///
    /// An enemy cell adjacent to the current player's territory opens topic
    /// selection. Anything else is ignored.
    pub fn select_cell(&mut self, pos: CellPos) -> bool {
        if self.phase != GamePhase::MapSelection {
            return false;
        }
        let (Some(current), Some(grid)) = (self.current_player, self.grid.as_ref()) else {
            return false;
        };
        let Some(defender) = grid.owner(pos) else {
            return false;
        };
        if defender == current || !grid.is_adjacent_to(pos, current) {
            debug!(%pos, "Cell not attackable");
            return false;
        }

        self.pending_battle = Some(PendingBattle {
            attacker: current,
            defender,
        });
        self.phase = GamePhase::TopicSelection;
        true
    }

    /// Pick the battle category and start the duel.
    pub fn select_topic(&mut self, category: &str) -> bool {
        if self.phase != GamePhase::TopicSelection {
            return false;
        }
        let Some(pending) = self.pending_battle.take() else {
            return false;
        };

        let mut source = self.questions.source(&mut self.rng);
        let battle = BattleState::start(
            pending.attacker,
            pending.defender,
            category,
            self.settings.time_limit,
            &mut source,
        );

        info!(
            attacker = pending.attacker.0,
            defender = pending.defender.0,
            category,
            "Battle started"
        );

        self.battle = Some(battle);
        self.phase = GamePhase::Battle;
        true
    }

    /// Answer the current battle question.
    pub fn submit_answer(&mut self, answer_index: usize) -> AnswerOutcome {
        if self.phase != GamePhase::Battle {
            return AnswerOutcome::Ignored;
        }
        let now = self.clock.now_ms();
        let Some(battle) = self.battle.as_mut() else {
            return AnswerOutcome::Ignored;
        };

        let mut source = self.questions.source(&mut self.rng);
        let outcome = battle.submit_answer(answer_index, now, &mut source);
        self.observe_battle();
        outcome
    }

    /// One second of battle time has passed.
    ///
    /// Returns the battle record if this tick ended the battle.
    pub fn tick(&mut self) -> Option<BattleRecord> {
        if self.phase != GamePhase::Battle {
            return None;
        }
        self.battle.as_mut()?.tick();
        self.observe_battle()
    }

    /// Abandon the game and return to the menu.
    ///
    /// Settings, player configs and the question pool are kept.
    pub fn reset_game(&mut self) {
        info!(phase = ?self.phase, "Game reset");
        self.phase = GamePhase::Menu;
        self.players.clear();
        self.grid = None;
        self.current_player = None;
        self.pending_battle = None;
        self.battle = None;
        self.battle_log = BattleLog::new();
    }

    // === Battle resolution ===

    /// Resolve the battle if a clock has run out.
    fn observe_battle(&mut self) -> Option<BattleRecord> {
        let outcome = self.battle.as_ref()?.outcome()?;
        self.resolve_battle(outcome)
    }

    fn resolve_battle(&mut self, outcome: BattleOutcome) -> Option<BattleRecord> {
        if self.phase != GamePhase::Battle {
            return None;
        }
        let grid = self.grid.as_mut()?;
        let battle = self.battle.take()?;

        let resolution = resolve_conquest(
            grid,
            &mut self.players,
            &battle,
            outcome,
            self.settings.time_limit,
        );
        self.battle_log.push(resolution.record.clone());

        match resolution.champion {
            Some(champion) => {
                info!(champion = champion.0, battles = self.battle_log.len(), "Game over");
                self.current_player = Some(champion);
                self.phase = GamePhase::GameOver;
            }
            None => {
                self.current_player = Some(outcome.winner);
                self.phase = GamePhase::MapSelection;
            }
        }
        Some(resolution.record)
    }
}

/// Menu defaults: "Player 1", "Player 2", ... with fixed starter colors.
#[must_use]
pub fn default_player_configs(count: usize) -> Vec<PlayerConfig> {
    const COLORS: [&str; 2] = ["#FF5733", "#33FF57"];
    (0..count)
        .map(|i| PlayerConfig::new(format!("Player {}", i + 1), COLORS.get(i).copied().unwrap_or("#3357FF")))
        .collect()
}

/// Pad or truncate configs to exactly `count` entries.
///
/// Missing seats get a numbered name and a random color.
fn fill_player_configs(mut configs: Vec<PlayerConfig>, count: usize, rng: &mut GameRng) -> Vec<PlayerConfig> {
    configs.truncate(count);
    for i in configs.len()..count {
        configs.push(PlayerConfig::new(format!("Player {}", i + 1), rng.gen_color()));
    }
    configs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameError, ManualClock};

    fn session() -> GameSession {
        GameSession::with_clock(42, Arc::new(ManualClock::new(0)))
    }

    fn settings() -> GameSettings {
        GameSettings::default().with_starting_player(PlayerId::new(0))
    }

    #[test]
    fn test_new_session_in_menu() {
        let session = session();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.grid().is_none());
        assert_eq!(session.player_configs().len(), 2);
        assert_eq!(session.categories().len(), 4);
    }

    #[test]
    fn test_start_game() {
        let mut session = session();
        assert!(session.start_game(settings(), default_player_configs(2)).unwrap());

        assert_eq!(session.phase(), GamePhase::MapSelection);
        assert_eq!(session.current_player(), Some(PlayerId::new(0)));
        let total: u32 = session.players().iter().map(|p| p.cells_count).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_start_game_capacity_leaves_state() {
        let mut session = session();
        let err = session
            .start_game(GameSettings::default().with_grid_size(1), Vec::new())
            .unwrap_err();

        assert_eq!(err, GameError::Capacity { players: 2, cells: 1 });
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.grid().is_none());
        assert_eq!(session.settings(), &GameSettings::default());
    }

    #[test]
    fn test_single_player_game_refused() {
        let mut session = session();
        let err = session
            .start_game(GameSettings::default().with_player_count(1), Vec::new())
            .unwrap_err();

        assert!(matches!(err, GameError::InvalidSettings(_)));
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_start_game_ignored_outside_menu() {
        let mut session = session();
        session.start_game(settings(), Vec::new()).unwrap();
        let grid = session.grid().cloned();

        assert!(!session.start_game(settings(), Vec::new()).unwrap());
        assert_eq!(session.grid().cloned(), grid);
    }

    #[test]
    fn test_configs_padded_and_truncated() {
        let mut session = session();
        let configs = vec![PlayerConfig::new("Ada", "#000000")];
        session
            .start_game(settings().with_player_count(3), configs)
            .unwrap();

        let names: Vec<_> = session.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Player 2", "Player 3"]);

        session.reset_game();
        let many = default_player_configs(4);
        session.start_game(settings(), many).unwrap();
        assert_eq!(session.players().len(), 2);
    }

    #[test]
    fn test_commands_ignored_in_wrong_phase() {
        let mut session = session();
        assert!(!session.select_cell(CellPos::new(0, 0)));
        assert!(!session.select_topic("Algebra"));
        assert_eq!(session.submit_answer(0), AnswerOutcome::Ignored);
        assert!(session.tick().is_none());
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_attackable_cells_are_clickable() {
        let mut session = session();
        session.start_game(settings(), Vec::new()).unwrap();

        let targets = session.attackable_cells();
        assert!(!targets.is_empty());
        assert!(session.select_cell(targets[0]));
        assert_eq!(session.phase(), GamePhase::TopicSelection);
        assert!(session.attackable_cells().is_empty());
    }

    #[test]
    fn test_reset_keeps_questions_and_settings() {
        let mut session = session();
        session.start_game(settings(), Vec::new()).unwrap();
        session.reset_game();

        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.players().is_empty());
        assert!(session.battle_log().is_empty());
        assert_eq!(session.settings(), &settings());
        assert_eq!(session.questions().len(), 5);
    }
}
