//! # quiz-conquest
//!
//! Game engine for a turn-based territory conquest game played on a square
//! grid. Players attack neighbouring territory and settle each attack with a
//! timed quiz duel; the loser of a duel hands over every cell they own.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Seats are `PlayerId`s indexed from zero. Nothing
//!    assumes two players.
//!
//! 2. **Deterministic**: All randomness flows through a seeded `GameRng`
//!    whose position is part of the save game. Time flows through a `Clock`
//!    so tests control it.
//!
//! 3. **Host-Driven**: The session never spawns timers. The host calls
//!    `tick()` once per second during a battle and renders from accessors.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, settings, clock, errors
//! - `grid`: Square grid of owned cells and adjacency
//! - `mapgen`: Random territory generation
//! - `questions`: Questions, the question bank and category draws
//! - `battle`: The timed question duel
//! - `conquest`: Territory transfer, elimination and the battle log
//! - `session`: Phase state machine, commands and save games

pub mod core;
pub mod grid;
pub mod mapgen;
pub mod questions;
pub mod battle;
pub mod conquest;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, GameError, GameRng, GameRngState, GameSettings, ManualClock, Player, PlayerConfig,
    PlayerId, PlayerMap, Result, SystemClock,
};

pub use crate::grid::{Cell, CellPos, Grid};

pub use crate::mapgen::{GeneratedMap, MapGenerator};

pub use crate::questions::{Question, QuestionBank, QuestionId, QuestionSource};

pub use crate::battle::{AnswerOutcome, BattleOutcome, BattleState, Side, PENALTY_MS};

pub use crate::conquest::{BattleLog, BattleRecord, Resolution, Standing};

pub use crate::session::{
    GamePhase, GameSession, GameSnapshot, MemoryStore, PendingBattle, SnapshotStore,
    SNAPSHOT_KEY, SNAPSHOT_VERSION,
};
