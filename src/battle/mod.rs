//! Battle engine: a timed question duel between two players.
//!
//! The battle is lost by the side whose clock reaches zero first. Only the
//! side to move has its clock running.

pub mod state;

pub use state::{AnswerOutcome, BattleOutcome, BattleState, Side, PENALTY_MS};
