//! Core engine types: players, RNG, settings, clock, errors.
//!
//! Everything else in the crate builds on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod clock;
pub mod error;

pub use player::{Player, PlayerConfig, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameSettings, MAX_GRID_SIZE, MAX_PLAYERS, MAX_TIME_LIMIT, MIN_PLAYERS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{GameError, Result};
