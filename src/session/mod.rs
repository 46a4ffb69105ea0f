//! Game controller: phases, commands, and save games.
//!
//! - `phase`: the phase state machine and pending attack
//! - `game`: `GameSession`, the single owner of an active game
//! - `snapshot`: serializable copy of a session and load/save
//! - `store`: where snapshots live

pub mod phase;
pub mod game;
pub mod snapshot;
pub mod store;

pub use phase::{GamePhase, PendingBattle};
pub use game::{default_player_configs, GameSession};
pub use snapshot::{GameSnapshot, SNAPSHOT_KEY, SNAPSHOT_VERSION};
pub use store::{MemoryStore, SnapshotStore};
