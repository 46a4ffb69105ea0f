//! Conquest resolution and the battle log.

pub mod record;
pub mod resolver;

pub use record::{BattleLog, BattleRecord, Standing};
pub use resolver::{resolve_conquest, Resolution};
