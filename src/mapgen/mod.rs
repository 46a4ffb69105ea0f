//! Map generation: random seeds grown into player territories.

pub mod frontier;
pub mod generator;

pub use frontier::Frontier;
pub use generator::{grow_regions, seed_players, GeneratedMap, MapGenerator};
