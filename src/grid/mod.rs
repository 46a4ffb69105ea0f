//! Grid model: cells, ownership, and adjacency queries.
//!
//! Adjacency is 4-directional with no diagonals and no wraparound.
//! All queries are pure reads over the current ownership snapshot.

pub mod cell;
#[allow(clippy::module_inception)]
pub mod grid;

pub use cell::{Cell, CellPos};
pub use grid::Grid;
