//! Cell coordinates and the cell record.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Coordinates of a cell on the square grid.
///
/// `x` is the column and `y` the row, both 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl CellPos {
    /// Create a position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: CellPos) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid cell: fixed position, changing owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Owning player, `None` only during map generation.
    pub owner: Option<PlayerId>,
}

impl Cell {
    /// Position of this cell.
    #[must_use]
    pub const fn pos(&self) -> CellPos {
        CellPos::new(self.x, self.y)
    }

    /// Whether `player` owns this cell.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}
