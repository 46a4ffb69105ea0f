//! The square ownership grid.
//!
//! Cells are stored row-major (`index = y * size + x`) and are created once;
//! afterwards only their owners change. A per-player counter is maintained
//! on every ownership change so territory sizes are O(1) to read.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::{Cell, CellPos};
use crate::core::{PlayerId, PlayerMap};

/// North, south, east, west.
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// Ownership grid with cached per-player cell counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData", into = "GridData")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    counts: PlayerMap<u32>,
    unowned: usize,
}

impl Grid {
    /// Create a `size` x `size` grid with every cell unowned.
    #[must_use]
    pub fn new(size: usize, player_count: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell {
                    x: x as u16,
                    y: y as u16,
                    owner: None,
                });
            }
        }

        Self {
            size,
            cells,
            counts: PlayerMap::with_value(player_count, 0),
            unowned: size * size,
        }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of seats this grid tracks.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.counts.player_count()
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the position lies on the grid.
    #[must_use]
    pub fn contains(&self, pos: CellPos) -> bool {
        (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Row-major index of a position, if it exists.
    #[must_use]
    pub fn index_of(&self, pos: CellPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.size + pos.x as usize)
    }

    /// Position of a row-major index.
    #[must_use]
    pub fn pos_of(&self, index: usize) -> CellPos {
        CellPos::new((index % self.size) as u16, (index / self.size) as u16)
    }

    /// The cell at `pos`, if it exists.
    #[must_use]
    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    /// Owner of the cell at `pos`. Off-grid positions have no owner.
    #[must_use]
    pub fn owner(&self, pos: CellPos) -> Option<PlayerId> {
        self.cell(pos).and_then(|c| c.owner)
    }

    /// N/S/E/W neighbors that exist on the grid. No wraparound.
    #[must_use]
    pub fn neighbors4(&self, pos: CellPos) -> SmallVec<[CellPos; 4]> {
        let mut out = SmallVec::new();
        if !self.contains(pos) {
            return out;
        }
        for (dx, dy) in DIRECTIONS {
            let nx = i32::from(pos.x) + dx;
            let ny = i32::from(pos.y) + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let next = CellPos::new(nx as u16, ny as u16);
            if self.contains(next) {
                out.push(next);
            }
        }
        out
    }

    /// True iff some cell owned by `player` is at Manhattan distance 1 from `pos`.
    ///
    /// Off-grid positions are never adjacent to anything.
    #[must_use]
    pub fn is_adjacent_to(&self, pos: CellPos, player: PlayerId) -> bool {
        self.neighbors4(pos)
            .into_iter()
            .any(|n| self.owner(n) == Some(player))
    }

    /// Positions of every cell owned by `player`.
    #[must_use]
    pub fn cells_owned_by(&self, player: PlayerId) -> FxHashSet<CellPos> {
        self.cells
            .iter()
            .filter(|c| c.is_owned_by(player))
            .map(Cell::pos)
            .collect()
    }

    /// Cached number of cells owned by `player`.
    #[must_use]
    pub fn count_owned(&self, player: PlayerId) -> u32 {
        self.counts.get(player).copied().unwrap_or(0)
    }

    /// Number of cells without an owner.
    #[must_use]
    pub fn unowned_count(&self) -> usize {
        self.unowned
    }

    /// Row-major indices of every unowned cell.
    pub fn unowned_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.owner.is_none())
            .map(|(i, _)| i)
    }

    /// Sum of all cached per-player counts.
    #[must_use]
    pub fn total_owned(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Change the owner of a cell, keeping the counters in step.
    ///
    /// Returns the previous owner. Off-grid positions and out-of-range
    /// players are ignored.
    pub fn set_owner(&mut self, pos: CellPos, owner: Option<PlayerId>) -> Option<PlayerId> {
        let index = self.index_of(pos)?;
        if let Some(p) = owner {
            if !self.counts.contains(p) {
                return self.cells[index].owner;
            }
        }

        let previous = std::mem::replace(&mut self.cells[index].owner, owner);
        match previous {
            Some(p) => self.counts[p] -= 1,
            None => self.unowned -= 1,
        }
        match owner {
            Some(p) => self.counts[p] += 1,
            None => self.unowned += 1,
        }
        previous
    }

    /// Reassign every cell of `from` to `to`. Returns the number moved.
    pub fn transfer_all(&mut self, from: PlayerId, to: PlayerId) -> u32 {
        if from == to || !self.counts.contains(from) || !self.counts.contains(to) {
            return 0;
        }

        let mut moved = 0;
        for cell in self.cells.iter_mut().filter(|c| c.owner == Some(from)) {
            cell.owner = Some(to);
            moved += 1;
        }
        self.counts[from] -= moved;
        self.counts[to] += moved;
        moved
    }

    /// Count ownership with a full scan, ignoring the cache.
    #[must_use]
    pub fn recount(&self) -> PlayerMap<u32> {
        let mut counts = PlayerMap::with_value(self.player_count(), 0);
        for owner in self.cells.iter().filter_map(|c| c.owner) {
            if let Some(n) = counts.get_mut(owner) {
                *n += 1;
            }
        }
        counts
    }
}

/// Compact serialized form: owners only, positions are implied.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct GridData {
    size: usize,
    player_count: usize,
    owners: Vec<Option<PlayerId>>,
}

impl From<Grid> for GridData {
    fn from(grid: Grid) -> Self {
        Self {
            size: grid.size,
            player_count: grid.player_count(),
            owners: grid.cells.iter().map(|c| c.owner).collect(),
        }
    }
}

impl TryFrom<GridData> for Grid {
    type Error = String;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        if data.size > crate::core::MAX_GRID_SIZE {
            return Err(format!("grid size {} is too large", data.size));
        }
        if data.owners.len() != data.size * data.size {
            return Err(format!(
                "grid of size {} needs {} cells, found {}",
                data.size,
                data.size * data.size,
                data.owners.len()
            ));
        }
        if data.player_count > crate::core::MAX_PLAYERS {
            return Err(format!("too many players: {}", data.player_count));
        }

        let mut grid = Grid::new(data.size, data.player_count);
        for (index, owner) in data.owners.into_iter().enumerate() {
            if let Some(p) = owner {
                if p.index() >= data.player_count {
                    return Err(format!("cell {index} owned by unknown {p}"));
                }
                let pos = grid.pos_of(index);
                grid.set_owner(pos, Some(p));
            }
        }
        Ok(grid)
    }
}
