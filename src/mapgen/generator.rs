//! Randomized seeding and region growing.
//!
//! 1. Seeding: shuffle every cell index and give the first `P` to players
//!    `0..P` in order.
//! 2. Region growing: in rounds, each player in id order claims one cell
//!    chosen uniformly from its frontier.
//! 3. Isolation fallback: a round that claims nothing hands the first
//!    unowned cell to player 0.
//!
//! Territories are usually contiguous but not guaranteed to be; the
//! fallback may leave a detached enclave for player 0. That is accepted.

use tracing::debug;

use super::frontier::Frontier;
use crate::core::{GameError, GameRng, GameSettings, PlayerId, Result};
use crate::grid::Grid;

/// Result of a successful generation.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    /// Fully owned grid.
    pub grid: Grid,
    /// Region-growing rounds performed.
    pub rounds: usize,
    /// Cells handed out by the isolation fallback.
    pub fallback_cells: usize,
}

/// Produces the initial ownership partition for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapGenerator {
    grid_size: usize,
    player_count: usize,
    round_cap: Option<usize>,
}

impl MapGenerator {
    /// Create a generator for `player_count` seats on a `grid_size` square.
    #[must_use]
    pub fn new(grid_size: usize, player_count: usize) -> Self {
        Self {
            grid_size,
            player_count,
            round_cap: None,
        }
    }

    /// Create a generator from game settings.
    #[must_use]
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(settings.grid_size, settings.player_count)
    }

    /// Override the safety cap on region-growing rounds.
    #[must_use]
    pub fn with_round_cap(mut self, cap: usize) -> Self {
        self.round_cap = Some(cap);
        self
    }

    /// Round cap in effect.
    ///
    /// Every round claims at least one cell, so `cells` rounds always suffice.
    #[must_use]
    pub fn round_cap(&self) -> usize {
        self.round_cap
            .unwrap_or(2 * self.grid_size * self.grid_size + 1)
    }

    /// Generate a fully owned grid.
    ///
    /// Fails with `Capacity` before touching anything when there are more
    /// players than cells, and with `MapGeneration` if the round cap is hit.
    pub fn generate(&self, rng: &mut GameRng) -> Result<GeneratedMap> {
        let cells = self.grid_size * self.grid_size;
        if self.player_count > cells {
            return Err(GameError::Capacity {
                players: self.player_count,
                cells,
            });
        }

        let mut grid = Grid::new(self.grid_size, self.player_count);
        seed_players(&mut grid, rng);
        let (rounds, fallback_cells) = grow_regions(&mut grid, rng, self.round_cap())?;

        debug!(
            grid_size = self.grid_size,
            players = self.player_count,
            rounds,
            fallback_cells,
            "Generated map"
        );

        Ok(GeneratedMap {
            grid,
            rounds,
            fallback_cells,
        })
    }
}

/// Place one seed per player on distinct cells chosen by a full shuffle.
pub fn seed_players(grid: &mut Grid, rng: &mut GameRng) {
    let mut indices: Vec<usize> = (0..grid.len()).collect();
    rng.shuffle(&mut indices);

    for (player, &index) in PlayerId::all(grid.player_count()).zip(indices.iter()) {
        let pos = grid.pos_of(index);
        grid.set_owner(pos, Some(player));
    }
}

/// Grow territories from whatever the grid already owns until no cell is
/// left unowned.
///
/// Returns `(rounds, fallback_cells)`.
pub fn grow_regions(grid: &mut Grid, rng: &mut GameRng, round_cap: usize) -> Result<(usize, usize)> {
    let player_count = grid.player_count();
    let mut frontiers: Vec<Frontier> = (0..player_count).map(|_| Frontier::new()).collect();

    for (index, cell) in grid.cells().iter().enumerate() {
        if let Some(owner) = cell.owner {
            extend_frontier(grid, &mut frontiers[owner.index()], index);
        }
    }

    let mut rounds = 0;
    let mut fallback_cells = 0;

    while grid.unowned_count() > 0 {
        if rounds >= round_cap {
            return Err(GameError::MapGeneration {
                rounds,
                unowned: grid.unowned_count(),
            });
        }
        rounds += 1;

        let mut claimed = 0;
        for player in PlayerId::all(player_count) {
            if grid.unowned_count() == 0 {
                break;
            }
            if let Some(index) = frontiers[player.index()].choose(rng) {
                claim(grid, &mut frontiers, player, index);
                claimed += 1;
            }
        }

        if claimed == 0 && player_count > 0 {
            let first = grid.unowned_indices().next();
            if let Some(index) = first {
                claim(grid, &mut frontiers, PlayerId::new(0), index);
                fallback_cells += 1;
            }
        }
    }

    Ok((rounds, fallback_cells))
}

/// Give a cell to `player` and update every frontier.
fn claim(grid: &mut Grid, frontiers: &mut [Frontier], player: PlayerId, index: usize) {
    let pos = grid.pos_of(index);
    grid.set_owner(pos, Some(player));
    for frontier in frontiers.iter_mut() {
        frontier.remove(index);
    }
    extend_frontier(grid, &mut frontiers[player.index()], index);
}

/// Add the unowned neighbors of `index` to a frontier.
fn extend_frontier(grid: &Grid, frontier: &mut Frontier, index: usize) {
    for next in grid.neighbors4(grid.pos_of(index)) {
        if grid.owner(next).is_none() {
            if let Some(i) = grid.index_of(next) {
                frontier.insert(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellPos;

    #[test]
    fn test_every_cell_owned() {
        let mut rng = GameRng::new(42);
        let map = MapGenerator::new(5, 2).generate(&mut rng).unwrap();

        assert_eq!(map.grid.unowned_count(), 0);
        assert_eq!(map.grid.total_owned(), 25);
        assert!(map.grid.count_owned(PlayerId::new(0)) >= 1);
        assert!(map.grid.count_owned(PlayerId::new(1)) >= 1);
    }

    #[test]
    fn test_capacity_error() {
        let mut rng = GameRng::new(1);
        let err = MapGenerator::new(2, 5).generate(&mut rng).unwrap_err();
        assert_eq!(err, GameError::Capacity { players: 5, cells: 4 });
    }

    #[test]
    fn test_one_player_per_cell() {
        let mut rng = GameRng::new(3);
        let map = MapGenerator::new(3, 9).generate(&mut rng).unwrap();

        assert_eq!(map.rounds, 0);
        for player in PlayerId::all(9) {
            assert_eq!(map.grid.count_owned(player), 1);
        }
    }

    #[test]
    fn test_round_cap_exceeded() {
        let mut rng = GameRng::new(5);
        let err = MapGenerator::new(4, 1)
            .with_round_cap(2)
            .generate(&mut rng)
            .unwrap_err();

        assert_eq!(err, GameError::MapGeneration { rounds: 2, unowned: 13 });
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = MapGenerator::new(8, 4).generate(&mut GameRng::new(77)).unwrap();
        let b = MapGenerator::new(8, 4).generate(&mut GameRng::new(77)).unwrap();
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_fallback_seeds_player_zero() {
        // No seeds at all: the first round claims nothing and falls back.
        let mut grid = Grid::new(3, 2);
        let mut rng = GameRng::new(11);

        let (rounds, fallback) = grow_regions(&mut grid, &mut rng, 100).unwrap();

        assert_eq!(fallback, 1);
        assert!(rounds >= 1);
        assert_eq!(grid.owner(CellPos::new(0, 0)), Some(PlayerId::new(0)));
        assert_eq!(grid.count_owned(PlayerId::new(0)), 9);
    }

    #[test]
    fn test_grow_respects_existing_owners() {
        let mut grid = Grid::new(3, 2);
        grid.set_owner(CellPos::new(0, 0), Some(PlayerId::new(0)));
        grid.set_owner(CellPos::new(2, 2), Some(PlayerId::new(1)));
        let mut rng = GameRng::new(2);

        let (_, fallback) = grow_regions(&mut grid, &mut rng, 100).unwrap();

        assert_eq!(fallback, 0);
        assert_eq!(grid.owner(CellPos::new(0, 0)), Some(PlayerId::new(0)));
        assert_eq!(grid.owner(CellPos::new(2, 2)), Some(PlayerId::new(1)));
        assert_eq!(grid.total_owned(), 9);
    }
}
