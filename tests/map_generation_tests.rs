//! Property-based tests for map generation and grid adjacency.
//! Run with: cargo test --release map_generation

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use quiz_conquest::{CellPos, GameError, GameRng, GameSettings, GameSession, Grid, MapGenerator, PlayerId};

/// Grid size and a player count that fits on it.
fn size_and_players() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=12).prop_flat_map(|size| (Just(size), 1..=(size * size).min(10)))
}

/// Grid with arbitrary, possibly partial ownership.
fn arbitrary_grid() -> impl Strategy<Value = Grid> {
    (1usize..=9, 1usize..=4).prop_flat_map(|(size, players)| {
        prop::collection::vec(prop::option::of(0..players as u8), size * size).prop_map(
            move |owners| {
                let mut grid = Grid::new(size, players);
                for (index, owner) in owners.into_iter().enumerate() {
                    let pos = grid.pos_of(index);
                    grid.set_owner(pos, owner.map(PlayerId::new));
                }
                grid
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every cell is owned and every player owns at least one cell.
    #[test]
    fn prop_generated_map_complete((size, players) in size_and_players(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let map = MapGenerator::new(size, players).generate(&mut rng).unwrap();
        let grid = &map.grid;

        prop_assert_eq!(grid.unowned_count(), 0);
        prop_assert!(grid.cells().iter().all(|c| c.owner.is_some()));
        prop_assert_eq!(grid.total_owned() as usize, size * size);
        for player in PlayerId::all(players) {
            prop_assert!(grid.count_owned(player) >= 1);
        }
        prop_assert_eq!(grid.recount(), grid_counts(grid, players));
    }

    /// Same seed, same map.
    #[test]
    fn prop_generation_deterministic((size, players) in size_and_players(), seed in any::<u64>()) {
        let a = MapGenerator::new(size, players).generate(&mut GameRng::new(seed)).unwrap();
        let b = MapGenerator::new(size, players).generate(&mut GameRng::new(seed)).unwrap();
        prop_assert_eq!(a.grid, b.grid);
    }

    /// Adjacency agrees with a brute-force Manhattan distance check.
    #[test]
    fn prop_adjacency_matches_manhattan(grid in arbitrary_grid()) {
        for player in PlayerId::all(grid.player_count()) {
            let owned = grid.cells_owned_by(player);
            for cell in grid.cells() {
                let pos = cell.pos();
                let expected = owned.iter().any(|o| o.manhattan(pos) == 1);
                prop_assert_eq!(grid.is_adjacent_to(pos, player), expected, "{} at {}", player, pos);
            }
        }
    }
}

fn grid_counts(grid: &Grid, players: usize) -> quiz_conquest::PlayerMap<u32> {
    quiz_conquest::PlayerMap::new(players, |p| grid.count_owned(p))
}

#[test]
fn test_corners_and_edges() {
    let mut grid = Grid::new(3, 2);
    let p0 = PlayerId::new(0);
    grid.set_owner(CellPos::new(0, 0), Some(p0));

    assert!(grid.is_adjacent_to(CellPos::new(1, 0), p0));
    assert!(grid.is_adjacent_to(CellPos::new(0, 1), p0));
    assert!(!grid.is_adjacent_to(CellPos::new(1, 1), p0));
    assert!(!grid.is_adjacent_to(CellPos::new(2, 0), p0));
    // No wraparound from the left edge to the right edge.
    assert!(!grid.is_adjacent_to(CellPos::new(2, 2), p0));
    assert!(!grid.is_adjacent_to(CellPos::new(0, 2), p0));
    // Off-grid positions are never adjacent.
    assert!(!grid.is_adjacent_to(CellPos::new(3, 0), p0));
}

#[test]
fn test_one_cell_per_player() {
    for size in 1..=4 {
        let players = size * size;
        let map = MapGenerator::new(size, players).generate(&mut GameRng::new(1)).unwrap();
        for player in PlayerId::all(players) {
            assert_eq!(map.grid.count_owned(player), 1);
        }
        assert_eq!(map.rounds, 0);
    }
}

#[test]
fn test_capacity_rejected() {
    let result = MapGenerator::new(2, 5).generate(&mut GameRng::new(1));
    assert!(matches!(result, Err(GameError::Capacity { players: 5, cells: 4 })));

    let mut session = GameSession::new(1);
    let settings = GameSettings::default().with_grid_size(2).with_player_count(5);
    assert_eq!(
        session.start_game(settings, Vec::new()),
        Err(GameError::Capacity { players: 5, cells: 4 })
    );
}

#[test]
fn test_large_map_generates() {
    let map = MapGenerator::new(40, 12).generate(&mut GameRng::new(77)).unwrap();
    assert_eq!(map.grid.unowned_count(), 0);
    assert!(map.rounds <= MapGenerator::new(40, 12).round_cap());
}
