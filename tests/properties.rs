use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use tilt_2048::engine::{self, has_any_move, Perspective};
use tilt_2048::{Direction, Grid, TileId};

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::North),
        Just(Direction::East),
        Just(Direction::South),
        Just(Direction::West),
    ]
}

/// Mostly small values so merges are common; about a third of cells empty.
fn arb_cell() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        6 => (1u32..=4).prop_map(|e| 1 << e),
        1 => (5u32..=12).prop_map(|e| 1 << e),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<u32>>> {
    (1usize..=6).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(arb_cell(), n), n))
}

fn values_by_id(grid: &Grid) -> HashMap<TileId, u32> {
    grid.tiles().map(|t| (t.id(), t.value())).collect()
}

proptest! {
    #[test]
    fn prop_rotation_round_trips(size in 1usize..=8, dir in arb_direction(), col in 0usize..8, row in 0usize..8) {
        let (col, row) = (col % size, row % size);
        let p = Perspective::new(dir, size);
        let (tc, tr) = p.to_travel(col, row).unwrap();
        prop_assert!(tc < size && tr < size);
        prop_assert_eq!(p.to_board(tc, tr), Ok((col, row)));
    }

    #[test]
    fn prop_tilt_compacts_toward_the_edge(rows in arb_rows(), dir in arb_direction()) {
        let mut grid = Grid::from_rows(&rows).unwrap();
        let outcome = engine::tilt(&mut grid, dir);
        let size = grid.size();
        let p = Perspective::new(dir, size);
        for tc in 0..size {
            let occupied: Vec<bool> = (0..size)
                .rev()
                .map(|tr| {
                    let (col, row) = p.to_board(tc, tr).unwrap();
                    grid.tile(col, row).unwrap().is_some()
                })
                .collect();
            let filled = occupied.iter().take_while(|&&o| o).count();
            prop_assert!(occupied[filled..].iter().all(|&o| !o), "gap in line {} after {}: {:?}", tc, dir, outcome);
        }
    }

    #[test]
    fn prop_each_tile_merges_at_most_once(rows in arb_rows(), dir in arb_direction()) {
        let mut grid = Grid::from_rows(&rows).unwrap();
        let before = values_by_id(&grid);
        let outcome = engine::tilt(&mut grid, dir);
        let after = values_by_id(&grid);

        let mut seen = HashSet::new();
        for m in &outcome.merges {
            prop_assert!(seen.insert(m.survivor));
            prop_assert!(seen.insert(m.absorbed));
            prop_assert_eq!(before[&m.survivor], before[&m.absorbed]);
            prop_assert_eq!(m.value, before[&m.survivor] * 2);
            prop_assert_eq!(after[&m.survivor], m.value);
            prop_assert!(!after.contains_key(&m.absorbed));
        }
        prop_assert_eq!(after.len() + outcome.merges.len(), before.len());
        for (id, value) in &after {
            if !outcome.merges.iter().any(|m| m.survivor == *id) {
                prop_assert_eq!(before[id], *value);
            }
        }
    }

    #[test]
    fn prop_score_is_the_sum_of_merges(rows in arb_rows(), dir in arb_direction()) {
        let mut grid = Grid::from_rows(&rows).unwrap();
        let before = grid.to_rows();
        let total: u64 = before.iter().flatten().map(|&v| u64::from(v)).sum();
        let outcome = engine::tilt(&mut grid, dir);
        let paid: u64 = outcome.merges.iter().map(|m| u64::from(m.value)).sum();
        prop_assert_eq!(outcome.score, paid);
        prop_assert_eq!(grid.to_rows().iter().flatten().map(|&v| u64::from(v)).sum::<u64>(), total);
        if !outcome.changed {
            prop_assert_eq!(outcome.score, 0);
            prop_assert_eq!(grid.to_rows(), before);
        }
    }

    #[test]
    fn prop_stalled_boards_never_change(size in 1usize..=6, a in 1u32..=10, b in 1u32..=10, dir in arb_direction()) {
        prop_assume!(a != b);
        let rows: Vec<Vec<u32>> = (0..size)
            .map(|r| (0..size).map(|c| if (r + c) % 2 == 0 { 1 << a } else { 1 << b }).collect())
            .collect();
        let mut grid = Grid::from_rows(&rows).unwrap();
        prop_assert!(!has_any_move(&grid));
        let ids: Vec<TileId> = grid.tiles().map(|t| t.id()).collect();
        let outcome = engine::tilt(&mut grid, dir);
        prop_assert!(!outcome.changed);
        prop_assert_eq!(outcome.score, 0);
        prop_assert_eq!(grid.to_rows(), rows);
        prop_assert_eq!(grid.tiles().map(|t| t.id()).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn prop_parallel_pass_matches_sequential(rows in arb_rows(), dir in arb_direction()) {
        let mut seq = Grid::from_rows(&rows).unwrap();
        let mut par = Grid::from_rows(&rows).unwrap();
        prop_assert_eq!(engine::tilt(&mut seq, dir), engine::tilt_par(&mut par, dir));
        prop_assert_eq!(seq.to_rows(), par.to_rows());
    }

    #[test]
    fn prop_positions_match_cells(rows in arb_rows(), dirs in prop::collection::vec(arb_direction(), 1..6)) {
        let mut grid = Grid::from_rows(&rows).unwrap();
        for dir in dirs {
            engine::tilt(&mut grid, dir);
        }
        let size = grid.size();
        for col in 0..size {
            for row in 0..size {
                if let Some(t) = grid.tile(col, row).unwrap() {
                    prop_assert_eq!(t.position(), (col, row));
                }
            }
        }
    }
}
