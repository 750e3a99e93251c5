//! Property tests for the grid, rotation and engine invariants.

use blockfall_core::types::{Command, PieceKind, Position, RunState, EMPTY};
use blockfall_core::{collides, ghost_drop_y, merge, CommandOutcome, GameEngine, Grid, Piece};
use proptest::prelude::*;

const COMMANDS: [Command; 7] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::SoftDrop,
    Command::HardDrop,
    Command::Rotate,
    Command::Hold,
    Command::TogglePause,
];

fn grid_strategy() -> impl Strategy<Value = Grid> {
    // Rows are biased towards being full so clears actually happen.
    let row = prop_oneof![
        2 => Just(vec![5u8; 10]),
        3 => proptest::collection::vec(0u8..=7, 10),
    ];
    proptest::collection::vec(row, 20).prop_map(|rows| Grid::from_rows(&rows).unwrap())
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

proptest! {
    #[test]
    fn clear_removes_exactly_the_full_rows(grid in grid_strategy()) {
        let full_before = (0..20).filter(|&y| grid.is_row_full(y)).count();
        let survivors: Vec<Vec<u8>> = grid
            .iter_rows()
            .filter(|r| r.iter().any(|&c| c == EMPTY))
            .map(|r| r.to_vec())
            .collect();

        let mut cleared = grid.clone();
        let n = cleared.clear_full_lines();

        prop_assert_eq!(n, full_before);
        prop_assert!((0..20).all(|y| !cleared.is_row_full(y)));

        // Top rows are empty, the rest are the survivors in order.
        let rows = cleared.to_rows();
        prop_assert!(rows[..n].iter().all(|r| r.iter().all(|&c| c == EMPTY)));
        prop_assert_eq!(&rows[n..], &survivors[..]);

        // Idempotent once nothing is full.
        let mut again = cleared.clone();
        prop_assert_eq!(again.clear_full_lines(), 0);
        prop_assert_eq!(again, cleared);
    }

    #[test]
    fn four_rotations_are_identity(kind in kind_strategy(), turns in 0usize..4) {
        let mut piece = Piece::new(kind);
        for _ in 0..turns {
            piece = piece.rotated();
        }
        let home = piece.rotated().rotated().rotated().rotated();
        prop_assert_eq!(home, piece);
        prop_assert_eq!(piece.minos().len(), 4);
    }

    #[test]
    fn ghost_rests_on_something(
        kind in kind_strategy(),
        x in -2i8..9,
        heights in proptest::collection::vec(0u8..12, 10),
    ) {
        let mut grid = Grid::default();
        for (col, &h) in heights.iter().enumerate() {
            for y in (20 - h as i8)..20 {
                grid.set(col as i8, y, 1);
            }
        }

        let piece = Piece::new(kind);
        let start = Position::new(x, -2);
        prop_assume!(!collides(&grid, &piece, start));

        let y = ghost_drop_y(&grid, &piece, start);
        prop_assert!(y >= start.y);
        prop_assert!(!collides(&grid, &piece, Position::new(x, y)));
        prop_assert!(collides(&grid, &piece, Position::new(x, y + 1)));

        // Merging never touches the source grid.
        let merged = merge(&grid, &piece, Position::new(x, y));
        let added = merged.cells().iter().filter(|&&c| c != EMPTY).count()
            - grid.cells().iter().filter(|&&c| c != EMPTY).count();
        prop_assert!(added <= 4);
    }

    #[test]
    fn rollout_keeps_engine_consistent(
        seed in any::<u32>(),
        picks in proptest::collection::vec(0usize..COMMANDS.len(), 1..300),
    ) {
        let mut game = GameEngine::new(seed);
        game.start();
        let mut last_id = game.active_id();
        let mut last_lines = game.lines();

        for pick in picks {
            let command = COMMANDS[pick];
            let outcome = game.apply(command);
            let snapshot = game.snapshot();

            // Cells only ever hold valid ids and no row stays full after a lock.
            prop_assert!(snapshot.grid.cells().iter().all(|&c| c <= 7));
            prop_assert!((0..20).all(|y| !snapshot.grid.is_row_full(y)));

            prop_assert!(game.active_id() >= last_id);
            prop_assert!(game.lines() >= last_lines);
            last_id = game.active_id();
            last_lines = game.lines();

            match snapshot.run_state {
                RunState::Running => {
                    let active = game.active().copied().unwrap();
                    prop_assert!(!collides(game.grid(), &active, game.position()));
                    prop_assert!(snapshot.ghost_y.unwrap() >= game.position().y);
                }
                RunState::GameOver => {
                    prop_assert_eq!(game.apply(Command::Start), CommandOutcome::Rejected);
                    break;
                }
                _ => {}
            }

            if command == Command::Hold && outcome.is_applied() {
                prop_assert!(!game.can_hold());
            }
        }
    }
}
