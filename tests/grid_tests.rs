//! Grid tests - cell access, collision reads and line clearing

use blockfall::core::Grid;
use blockfall::types::{COLS, EMPTY, ROWS};

fn fill_row(grid: &mut Grid, y: i8, id: u8) {
    for x in 0..grid.cols() as i8 {
        grid.set(x, y, id);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::default();
    assert_eq!(grid.rows(), ROWS);
    assert_eq!(grid.cols(), COLS);

    for y in 0..ROWS as i8 {
        for x in 0..COLS as i8 {
            assert_eq!(grid.get(x, y), Some(EMPTY), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::default();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(COLS as i8, 0), None);
    assert_eq!(grid.get(0, ROWS as i8), None);
}

#[test]
fn test_grid_set_rejects_invalid() {
    let mut grid = Grid::default();

    assert!(grid.set(0, 0, 7));
    assert_eq!(grid.get(0, 0), Some(7));

    assert!(!grid.set(0, 0, 8));
    assert!(!grid.set(-1, 5, 1));
    assert!(!grid.set(0, ROWS as i8, 1));
    assert_eq!(grid.get(0, 0), Some(7));
}

#[test]
fn test_cell_filled_edges() {
    let mut grid = Grid::default();
    grid.set(4, 10, 3);

    assert!(grid.cell_filled(4, 10));
    assert!(!grid.cell_filled(5, 10));

    // Above the well is open, but not beside it.
    assert!(!grid.cell_filled(4, -3));
    assert!(grid.cell_filled(-1, -3));
    assert!(grid.cell_filled(COLS as i8, -1));

    // Walls and floor.
    assert!(grid.cell_filled(-1, 0));
    assert!(grid.cell_filled(COLS as i8, 0));
    assert!(grid.cell_filled(0, ROWS as i8));
}

#[test]
fn test_clear_single_bottom_line() {
    let mut grid = Grid::default();
    fill_row(&mut grid, 19, 1);
    grid.set(2, 18, 5);

    assert_eq!(grid.clear_full_lines(), 1);
    assert_eq!(grid.get(2, 19), Some(5));
    assert!(grid.row(0).iter().all(|&c| c == EMPTY));
    assert!(grid.row(18).iter().all(|&c| c == EMPTY));
}

#[test]
fn test_clear_non_adjacent_lines_keeps_order() {
    let mut grid = Grid::default();
    fill_row(&mut grid, 19, 1);
    grid.set(0, 18, 2);
    fill_row(&mut grid, 17, 1);
    grid.set(1, 16, 3);
    fill_row(&mut grid, 15, 1);
    grid.set(2, 14, 4);

    assert_eq!(grid.clear_full_lines(), 3);

    // Survivors slide down, top to bottom: 4, 3, 2.
    assert_eq!(grid.get(2, 17), Some(4));
    assert_eq!(grid.get(1, 18), Some(3));
    assert_eq!(grid.get(0, 19), Some(2));
    assert_eq!(grid.cells().iter().filter(|&&c| c != EMPTY).count(), 3);
}

#[test]
fn test_clear_tetris() {
    let mut grid = Grid::default();
    for y in 16..20 {
        fill_row(&mut grid, y, 1);
    }

    assert_eq!(grid.clear_full_lines(), 4);
    assert!(grid.cells().iter().all(|&c| c == EMPTY));
}

#[test]
fn test_clear_without_full_lines_is_noop() {
    let mut grid = Grid::default();
    grid.set(0, 19, 1);
    grid.set(9, 0, 2);
    let before = grid.clone();

    assert_eq!(grid.clear_full_lines(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_every_row_full() {
    let mut grid = Grid::new(4, 3);
    for y in 0..4 {
        fill_row(&mut grid, y, 6);
    }

    assert_eq!(grid.clear_full_lines(), 4);
    assert_eq!(grid.open_row_count(), 4);
}

#[test]
fn test_from_rows_and_back() {
    let rows = vec![vec![0, 0, 1], vec![2, 0, 0]];
    let grid = Grid::from_rows(&rows).unwrap();

    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.get(2, 0), Some(1));
    assert_eq!(grid.to_rows(), rows);

    assert!(Grid::from_rows(&[]).is_none());
    assert!(Grid::from_rows(&[vec![0, 0], vec![0]]).is_none());
    assert!(Grid::from_rows(&[vec![9]]).is_none());
}

#[test]
fn test_clone_from_copies_cells() {
    let mut source = Grid::default();
    source.set(3, 3, 3);

    let mut target = Grid::default();
    target.set(0, 0, 1);
    target.clone_from(&source);

    assert_eq!(target, source);
}
