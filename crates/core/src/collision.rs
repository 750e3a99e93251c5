//! Collision and merge - pure functions over a grid, a piece and a position
//!
//! Rows above the well (`y < 0`) never collide, so a freshly spawned piece may
//! poke out of the top. Columns outside the well and rows below it always do.

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::types::Position;

/// True if any occupied cell of `piece`, translated by `pos`, is outside the
/// well horizontally, below the bottom row, or on a filled cell.
pub fn collides(grid: &Grid, piece: &Piece, pos: Position) -> bool {
    piece
        .minos()
        .iter()
        .any(|&(dx, dy)| grid.cell_filled(pos.x + dx, pos.y + dy))
}

/// A copy of `grid` with the piece's cells written as its type id.
///
/// Cells that land above the well are dropped.
pub fn merge(grid: &Grid, piece: &Piece, pos: Position) -> Grid {
    let mut out = grid.clone();
    merge_into(&mut out, piece, pos);
    out
}

/// In-place form of [`merge`]
pub fn merge_into(grid: &mut Grid, piece: &Piece, pos: Position) {
    let id = piece.type_id();
    for &(dx, dy) in piece.minos().iter() {
        let y = pos.y + dy;
        if y < 0 {
            continue;
        }
        grid.set(pos.x + dx, y, id);
    }
}

/// Lowest `y` the piece can rest at in column `pos.x`, starting from `pos.y`.
///
/// Walks down while the next row is free; terminates because rows below the
/// well always collide.
pub fn ghost_drop_y(grid: &Grid, piece: &Piece, pos: Position) -> i8 {
    let mut y = pos.y;
    while !collides(grid, piece, Position::new(pos.x, y + 1)) {
        y += 1;
    }
    y
}
