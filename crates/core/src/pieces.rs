//! Pieces module - tetromino shape matrices and clockwise rotation
//!
//! Every piece is a square bounding matrix (2x2 for O, 4x4 for I, 3x3 for the
//! rest) whose occupied cells hold the piece's type id. Rotation is a plain
//! matrix turn: transpose, then reverse each row.
//!
//! There is no wall-kick table. A rotation that collides at the current
//! position is rejected by the engine and the piece keeps its orientation.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Rotation, EMPTY};

/// Largest bounding box side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single occupied cell relative to the bounding box's top-left corner
pub type MinoOffset = (i8, i8);

/// Occupied offsets of a shape; stack-only
pub type Minos = ArrayVec<MinoOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// A square shape matrix of side `size`
///
/// Only the top-left `size x size` corner of `cells` is meaningful; the rest
/// stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Canonical (spawn) orientation of a piece kind
    pub fn canonical(kind: PieceKind) -> Self {
        let id = kind.type_id();
        let (size, pattern): (u8, [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) = match kind {
            PieceKind::I => (4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::O => (2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
            PieceKind::T => (3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::S => (3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
            PieceKind::Z => (3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::J => (3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::L => (3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        };

        let mut cells = pattern;
        for cell in cells.iter_mut().flatten() {
            if *cell != 0 {
                *cell = id;
            }
        }
        Self { size, cells }
    }

    /// Side length of the bounding matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at (x, y) inside the bounding matrix
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size as usize || y >= self.size as usize {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotate_clockwise(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Occupied cell offsets, row by row
    pub fn minos(&self) -> Minos {
        let n = self.size as usize;
        let mut out = Minos::new();
        for y in 0..n {
            for x in 0..n {
                if self.cells[y][x] != EMPTY {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Copy out as nested rows (for renderers and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let n = self.size as usize;
        self.cells[..n].iter().map(|row| row[..n].to_vec()).collect()
    }
}

/// A piece with its current shape matrix and rotation state.
///
/// Never mutated in place: rotation yields a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    shape: Shape,
}

impl Piece {
    /// A piece in its canonical orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            shape: Shape::canonical(kind),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Type id written into locked cells
    pub fn type_id(&self) -> Cell {
        self.kind.type_id()
    }

    /// This piece turned 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotate_cw(),
            shape: self.shape.rotate_clockwise(),
        }
    }

    /// Same kind, back in canonical orientation
    pub fn canonical(&self) -> Self {
        Self::new(self.kind)
    }

    pub fn minos(&self) -> Minos {
        self.shape.minos()
    }
}

/// Get the canonical shape for a kind
pub fn get_shape(kind: PieceKind) -> Shape {
    Shape::canonical(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sizes() {
        assert_eq!(Shape::canonical(PieceKind::I).size(), 4);
        assert_eq!(Shape::canonical(PieceKind::O).size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(Shape::canonical(kind).size(), 3);
        }
    }

    #[test]
    fn test_every_piece_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::canonical(kind).minos().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_cells_hold_type_id() {
        let shape = Shape::canonical(PieceKind::J);
        assert_eq!(shape.to_rows(), vec![vec![6, 0, 0], vec![6, 6, 6], vec![0, 0, 0]]);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = Shape::canonical(PieceKind::T).rotate_clockwise();
        assert_eq!(
            rotated.to_rows(),
            vec![vec![0, 3, 0], vec![0, 3, 3], vec![0, 3, 0]]
        );
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = Shape::canonical(PieceKind::I).rotate_clockwise();
        assert_eq!(rotated.minos().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_piece_rotation_state_advances() {
        let piece = Piece::new(PieceKind::S).rotated().rotated();
        assert_eq!(piece.rotation, Rotation::South);
        assert_eq!(piece.canonical(), Piece::new(PieceKind::S));
    }
}
