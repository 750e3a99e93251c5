use crate::grid::Grid;
use crate::pieces::{Piece, Shape};
use crate::types::{PieceKind, Position, Rotation, RunState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    pub position: Position,
}

impl ActiveSnapshot {
    pub fn new(piece: &Piece, position: Position) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            shape: *piece.shape(),
            position,
        }
    }

    /// Absolute (x, y) of each occupied cell at `y`, using the active column
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        let x = self.position.x;
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Absolute (x, y) of each occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at(self.position.y)
    }
}

/// Read-only view of the engine, recomputed after every command and tick.
///
/// The ghost row is derived here and never written into `grid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next: Option<PieceKind>,
    pub run_state: RunState,
    pub combo: u32,
    pub lines: u32,
    pub active_id: u32,
}

impl GameSnapshot {
    /// True when movement commands would be accepted
    pub fn playable(&self) -> bool {
        self.run_state.is_running() && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next: None,
            run_state: RunState::NotStarted,
            combo: 0,
            lines: 0,
            active_id: 0,
        }
    }
}
