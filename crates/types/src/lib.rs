//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, so the
//! engine, the gravity driver and any renderer can share them freely.
//!
//! # Well Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn position**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Cell Encoding
//!
//! A cell is a `u8`: `0` is empty, `1..=7` is the type id of the piece that
//! locked there (see [`PieceKind::type_id`]).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, COLS, ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.type_id(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(COLS, 10);
//! assert_eq!(ROWS, 20);
//! ```

/// Well width in cells (10 columns)
pub const COLS: u8 = 10;

/// Well height in cells (20 rows)
pub const ROWS: u8 = 20;

/// Largest well side; coordinates are `i8`
pub const MAX_DIMENSION: u8 = i8::MAX as u8;

/// Smallest well that fits every piece at the spawn position
pub const MIN_ROWS: u8 = 4;

/// Smallest well width that fits the spawn box (x = 3..=6)
pub const MIN_COLS: u8 = 7;

/// Gravity interval in milliseconds (one row per 500ms, no level speed-up)
pub const GRAVITY_INTERVAL_MS: u32 = 500;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// Spawn position for every new piece
pub const SPAWN_POSITION: Position = Position { x: 3, y: 0 };

/// A cell in the well: `0` = empty, `1..=7` = locked piece type id
pub type Cell = u8;

/// The seven tetromino piece kinds
///
/// The declaration order is the canonical order; `type_id` is the 1-based
/// index into it and is what gets written into locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell value written into the grid when this piece locks (1..=7)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.type_id(), 1);
    /// assert_eq!(PieceKind::L.type_id(), 7);
    /// ```
    pub fn type_id(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::type_id`]
    pub fn from_type_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Lowercase single-letter name
    pub fn as_str(&self) -> &'static str {
        ["i", "o", "t", "s", "z", "j", "l"][(self.type_id() - 1) as usize]
    }
}

/// Rotation state of the active piece
///
/// - **North**: canonical (spawn) orientation
/// - **East**: rotated 90° clockwise
/// - **South**: rotated 180°
/// - **West**: rotated 270° clockwise
///
/// Only clockwise rotation exists; the cycle is North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Top-left offset of a piece's bounding box within the well
///
/// `x` grows rightward, `y` grows downward. `y` may be negative while a piece
/// sits in the buffer above the visible well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Translate by (dx, dy)
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        SPAWN_POSITION
    }
}

/// Lifecycle of a game session
///
/// `NotStarted → Running ⇄ Paused`, `Running → GameOver`. `GameOver` is left
/// only through an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::NotStarted => "notStarted",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::GameOver => "gameOver",
        }
    }
}

/// Commands accepted by the engine
///
/// This is the full set an input dispatcher may forward. The engine
/// re-validates every command against its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (never locks)
    SoftDrop,
    /// Drop to the ghost position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle Running/Paused
    TogglePause,
    /// Start a new game from `NotStarted`
    Start,
    /// Reset everything back to `NotStarted`
    Restart,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("TOGGLEPAUSE"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("rotateCcw"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            "hold" => Some(Command::Hold),
            "togglepause" => Some(Command::TogglePause),
            "start" => Some(Command::Start),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
            Command::Hold => "hold",
            Command::TogglePause => "togglePause",
            Command::Start => "start",
            Command::Restart => "restart",
        }
    }
}

/// Event emitted after a piece locks.
///
/// Consumed once by observers through the engine's `take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows removed by this lock
    pub lines_cleared: u32,
    /// Combo counter after this lock
    pub combo: u32,
    /// Lines cleared since the game started
    pub total_lines: u32,
}
