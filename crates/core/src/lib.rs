//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and the state machine that
//! drives them. It has **no dependencies** on rendering, input capture, timers
//! or I/O: an external clock calls [`GameEngine::tick`], an input dispatcher
//! calls the command methods, and a renderer reads [`GameSnapshot`]s.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell matrix and full-line clearing
//! - [`pieces`]: shape matrices for the seven pieces and clockwise rotation
//! - [`collision`]: collision, merge and ghost projection (pure functions)
//! - [`rng`]: seedable piece sources (uniform sampling, fixed sequences)
//! - [`engine`]: the game state machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is drawn independently (repeats allowed)
//! - **Plain rotation**: clockwise matrix rotation, rejected on collision (no wall kicks)
//! - **Ghost piece**: derived on demand, never stored in the grid
//! - **Hold**: once per piece; the held piece returns in canonical orientation
//! - **Combo**: consecutive locks that cleared at least one line
//! - **Lock-out**: a spawn that overlaps the stack ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{CommandOutcome, GameEngine};
//! use blockfall_types::{Command, RunState};
//!
//! let mut game = GameEngine::new(12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! assert_eq!(game.apply(Command::HardDrop), CommandOutcome::Applied);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.run_state, RunState::Running);
//! assert!(snapshot.grid.cells().iter().any(|&c| c != 0));
//! ```

pub mod collision;
pub mod engine;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, ghost_drop_y, merge};
pub use engine::{CommandOutcome, EngineConfig, GameEngine};
pub use grid::Grid;
pub use pieces::{get_shape, Piece, Shape};
pub use rng::{PieceSource, SequencePieceSource, SimpleRng, UniformPieceSource};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
