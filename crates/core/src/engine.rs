//! Game engine module - the single owner of all per-session state
//!
//! Ties together the grid, pieces, collision rules and the piece source.
//! Every mutation goes through a command method; each one is total and
//! reports [`CommandOutcome::Rejected`] instead of failing when the current
//! state does not allow it.
//!
//! Lifecycle: `NotStarted → Running ⇄ Paused`, `Running → GameOver`.
//! `GameOver` is left only via [`GameEngine::restart`] followed by
//! [`GameEngine::start`].

use tracing::{debug, info, trace};

use crate::collision::{collides, ghost_drop_y, merge_into};
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::{PieceSource, UniformPieceSource};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Result of a command or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOutcome {
    /// State changed (or a lock happened)
    Applied,
    /// Not allowed in the current state; nothing changed
    Rejected,
}

impl CommandOutcome {
    fn from_bool(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Rejected
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Well dimensions for a session
///
/// The engine clamps both sides into `MIN_ROWS..=MAX_DIMENSION` and
/// `MIN_COLS..=MAX_DIMENSION`, so every piece fits at the spawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: u8,
    pub cols: u8,
}

impl EngineConfig {
    pub fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }.clamped()
    }

    /// Same config with both sides pulled into the playable range
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.clamp(MIN_ROWS, MAX_DIMENSION),
            cols: self.cols.clamp(MIN_COLS, MAX_DIMENSION),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine<S = UniformPieceSource> {
    config: EngineConfig,
    grid: Grid,
    active: Option<Piece>,
    position: Position,
    next: Option<PieceKind>,
    hold: Option<PieceKind>,
    can_hold: bool,
    run_state: RunState,
    combo: u32,
    lines: u32,
    /// Monotonic id of the active piece instance (increments on spawn and hold swaps).
    active_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    source: S,
}

impl GameEngine<UniformPieceSource> {
    /// Standard 20x10 game with uniform pieces from the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(EngineConfig::default(), UniformPieceSource::new(seed))
    }
}

impl Default for GameEngine<UniformPieceSource> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameEngine<S> {
    pub fn with_source(config: EngineConfig, source: S) -> Self {
        let config = config.clamped();
        Self {
            config,
            grid: Grid::new(config.rows, config.cols),
            active: None,
            position: SPAWN_POSITION,
            next: None,
            hold: None,
            can_hold: true,
            run_state: RunState::NotStarted,
            combo: 0,
            lines: 0,
            active_id: 0,
            last_event: None,
            source,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access to the well, for setting up puzzles and test scenarios
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn active_id(&self) -> u32 {
        self.active_id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Resting row of the active piece in its current column
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active.as_ref()?;
        Some(ghost_drop_y(&self.grid, piece, self.position))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clone_from(&self.grid);
        out.active = self
            .active
            .as_ref()
            .map(|p| ActiveSnapshot::new(p, self.position));
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next = self.next;
        out.run_state = self.run_state;
        out.combo = self.combo;
        out.lines = self.lines;
        out.active_id = self.active_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a game from `NotStarted`: empty well, fresh preview, first spawn.
    pub fn start(&mut self) -> CommandOutcome {
        if self.run_state != RunState::NotStarted {
            return CommandOutcome::Rejected;
        }

        self.grid.clear();
        self.hold = None;
        self.can_hold = true;
        self.combo = 0;
        self.lines = 0;
        self.last_event = None;
        self.next = Some(self.source.next_piece());
        self.run_state = RunState::Running;
        info!(rows = self.config.rows, cols = self.config.cols, "game started");

        self.spawn();
        CommandOutcome::Applied
    }

    /// Back to `NotStarted` with everything cleared. Does not spawn.
    pub fn restart(&mut self) -> CommandOutcome {
        self.grid.clear();
        self.active = None;
        self.position = SPAWN_POSITION;
        self.next = None;
        self.hold = None;
        self.can_hold = true;
        self.combo = 0;
        self.lines = 0;
        self.last_event = None;
        self.run_state = RunState::NotStarted;
        info!("game reset");
        CommandOutcome::Applied
    }

    /// Promote the preview to active, draw a new preview, re-arm hold.
    fn spawn(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_piece(),
        };
        self.next = Some(self.source.next_piece());
        self.can_hold = true;
        self.place_at_spawn(Piece::new(kind));
    }

    /// Put `piece` at the spawn position as a new active instance; lock-out
    /// ends the game.
    fn place_at_spawn(&mut self, piece: Piece) {
        self.active = Some(piece);
        self.position = SPAWN_POSITION;
        self.active_id = self.active_id.wrapping_add(1);

        if collides(&self.grid, &piece, self.position) {
            self.run_state = RunState::GameOver;
            info!(
                piece = piece.kind.as_str(),
                lines = self.lines,
                "lock-out, game over"
            );
        }
    }

    /// Translate the active piece if the destination is free
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let target = self.position.offset(dx, dy);
        if collides(&self.grid, &piece, target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Move one column; `direction` is -1 (left) or +1 (right)
    pub fn move_horizontal(&mut self, direction: i8) -> CommandOutcome {
        let dx = direction.signum();
        if dx == 0 {
            return CommandOutcome::Rejected;
        }
        CommandOutcome::from_bool(self.try_move(dx, 0))
    }

    /// Move one row down if free. Never locks.
    pub fn soft_drop(&mut self) -> CommandOutcome {
        CommandOutcome::from_bool(self.try_move(0, 1))
    }

    /// Rotate clockwise in place; rejected outright on collision (no kicks).
    pub fn rotate(&mut self) -> CommandOutcome {
        if !self.run_state.is_running() {
            return CommandOutcome::Rejected;
        }
        let Some(piece) = self.active else {
            return CommandOutcome::Rejected;
        };

        let rotated = piece.rotated();
        if collides(&self.grid, &rotated, self.position) {
            return CommandOutcome::Rejected;
        }
        self.active = Some(rotated);
        CommandOutcome::Applied
    }

    /// Drop to the ghost row and lock immediately
    pub fn hard_drop(&mut self) -> CommandOutcome {
        if !self.run_state.is_running() {
            return CommandOutcome::Rejected;
        }
        let Some(piece) = self.active else {
            return CommandOutcome::Rejected;
        };

        self.position.y = ghost_drop_y(&self.grid, &piece, self.position);
        self.lock_piece();
        CommandOutcome::Applied
    }

    /// Gravity step: fall one row, or lock when blocked.
    pub fn tick(&mut self) -> CommandOutcome {
        if !self.run_state.is_running() || self.active.is_none() {
            return CommandOutcome::Rejected;
        }

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        CommandOutcome::Applied
    }

    /// Set the active piece aside (once per piece)
    pub fn hold(&mut self) -> CommandOutcome {
        if !self.run_state.is_running() || !self.can_hold {
            return CommandOutcome::Rejected;
        }
        let Some(active) = self.active else {
            return CommandOutcome::Rejected;
        };

        match self.hold.replace(active.kind) {
            Some(held) => self.place_at_spawn(Piece::new(held)),
            None => self.spawn(),
        }

        self.can_hold = false;
        CommandOutcome::Applied
    }

    /// Running ⇄ Paused
    pub fn toggle_pause(&mut self) -> CommandOutcome {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            _ => return CommandOutcome::Rejected,
        };
        debug!(state = self.run_state.as_str(), "pause toggled");
        CommandOutcome::Applied
    }

    /// Merge the active piece, clear lines, update combo, spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        merge_into(&mut self.grid, &piece, self.position);
        let cleared = self.grid.clear_full_lines() as u32;

        if cleared > 0 {
            self.combo += 1;
            self.lines += cleared;
        } else {
            self.combo = 0;
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            combo: self.combo,
            total_lines: self.lines,
        });
        debug!(
            piece = piece.kind.as_str(),
            x = self.position.x,
            y = self.position.y,
            cleared,
            combo = self.combo,
            "piece locked"
        );

        self.spawn();
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let outcome = match command {
            Command::MoveLeft => self.move_horizontal(-1),
            Command::MoveRight => self.move_horizontal(1),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::Hold => self.hold(),
            Command::TogglePause => self.toggle_pause(),
            Command::Start => self.start(),
            Command::Restart => self.restart(),
        };

        if outcome == CommandOutcome::Rejected {
            trace!(
                command = command.as_str(),
                state = self.run_state.as_str(),
                "command rejected"
            );
        }
        outcome
    }
}
