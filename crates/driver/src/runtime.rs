//! Engine runtime - the single writer and the gravity clock.
//!
//! One tokio task owns the [`GameEngine`]. Commands arrive over a bounded
//! channel and gravity ticks come from one timer; a single `select!` loop
//! serializes both, so no two mutations ever interleave. A snapshot is
//! published on a `watch` channel after every event.
//!
//! The gravity timer runs only while the game is `Running`. It is re-armed
//! to a full interval whenever the run state or the active piece instance
//! changes, so a tick scheduled for an old piece never lands on a new one.
//! A command handled after the deadline is followed by the overdue tick.

use std::future;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use crate::config::DriverConfig;
use crate::core::{CommandOutcome, GameEngine, GameSnapshot, PieceSource};
use crate::types::{Command, RunState};

/// Command delivered to the engine task.
#[derive(Debug)]
pub struct InboundCommand {
    pub command: Command,
    /// Where to report the outcome, if the sender cares
    pub reply: Option<oneshot::Sender<CommandOutcome>>,
}

/// What the gravity timer is armed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GravityKey {
    run_state: RunState,
    active_id: u32,
}

impl GravityKey {
    fn of<S: PieceSource>(engine: &GameEngine<S>) -> Self {
        Self {
            run_state: engine.run_state(),
            active_id: engine.active_id(),
        }
    }

    fn deadline(&self, interval: Duration) -> Option<Instant> {
        if self.run_state.is_running() {
            Some(Instant::now() + interval)
        } else {
            None
        }
    }
}

/// Engine task body. Returns when every command sender is gone.
pub async fn run_engine<S: PieceSource>(
    mut engine: GameEngine<S>,
    interval: Duration,
    mut cmd_rx: mpsc::Receiver<InboundCommand>,
    snap_tx: watch::Sender<GameSnapshot>,
) {
    let mut key = GravityKey::of(&engine);
    let mut deadline = key.deadline(interval);

    loop {
        let gravity = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => future::pending::<()>().await,
            }
        };

        let mut reply = None;
        let mut ticked = tokio::select! {
            inbound = cmd_rx.recv() => {
                let Some(inbound) = inbound else {
                    break;
                };
                let outcome = engine.apply(inbound.command);
                reply = inbound.reply.map(|tx| (tx, outcome));
                false
            }
            _ = gravity => {
                engine.tick();
                true
            }
        };

        // A busy command queue must not hold gravity off past its deadline.
        let overdue = deadline.is_some_and(|at| Instant::now() >= at);
        if !ticked && overdue && GravityKey::of(&engine) == key {
            engine.tick();
            ticked = true;
        }

        if let Some(event) = engine.take_last_event() {
            debug!(
                lines_cleared = event.lines_cleared,
                combo = event.combo,
                total_lines = event.total_lines,
                "lock"
            );
        }

        let new_key = GravityKey::of(&engine);
        if ticked || new_key != key {
            deadline = new_key.deadline(interval);
            trace!(
                state = new_key.run_state.as_str(),
                active_id = new_key.active_id,
                armed = deadline.is_some(),
                "gravity re-armed"
            );
        }
        key = new_key;

        // Publish before replying so a caller never reads a stale snapshot.
        snap_tx.send_replace(engine.snapshot());
        if let Some((tx, outcome)) = reply {
            let _ = tx.send(outcome);
        }
    }

    debug!("engine task stopped");
}

/// Handle to a running engine task
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<InboundCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<()>,
}

/// Spawn the engine task on the current tokio runtime.
pub fn spawn_engine<S>(engine: GameEngine<S>, config: &DriverConfig) -> EngineHandle
where
    S: PieceSource + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (snap_tx, snapshots) = watch::channel(engine.snapshot());
    let task = tokio::spawn(run_engine(
        engine,
        config.gravity_interval(),
        cmd_rx,
        snap_tx,
    ));

    EngineHandle {
        cmd_tx,
        snapshots,
        task,
    }
}

impl EngineHandle {
    /// Send a command and wait for its outcome
    pub async fn send(&self, command: Command) -> Result<CommandOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.cmd_tx
            .send(InboundCommand {
                command,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| anyhow!("engine task stopped"))?;
        reply_rx.await.context("engine task dropped the reply")
    }

    /// Queue a command without waiting; fails when the queue is full
    pub fn try_send(&self, command: Command) -> Result<()> {
        self.cmd_tx
            .try_send(InboundCommand {
                command,
                reply: None,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => anyhow!("command queue full"),
                TrySendError::Closed(_) => anyhow!("engine task stopped"),
            })
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified after every command and tick
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Close the command channel and wait for the task to finish
    pub async fn shutdown(self) -> Result<()> {
        let Self { cmd_tx, task, .. } = self;
        drop(cmd_tx);
        task.await.context("engine task failed")
    }
}

/// Engine task plus its own runtime, for synchronous hosts.
///
/// Must not be used from inside another tokio runtime.
pub struct BlockingDriver {
    rt: Runtime,
    handle: EngineHandle,
}

impl BlockingDriver {
    pub fn start(config: DriverConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let handle = {
            let _guard = rt.enter();
            spawn_engine(config.build_engine(), &config)
        };
        Ok(Self { rt, handle })
    }

    pub fn start_from_env() -> Result<Self> {
        Self::start(DriverConfig::from_env())
    }

    pub fn send(&self, command: Command) -> Result<CommandOutcome> {
        self.rt.block_on(self.handle.send(command))
    }

    pub fn latest(&self) -> GameSnapshot {
        self.handle.latest()
    }

    pub fn shutdown(self) -> Result<()> {
        let Self { rt, handle } = self;
        rt.block_on(handle.shutdown())
    }
}
