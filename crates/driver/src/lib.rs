//! Driver module - runs a game engine against a wall clock
//!
//! The core crate is pure: nothing moves unless someone calls into it. This
//! crate supplies the missing pieces for live play:
//!
//! - [`runtime`]: a tokio task that owns the engine, applies queued commands
//!   and fires gravity ticks, publishing a snapshot after each event
//! - [`observation`]: a JSON view of a snapshot for external renderers
//! - [`config`]: environment-driven settings
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_GRAVITY_MS`: gravity interval in milliseconds (default: 500)
//! - `BLOCKFALL_SEED`: fixed piece seed (default: random)
//! - `BLOCKFALL_MAX_PENDING`: command queue capacity (default: 10)
//!
//! # Example
//!
//! ```no_run
//! use blockfall_driver::{BlockingDriver, DriverConfig};
//! use blockfall_driver::types::Command;
//!
//! let driver = BlockingDriver::start(DriverConfig::from_env())?;
//! driver.send(Command::Start)?;
//! driver.send(Command::HardDrop)?;
//! println!("{:?}", driver.latest().run_state);
//! driver.shutdown()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod observation;
pub mod runtime;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::DriverConfig;
pub use observation::{build_observation, Observation};
pub use runtime::{run_engine, spawn_engine, BlockingDriver, EngineHandle, InboundCommand};
