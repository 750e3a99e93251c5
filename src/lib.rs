//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so hosts can depend on
//! `blockfall::{core,driver,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_types as types;
