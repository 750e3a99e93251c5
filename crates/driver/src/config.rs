//! Driver configuration
//!
//! Defaults match the standard game; every field can be overridden from the
//! environment:
//!
//! - `BLOCKFALL_GRAVITY_MS`: gravity interval in milliseconds (default 500)
//! - `BLOCKFALL_SEED`: piece sequence seed (default: random per session)
//! - `BLOCKFALL_MAX_PENDING`: command queue capacity (default 10)
//!
//! Malformed values fall back to the default.

use std::time::Duration;

use crate::core::{EngineConfig, GameEngine, UniformPieceSource};
use crate::types::{COLS, GRAVITY_INTERVAL_MS, ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub gravity_interval_ms: u32,
    pub seed: Option<u32>,
    pub max_pending_commands: usize,
    pub rows: u8,
    pub cols: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            seed: None,
            max_pending_commands: 10,
            rows: ROWS,
            cols: COLS,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (same keys as [`DriverConfig::from_env`])
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let gravity_interval_ms = lookup("BLOCKFALL_GRAVITY_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.gravity_interval_ms);

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let max_pending_commands = lookup("BLOCKFALL_MAX_PENDING")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_pending_commands);

        Self {
            gravity_interval_ms,
            seed,
            max_pending_commands,
            ..defaults
        }
    }

    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms as u64)
    }

    /// Well size for the engine, clamped into the playable range
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.rows, self.cols)
    }

    /// Engine with uniform pieces; unseeded configs draw a random seed
    pub fn build_engine(&self) -> GameEngine<UniformPieceSource> {
        let source = match self.seed {
            Some(seed) => UniformPieceSource::new(seed),
            None => UniformPieceSource::from_entropy(),
        };
        GameEngine::with_source(self.engine_config(), source)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::MIN_COLS;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DriverConfig::from_lookup(|_| None);
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.gravity_interval(), Duration::from_millis(500));
    }

    #[test]
    fn reads_overrides() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_GRAVITY_MS", "250"),
            ("BLOCKFALL_SEED", " 42 "),
            ("BLOCKFALL_MAX_PENDING", "3"),
        ]));
        assert_eq!(config.gravity_interval_ms, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_pending_commands, 3);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_GRAVITY_MS", "0"),
            ("BLOCKFALL_SEED", "abc"),
            ("BLOCKFALL_MAX_PENDING", "-1"),
        ]));
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn degenerate_well_is_clamped() {
        let config = DriverConfig {
            rows: 20,
            cols: 0,
            seed: Some(3),
            ..DriverConfig::default()
        };
        let mut engine = config.build_engine();
        engine.start();

        let obs = crate::observation::build_observation(&engine.snapshot(), 0);
        assert_eq!(obs.board.width, MIN_COLS);
        assert_eq!(obs.board.height, 20);
        assert_eq!(obs.run_state, "running");
        assert!(obs.board.cells.iter().all(|row| row.len() == MIN_COLS as usize));
    }

    #[test]
    fn seeded_engines_match() {
        let config = DriverConfig {
            seed: Some(7),
            ..DriverConfig::default()
        };
        let mut a = config.build_engine();
        let mut b = config.build_engine();
        a.start();
        b.start();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.source().seed(), 7);
    }
}
