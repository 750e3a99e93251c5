//! Observation module - JSON view of a snapshot for renderers
//!
//! One observation is one line of JSON. Pieces are lowercase kind names,
//! states are camelCase, cells are `[x, y]` pairs in well coordinates.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{ActiveSnapshot, GameSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    #[default]
    Observation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardObs {
    pub width: u8,
    pub height: u8,
    /// Top row first; 0 = empty, 1..=7 = piece type id
    pub cells: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveObs {
    pub kind: String,
    pub rotation: String,
    pub x: i8,
    pub y: i8,
    pub cells: Vec<[i8; 2]>,
}

impl From<&ActiveSnapshot> for ActiveObs {
    fn from(active: &ActiveSnapshot) -> Self {
        Self {
            kind: active.kind.as_str().to_string(),
            rotation: active.rotation.as_str().to_string(),
            x: active.position.x,
            y: active.position.y,
            cells: active.cells().map(|(x, y)| [x, y]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub board: BoardObs,
    pub active: Option<ActiveObs>,
    pub ghost_y: Option<i8>,
    /// Cells of the ghost piece (renderer-only)
    pub ghost_cells: Option<Vec<[i8; 2]>>,
    pub hold: Option<String>,
    pub can_hold: bool,
    pub next: Option<String>,
    pub run_state: String,
    pub combo: u32,
    pub lines: u32,
}

impl Observation {
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to encode observation")
    }
}

pub fn build_observation(snapshot: &GameSnapshot, seq: u64) -> Observation {
    let ghost_cells = match (snapshot.active.as_ref(), snapshot.ghost_y) {
        (Some(active), Some(ghost_y)) => {
            Some(active.cells_at(ghost_y).map(|(x, y)| [x, y]).collect())
        }
        _ => None,
    };

    Observation {
        msg_type: ObservationType::Observation,
        seq,
        board: BoardObs {
            width: snapshot.grid.cols(),
            height: snapshot.grid.rows(),
            cells: snapshot.grid.to_rows(),
        },
        active: snapshot.active.as_ref().map(ActiveObs::from),
        ghost_y: snapshot.ghost_y,
        ghost_cells,
        hold: snapshot.hold.map(|k| k.as_str().to_string()),
        can_hold: snapshot.can_hold,
        next: snapshot.next.map(|k| k.as_str().to_string()),
        run_state: snapshot.run_state.as_str().to_string(),
        combo: snapshot.combo,
        lines: snapshot.lines,
    }
}
