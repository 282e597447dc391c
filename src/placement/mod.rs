//! Rejection-sampling placement of trees, crystals and the start point.

mod config;
mod crystals;
mod packed;
mod trees;

use serde::{Deserialize, Serialize};

pub use config::{CrystalConfig, TreeConfig};
pub use crystals::{derive_start_point, grow_crystals, CrystalField, PlacementError};
pub use packed::{PackedPlacement, MAX_COORD};
pub use trees::plant_trees;

/// Candidate draws allowed per placement run on a `grid_size`-wide grid.
pub fn retry_budget(grid_size: usize) -> u64 {
    8 * (grid_size as u64) * (grid_size as u64)
}

/// How a placement run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Number of objects asked for.
    pub requested: u32,
    /// Number of objects actually placed.
    pub placed: u32,
    /// Candidate positions drawn.
    pub attempts: u64,
}

impl PlacementReport {
    /// True if the retry budget ran out before the target was reached.
    pub fn is_shortfall(&self) -> bool {
        self.placed < self.requested
    }
}
