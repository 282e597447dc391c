//! Coast erosion and bottom relaxation configuration.

use serde::{Deserialize, Serialize};

/// Parameters for the island's underside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomConfig {
    /// Seed for the relaxation perturbations.
    pub seed: u32,
    /// Extra random depth; each lowering step draws from `[0, 1 + add)`.
    pub add: f64,
    /// Thickness of a freshly generated column (`top - bottom`).
    pub min_thickness: u8,
    /// Upper bound on relaxation sweeps before giving up.
    pub max_sweeps: u32,
}

impl Default for BottomConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            add: 1.0,
            min_thickness: 3,
            max_sweeps: 16_384,
        }
    }
}

impl BottomConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}
