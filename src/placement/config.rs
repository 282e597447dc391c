//! Tree and crystal placement configuration.

use serde::{Deserialize, Serialize};

use crate::noise::OctaveNoiseConfig;

/// Parameters for tree placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Noise field deciding where trees may grow.
    pub noise: OctaveNoiseConfig,
    /// Seed for the candidate positions.
    pub position_seed: u32,
    /// Number of trees to place.
    pub count: u32,
    /// Noise value a cell must exceed to host a tree.
    pub density: f64,
    /// Use `1 - noise` instead of the noise value.
    pub invert: bool,
    /// Multiply by the island falloff.
    pub falloff: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            noise: OctaveNoiseConfig::tree_cover(0),
            position_seed: 0,
            count: 1536,
            density: 0.6,
            invert: false,
            falloff: false,
        }
    }
}

impl TreeConfig {
    pub fn with_seeds(noise_seed: u32, position_seed: u32) -> Self {
        Self {
            noise: OctaveNoiseConfig::tree_cover(noise_seed),
            position_seed,
            ..Default::default()
        }
    }
}

/// Parameters for crystal placement and the derived start point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalConfig {
    /// Seed for candidate positions and the start point direction.
    pub seed: u32,
    /// Radius of the grass disc each crystal needs.
    pub grass_radius: u32,
    /// Number of crystals to place.
    pub count: u32,
    /// Minimum distance between two crystals.
    pub min_distance: u32,
    /// Largest allowed height change per cell around a crystal.
    pub max_slope: f64,
    /// Distance of the start point from the first crystal.
    pub start_point_distance: f64,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grass_radius: 16,
            count: 4,
            min_distance: 128,
            max_slope: 0.13,
            start_point_distance: 8.0,
        }
    }
}

impl CrystalConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}
