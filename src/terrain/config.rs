//! Island outline and surface height configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::Falloff;
use crate::noise::OctaveNoiseConfig;

/// Parameters for the island outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandConfig {
    pub noise: OctaveNoiseConfig,
    /// Radial shape that pushes land towards the grid center.
    pub shape: Falloff,
    /// Fraction of the noise range that becomes land (0-1).
    pub density: f64,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            noise: OctaveNoiseConfig::default(),
            shape: Falloff::default(),
            density: 0.5,
        }
    }
}

impl IslandConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            noise: OctaveNoiseConfig::with_seed(seed),
            ..Default::default()
        }
    }

    /// Noise value a cell must exceed (after falloff) to become land.
    pub fn threshold(&self) -> f64 {
        1.0 - self.density
    }
}

/// Parameters for the top surface of the island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightConfig {
    pub noise: OctaveNoiseConfig,
    /// Height of the lowest possible surface.
    pub base: f64,
    /// Height of the highest possible surface.
    pub top: f64,
    /// Shaping exponent; larger values flatten the lowlands and sharpen peaks.
    pub exponent: f64,
    /// Use `1 - noise` instead of the noise value.
    pub invert: bool,
    /// Multiply by the island falloff so the terrain sinks towards the coast.
    pub falloff: bool,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            noise: OctaveNoiseConfig::default(),
            base: 128.0,
            top: 192.0,
            exponent: 4.0,
            invert: false,
            falloff: false,
        }
    }
}

impl HeightConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            noise: OctaveNoiseConfig::with_seed(seed),
            ..Default::default()
        }
    }
}
