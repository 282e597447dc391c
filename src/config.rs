//! Complete parameter set for one generation run.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::erosion::BottomConfig;
use crate::noise::OctaveNoiseConfig;
use crate::placement::{CrystalConfig, TreeConfig};
use crate::terrain::{HeightConfig, IslandConfig};

/// Seeds are drawn from `0..SEED_RANGE` when not given explicitly.
pub const SEED_RANGE: u32 = 0x8000;

/// Errors for parameter sets that cannot be generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// One seed per randomized part of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seeds {
    pub island: u32,
    pub height: u32,
    pub bottom: u32,
    pub tree: u32,
    pub tree_position: u32,
    pub crystal: u32,
}

impl Seeds {
    /// Derives all seeds from one master value.
    pub fn from_master(master: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(master);
        Self {
            island: rng.random_range(0..SEED_RANGE),
            height: rng.random_range(0..SEED_RANGE),
            bottom: rng.random_range(0..SEED_RANGE),
            tree: rng.random_range(0..SEED_RANGE),
            tree_position: rng.random_range(0..SEED_RANGE),
            crystal: rng.random_range(0..SEED_RANGE),
        }
    }

    /// Seeds drawn from the current time.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_master(nanos)
    }
}

/// Parameters of every pipeline stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    pub island: IslandConfig,
    pub height: HeightConfig,
    pub bottom: BottomConfig,
    pub trees: TreeConfig,
    pub crystals: CrystalConfig,
}

impl WorldConfig {
    /// Default parameters with the given seeds.
    pub fn with_seeds(seeds: Seeds) -> Self {
        Self {
            island: IslandConfig::with_seed(seeds.island),
            height: HeightConfig::with_seed(seeds.height),
            bottom: BottomConfig::with_seed(seeds.bottom),
            trees: TreeConfig::with_seeds(seeds.tree, seeds.tree_position),
            crystals: CrystalConfig::with_seed(seeds.crystal),
        }
    }

    pub fn seeds(&self) -> Seeds {
        Seeds {
            island: self.island.noise.seed,
            height: self.height.noise.seed,
            bottom: self.bottom.seed,
            tree: self.trees.noise.seed,
            tree_position: self.trees.position_seed,
            crystal: self.crystals.seed,
        }
    }

    /// Checks parameter values that would make generation meaningless or panic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_noise("island noise", &self.island.noise)?;
        validate_noise("height noise", &self.height.noise)?;
        validate_noise("tree noise", &self.trees.noise)?;

        finite("island edge", self.island.shape.edge)?;
        finite("island size", self.island.shape.size)?;
        if self.island.shape.edge <= 0.0 {
            return Err(ConfigError::TooSmall {
                field: "island edge",
                min: f64::EPSILON,
                value: self.island.shape.edge,
            });
        }
        in_range("island density", self.island.density, 0.0, 1.0)?;

        finite("height base", self.height.base)?;
        finite("height top", self.height.top)?;
        finite("height exponent", self.height.exponent)?;
        in_range("height base", self.height.base, 0.0, 255.0)?;
        in_range("height top", self.height.top, 0.0, 255.0)?;
        if self.height.exponent <= 0.0 {
            return Err(ConfigError::TooSmall {
                field: "height exponent",
                min: f64::EPSILON,
                value: self.height.exponent,
            });
        }

        finite("bottom add", self.bottom.add)?;
        if self.bottom.add < 0.0 {
            return Err(ConfigError::TooSmall {
                field: "bottom add",
                min: 0.0,
                value: self.bottom.add,
            });
        }
        if self.bottom.max_sweeps == 0 {
            return Err(ConfigError::TooSmall {
                field: "bottom max sweeps",
                min: 1.0,
                value: 0.0,
            });
        }

        finite("tree density", self.trees.density)?;

        if self.crystals.grass_radius < 2 {
            return Err(ConfigError::TooSmall {
                field: "crystal grass radius",
                min: 2.0,
                value: f64::from(self.crystals.grass_radius),
            });
        }
        finite("crystal slope", self.crystals.max_slope)?;
        finite("crystal start point distance", self.crystals.start_point_distance)?;

        Ok(())
    }

    /// Like [`validate`](Self::validate), and also checks that a crystal's
    /// grass disc fits a `size`-wide grid.
    pub fn validate_for_size(&self, size: usize) -> Result<(), ConfigError> {
        self.validate()?;
        let max_radius = size.saturating_sub(3) / 2;
        if self.crystals.grass_radius as usize > max_radius {
            return Err(ConfigError::OutOfRange {
                field: "crystal grass radius",
                min: 2.0,
                max: max_radius as f64,
                value: f64::from(self.crystals.grass_radius),
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(field))
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

fn validate_noise(field: &'static str, noise: &OctaveNoiseConfig) -> Result<(), ConfigError> {
    finite(field, noise.scale)?;
    finite(field, noise.octave_scale)?;
    finite(field, noise.persistence)?;
    if noise.octaves == 0 {
        return Err(ConfigError::TooSmall {
            field,
            min: 1.0,
            value: 0.0,
        });
    }
    Ok(())
}
