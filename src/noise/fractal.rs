//! Multi-octave simplex noise sampled on the terrain grid.

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Configuration for one layered noise field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctaveNoiseConfig {
    /// Random seed for reproducible generation.
    pub seed: u32,
    /// How many noise periods span the whole grid at unit frequency.
    pub scale: f64,
    /// Number of noise octaves.
    pub octaves: u8,
    /// Frequency of the first octave; each following octave doubles it.
    pub octave_scale: f64,
    /// Amplitude decay per octave.
    pub persistence: f64,
}

impl Default for OctaveNoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 8.0,
            octaves: 3,
            octave_scale: 0.5,
            persistence: 0.5,
        }
    }
}

impl OctaveNoiseConfig {
    /// Creates a configuration with default shape parameters and the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Coarse single-octave field used to spread trees in clumps.
    pub fn tree_cover(seed: u32) -> Self {
        Self {
            seed,
            scale: 32.0,
            octaves: 1,
            octave_scale: 0.5,
            persistence: 0.5,
        }
    }
}

/// Seeded sampler for an [`OctaveNoiseConfig`].
///
/// Sampling is a pure function of the seed and the coordinates, so the
/// sampler can be shared across rayon workers.
#[derive(Clone)]
pub struct OctaveNoise {
    simplex: Simplex,
    config: OctaveNoiseConfig,
}

impl OctaveNoise {
    pub fn new(config: &OctaveNoiseConfig) -> Self {
        Self {
            simplex: Simplex::new(config.seed),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &OctaveNoiseConfig {
        &self.config
    }

    /// Samples the layered noise at a point in noise space.
    ///
    /// # Returns
    /// A value in `[0, 1]`
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.config.octave_scale;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.config.octaves {
            total += self.simplex.get([x * frequency, y * frequency]) * amplitude;
            max_amplitude += amplitude;
            frequency *= 2.0;
            amplitude *= self.config.persistence;
        }

        if max_amplitude <= 0.0 {
            return 0.5;
        }

        ((total / max_amplitude) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Samples the noise for grid cell `(x, y)` of a `grid_size`-wide grid.
    ///
    /// The grid midpoint maps to the noise origin and the full grid width
    /// spans `scale` noise units.
    pub fn sample_cell(&self, x: usize, y: usize, grid_size: usize) -> f64 {
        let half = (grid_size / 2) as f64;
        let n = grid_size as f64;
        let nx = (x as f64 - half) * self.config.scale / n;
        let ny = (y as f64 - half) * self.config.scale / n;
        self.sample(nx, ny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OctaveNoiseConfig::default();
        assert_eq!(config.octaves, 3);
        assert_eq!(config.scale, 8.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_noise_reproducibility() {
        let a = OctaveNoise::new(&OctaveNoiseConfig::with_seed(12345));
        let b = OctaveNoise::new(&OctaveNoiseConfig::with_seed(12345));

        for (x, y) in [(0, 0), (511, 87), (1023, 1023), (300, 700)] {
            assert_eq!(
                a.sample_cell(x, y, 1024),
                b.sample_cell(x, y, 1024),
                "Same seed and cell should produce same result"
            );
        }
    }

    #[test]
    fn test_noise_range() {
        let noise = OctaveNoise::new(&OctaveNoiseConfig::with_seed(7));
        for y in (0..1024).step_by(37) {
            for x in (0..1024).step_by(41) {
                let v = noise.sample_cell(x, y, 1024);
                assert!((0.0..=1.0).contains(&v), "value {} at ({}, {}) out of range", v, x, y);
            }
        }
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = OctaveNoise::new(&OctaveNoiseConfig::with_seed(1));
        let b = OctaveNoise::new(&OctaveNoiseConfig::with_seed(2));

        let differs = (0..64).any(|i| a.sample_cell(i * 13, i * 7, 1024) != b.sample_cell(i * 13, i * 7, 1024));
        assert!(differs, "Different seeds should produce different fields");
    }

    #[test]
    fn test_field_has_variation() {
        let noise = OctaveNoise::new(&OctaveNoiseConfig::with_seed(5));
        let values: Vec<f64> = (0..256).map(|i| noise.sample_cell(i * 4, 512, 1024)).collect();
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        assert!(max - min > 0.1, "Noise should vary across a row, got [{}, {}]", min, max);
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let config = OctaveNoiseConfig {
            octaves: 0,
            ..OctaveNoiseConfig::with_seed(3)
        };
        let noise = OctaveNoise::new(&config);
        assert_eq!(noise.sample(0.3, 0.9), 0.5);
    }
}
