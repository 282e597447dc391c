//! Radial falloff that shapes generated features into an island.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Radial island shape, in units of half the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Falloff {
    /// Radius at which the falloff reaches zero.
    pub size: f64,
    /// Width of the band over which the falloff decays from 1 to 0.
    pub edge: f64,
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            size: 0.65,
            edge: 0.25,
        }
    }
}

impl Falloff {
    /// Normalized distance of cell `(x, y)` from the grid midpoint.
    ///
    /// The midpoint is 0, the middle of each grid edge is 1.
    pub fn radius(x: usize, y: usize, grid_size: usize) -> f64 {
        let half = (grid_size / 2) as f64;
        let offset = DVec2::new(x as f64 - half, y as f64 - half) / half;
        offset.length()
    }

    /// Falloff multiplier in `[0, 1]` at a normalized radius.
    pub fn at_radius(&self, r: f64) -> f64 {
        let f = ((self.size - self.edge) - r) / self.edge;
        (f.powi(3) + 1.0).clamp(0.0, 1.0)
    }

    /// Falloff multiplier for cell `(x, y)` of a `grid_size`-wide grid.
    pub fn at(&self, x: usize, y: usize, grid_size: usize) -> f64 {
        self.at_radius(Self::radius(x, y, grid_size))
    }
}
