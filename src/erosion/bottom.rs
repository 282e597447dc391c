//! Relaxation of the island's underside.
//!
//! Every sweep lowers each column floor that sits at or above all of its
//! neighbors' floors to just below the highest of them, minus a random
//! extra depth. Columns whose thickness matches all four neighbors are
//! jittered down as well so flat regions do not stay flat. Sweeps repeat
//! until nothing changes.
//!
//! A floor of 0 is open below: such a neighbor never pulls a column down,
//! which anchors the coast and lets the underside hang from it. Cells outside
//! the grid behave like empty columns (top and bottom 0).

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config::BottomConfig;
use crate::geometry::neighbor_4;
use crate::terrain::TerrainGrid;

/// Outcome of [`relax_bottom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxationReport {
    /// Sweeps that lowered at least one column.
    pub sweeps: u32,
    /// False if `max_sweeps` was reached before a quiet sweep.
    pub converged: bool,
}

/// Highest floor a neighbor with floor `bottom` allows.
#[inline]
fn neighbor_ceiling(bottom: u8) -> u8 {
    bottom.checked_sub(1).unwrap_or(u8::MAX)
}

/// Lowers `base` by a draw from `[0, spread)`, rounding down.
#[inline]
fn lowered(base: u8, spread: f64, rng: &mut impl Rng) -> u8 {
    let depth = rng.random::<f64>() * spread;
    (f64::from(base) - depth).max(0.0) as u8
}

/// Runs one sweep, reading `grid.bottom` and writing every cell of `next`.
///
/// # Returns
/// The number of columns counted as changed
pub(crate) fn relaxation_sweep(grid: &TerrainGrid, next: &mut [u8], spread: f64, rng: &mut impl Rng) -> usize {
    let size = grid.size;
    debug_assert_eq!(next.len(), grid.cell_count());
    let mut changed = 0;

    for y in 0..size {
        for x in 0..size {
            let i = y * size + x;
            let current = grid.bottom[i];
            let neighbors = neighbor_4(size, x, y);

            let ceiling = neighbors
                .iter()
                .map(|n| n.map_or(u8::MAX, |(nx, ny)| neighbor_ceiling(grid.bottom(nx, ny))))
                .max()
                .unwrap_or(u8::MAX);

            if ceiling < current {
                next[i] = lowered(ceiling, spread, rng);
                changed += 1;
                continue;
            }

            next[i] = current;
            if current != 0 {
                let thickness = grid.thickness_at(i);
                let uniform = neighbors
                    .iter()
                    .all(|n| n.map_or(0, |(nx, ny)| grid.thickness_at(grid.index(nx, ny))) == thickness);
                if uniform {
                    next[i] = lowered(current, spread, rng);
                    changed += 1;
                }
            }
        }
    }

    changed
}

/// Relaxes the bottom layer until a sweep changes nothing.
///
/// Floors only ever move down, so the solver terminates; `max_sweeps` caps
/// the work anyway and is reported as non-convergence when hit.
pub fn relax_bottom(grid: &mut TerrainGrid, config: &BottomConfig) -> RelaxationReport {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.seed));
    let spread = 1.0 + config.add.max(0.0);
    let mut next = vec![0u8; grid.cell_count()];
    let mut sweeps = 0;

    loop {
        if sweeps >= config.max_sweeps {
            warn!(
                "bottom relaxation stopped after {} sweeps without converging",
                sweeps
            );
            return RelaxationReport {
                sweeps,
                converged: false,
            };
        }

        let changed = relaxation_sweep(grid, &mut next, spread, &mut rng);
        std::mem::swap(&mut grid.bottom, &mut next);
        if changed == 0 {
            return RelaxationReport {
                sweeps,
                converged: true,
            };
        }

        sweeps += 1;
        debug!("bottom sweep {}: {} columns changed", sweeps, changed);
    }
}
