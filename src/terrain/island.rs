//! Island outline from noise and radial falloff.

use rayon::prelude::*;

use super::config::IslandConfig;
use super::grid::{Material, TerrainGrid};
use crate::noise::OctaveNoise;

/// Marks land cells of the grid as [`Material::Grass`].
///
/// A cell becomes land when its noise value times the island falloff exceeds
/// `1 - density`. Cells that are not land are left untouched. Rows are
/// evaluated in parallel; every cell depends only on its coordinates.
///
/// # Returns
/// The number of land cells marked
pub fn generate_island_mask(grid: &mut TerrainGrid, config: &IslandConfig) -> usize {
    let size = grid.size;
    let noise = OctaveNoise::new(&config.noise);
    let threshold = config.threshold();
    let shape = config.shape;

    grid.material
        .par_chunks_mut(size)
        .enumerate()
        .map(|(y, row)| {
            let mut marked = 0;
            for (x, cell) in row.iter_mut().enumerate() {
                let falloff = shape.at(x, y, size);
                if falloff <= 0.0 {
                    continue;
                }
                if noise.sample_cell(x, y, size) * falloff > threshold {
                    *cell = Material::Grass;
                    marked += 1;
                }
            }
            marked
        })
        .sum()
}
