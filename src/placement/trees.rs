//! Tree placement.

use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::TreeConfig;
use super::packed::PackedPlacement;
use super::{retry_budget, PlacementReport};
use crate::geometry::Falloff;
use crate::noise::OctaveNoise;
use crate::terrain::{Material, TerrainGrid};

/// Scatters trees over grass cells where the tree noise exceeds the density.
///
/// Each accepted cell turns to [`Material::Dirt`] so it cannot host a second
/// tree or a crystal. Gives up after [`retry_budget`] candidate draws and
/// reports the shortfall.
pub fn plant_trees(
    grid: &mut TerrainGrid,
    config: &TreeConfig,
    shape: &Falloff,
) -> (Vec<PackedPlacement>, PlacementReport) {
    let size = grid.size;
    let noise = OctaveNoise::new(&config.noise);
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.position_seed));
    let budget = retry_budget(size);
    let target = config.count as usize;

    let mut trees = Vec::with_capacity(target.min(grid.cell_count()));
    let mut attempts = 0u64;

    while trees.len() < target && attempts < budget {
        attempts += 1;
        let x = rng.random_range(0..size);
        let y = rng.random_range(0..size);
        let i = grid.index(x, y);

        if grid.material[i] != Material::Grass {
            continue;
        }

        let mut value = noise.sample_cell(x, y, size);
        if config.falloff {
            value *= shape.at(x, y, size);
        }
        if config.invert {
            value = 1.0 - value;
        }
        if value <= config.density {
            continue;
        }

        trees.push(PackedPlacement::at_surface(x, y, grid.top[i]));
        grid.material[i] = Material::Dirt;
    }

    let report = PlacementReport {
        requested: config.count,
        placed: trees.len() as u32,
        attempts,
    };
    if report.is_shortfall() {
        warn!("could only plant {} of {} trees", report.placed, report.requested);
    }

    (trees, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meadow(size: usize, top: u8) -> TerrainGrid {
        let mut grid = TerrainGrid::with_size(size);
        for y in 0..size {
            for x in 0..size {
                grid.set_column(x, y, Material::Grass, top, 2, top - 3);
            }
        }
        grid
    }

    fn everywhere(count: u32) -> TreeConfig {
        TreeConfig {
            count,
            density: -1.0,
            ..TreeConfig::with_seeds(1, 2)
        }
    }

    #[test]
    fn test_trees_turn_cells_to_dirt() {
        let mut grid = meadow(64, 150);
        let (trees, report) = plant_trees(&mut grid, &everywhere(50), &Falloff::default());

        assert_eq!(trees.len(), 50);
        assert!(!report.is_shortfall());
        assert_eq!(grid.count(Material::Dirt), 50);
        for tree in &trees {
            let (x, y) = (tree.x() as usize, tree.y() as usize);
            assert_eq!(grid.material(x, y), Material::Dirt);
            assert_eq!(tree.height(), 150);
        }
    }

    #[test]
    fn test_no_two_trees_share_a_cell() {
        let mut grid = meadow(16, 140);
        let (trees, _) = plant_trees(&mut grid, &everywhere(200), &Falloff::default());

        let mut cells: Vec<(u16, u16)> = trees.iter().map(|t| (t.x(), t.y())).collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), trees.len());
    }

    #[test]
    fn test_shortfall_reports_realized_count() {
        let mut grid = meadow(8, 140);
        let (trees, report) = plant_trees(&mut grid, &everywhere(100), &Falloff::default());

        assert!(trees.len() <= 64);
        assert_eq!(report.placed as usize, trees.len());
        assert_eq!(report.requested, 100);
        assert_eq!(grid.count(Material::Dirt), trees.len());
        assert!(report.is_shortfall());
        assert_eq!(report.attempts, retry_budget(8));
    }

    #[test]
    fn test_huge_target_is_a_shortfall() {
        let mut grid = meadow(8, 140);
        let (trees, report) = plant_trees(&mut grid, &everywhere(u32::MAX), &Falloff::default());

        assert!(trees.len() <= 64);
        assert_eq!(report.requested, u32::MAX);
        assert_eq!(report.placed as usize, trees.len());
        assert!(report.is_shortfall());
    }

    #[test]
    fn test_density_above_range_places_nothing() {
        let mut grid = meadow(32, 140);
        let config = TreeConfig {
            density: 1.0,
            ..TreeConfig::with_seeds(3, 4)
        };
        let (trees, report) = plant_trees(&mut grid, &config, &Falloff::default());

        assert!(trees.is_empty());
        assert_eq!(report.placed, 0);
        assert_eq!(grid.count(Material::Dirt), 0);
    }

    #[test]
    fn test_only_grass_hosts_trees() {
        let mut grid = TerrainGrid::with_size(32);
        grid.set_column(10, 10, Material::Grass, 150, 1, 147);
        grid.set_column(11, 10, Material::Dirt, 150, 1, 147);

        let (trees, _) = plant_trees(&mut grid, &everywhere(5), &Falloff::default());

        assert_eq!(trees.len(), 1);
        assert_eq!((trees[0].x(), trees[0].y()), (10, 10));
    }

    #[test]
    fn test_tree_reproducibility() {
        let config = TreeConfig {
            count: 30,
            density: 0.45,
            ..TreeConfig::with_seeds(8, 9)
        };
        let mut a = meadow(128, 160);
        let mut b = meadow(128, 160);

        let (ta, _) = plant_trees(&mut a, &config, &Falloff::default());
        let (tb, _) = plant_trees(&mut b, &config, &Falloff::default());

        assert_eq!(ta, tb);
        assert_eq!(a, b);
    }
}
