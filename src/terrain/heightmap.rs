//! Surface height generation using layered noise.

use rayon::prelude::*;

use super::config::HeightConfig;
use super::grid::TerrainGrid;
use crate::geometry::Falloff;
use crate::noise::OctaveNoise;

/// Splits a continuous height into the integer top and the sub-voxel fraction.
///
/// The fraction is the remainder quantized into the buckets 1, 2 and 3;
/// 0 is left for erosion to reach.
pub fn split_height(height: f64) -> (u8, u8) {
    let top = height as u8;
    let remainder = (height - f64::from(top)).clamp(0.0, 1.0);
    let fraction = ((remainder * 3.0) as u8 + 1).min(3);
    (top, fraction)
}

/// Continuous surface height for a normalized noise value.
pub fn surface_height(value: f64, config: &HeightConfig) -> f64 {
    let shaped = value.clamp(0.0, 1.0).powf(config.exponent);
    config.base + (config.top - config.base) * shaped
}

/// Generates top, fraction and initial bottom for every land cell.
///
/// Non-land cells keep their zeroed layers. The bottom starts at
/// `top - min_thickness`; the relaxation solver replaces it later.
pub fn generate_height_field(grid: &mut TerrainGrid, config: &HeightConfig, shape: &Falloff, min_thickness: u8) {
    let size = grid.size;
    let noise = OctaveNoise::new(&config.noise);

    let TerrainGrid {
        material,
        top,
        fraction,
        bottom,
        ..
    } = grid;

    material
        .par_chunks(size)
        .zip(top.par_chunks_mut(size))
        .zip(fraction.par_chunks_mut(size))
        .zip(bottom.par_chunks_mut(size))
        .enumerate()
        .for_each(|(y, (((materials, tops), fractions), bottoms))| {
            for x in 0..size {
                if !materials[x].is_land() {
                    continue;
                }

                let mut value = noise.sample_cell(x, y, size);
                if config.falloff {
                    value *= shape.at(x, y, size);
                }
                if config.invert {
                    value = 1.0 - value;
                }

                let (t, f) = split_height(surface_height(value, config));
                tops[x] = t;
                fractions[x] = f;
                bottoms[x] = t.saturating_sub(min_thickness);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::IslandConfig;
    use crate::terrain::grid::Material;
    use crate::terrain::island::generate_island_mask;

    fn island(size: usize, seed: u32) -> TerrainGrid {
        let mut grid = TerrainGrid::with_size(size);
        let config = IslandConfig {
            density: 1.0,
            ..IslandConfig::with_seed(seed)
        };
        generate_island_mask(&mut grid, &config);
        grid
    }

    #[test]
    fn test_split_height() {
        assert_eq!(split_height(128.0), (128, 1));
        assert_eq!(split_height(128.4), (128, 2));
        assert_eq!(split_height(128.7), (128, 3));
        assert_eq!(split_height(128.999), (128, 3));
    }

    #[test]
    fn test_split_height_saturates() {
        assert_eq!(split_height(300.0).0, 255);
        assert_eq!(split_height(300.0).1, 3);
        assert_eq!(split_height(-4.0), (0, 1));
    }

    #[test]
    fn test_surface_height_bounds() {
        let config = HeightConfig::default();
        assert_eq!(surface_height(0.0, &config), 128.0);
        assert_eq!(surface_height(1.0, &config), 192.0);
        assert!(surface_height(0.5, &config) < 160.0, "exponent should pull mid values down");
    }

    #[test]
    fn test_generate_height_field() {
        let mut grid = island(256, 5);
        let config = HeightConfig::with_seed(3);
        generate_height_field(&mut grid, &config, &Falloff::default(), 3);

        let mut land = 0;
        for i in 0..grid.cell_count() {
            if grid.material[i].is_land() {
                land += 1;
                assert!((128..=192).contains(&grid.top[i]), "top {} out of range", grid.top[i]);
                assert!((1..=3).contains(&grid.fraction[i]));
                assert_eq!(grid.bottom[i], grid.top[i] - 3);
            } else {
                assert_eq!((grid.top[i], grid.fraction[i], grid.bottom[i]), (0, 0, 0));
            }
        }
        assert!(land > 0);
    }

    #[test]
    fn test_thin_columns_floor_at_zero() {
        let mut grid = TerrainGrid::with_size(8);
        grid.set_column(4, 4, Material::Grass, 0, 0, 0);
        let config = HeightConfig {
            base: 1.0,
            top: 2.0,
            ..HeightConfig::with_seed(1)
        };
        generate_height_field(&mut grid, &config, &Falloff::default(), 3);

        assert!(grid.top(4, 4) >= 1);
        assert_eq!(grid.bottom(4, 4), 0);
    }

    #[test]
    fn test_invert_and_falloff() {
        let mut plain = island(128, 8);
        let mut shaped = plain.clone();

        let config = HeightConfig::with_seed(4);
        let shaped_config = HeightConfig {
            invert: true,
            falloff: true,
            ..config.clone()
        };
        generate_height_field(&mut plain, &config, &Falloff::default(), 3);
        generate_height_field(&mut shaped, &shaped_config, &Falloff::default(), 3);

        assert_eq!(plain.material, shaped.material);
        assert_ne!(plain.top, shaped.top);
    }
}
