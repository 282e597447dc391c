//! Export module for writing a generated world to disk.
//!
//! Writes the binary tiles and placement files the game loads, plus
//! optional grayscale previews and an info file describing the run.

mod manifest;
mod placements;
mod raster;
mod tiles;

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::config::WorldConfig;
use crate::terrain::World;

pub use manifest::{manifest_args, manifest_text, write_manifest, MANIFEST_FILE};
pub use placements::{doodad_text, write_doodads, write_trees, DOODAD_FILE, TREE_FILE};
pub use raster::{write_layer, write_rasters, Layer, RasterFormat};
pub use tiles::{
    tile_file_name, tile_indices, tile_origin, write_tile, write_tiles, TileSummary, TILE_SIZE,
};

/// Errors that can occur while writing output files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Tiles need a {expected}x{expected} grid, got {actual}x{actual}")]
    GridSize { expected: usize, actual: usize },
}

/// Which optional outputs to write.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Preview raster format, if previews are wanted.
    pub raster: Option<RasterFormat>,
    /// Write the info file.
    pub manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            raster: None,
            manifest: true,
        }
    }
}

/// Files produced by [`export_world`].
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub tiles: TileSummary,
    pub trees: usize,
    pub crystals: usize,
    pub rasters: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Writes all outputs of `world` into `dir`, creating it if needed.
///
/// # Arguments
/// * `world` - The generated world
/// * `config` - The parameters the world was generated with
/// * `dir` - Output directory
/// * `options` - Optional outputs to include
pub fn export_world(
    world: &World,
    config: &WorldConfig,
    dir: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let tiles = write_tiles(&world.grid, dir)?;
    info!(
        "wrote {} tiles, removed {} stale",
        tiles.written.len(),
        tiles.removed.len()
    );

    write_trees(&world.trees, &dir.join(TREE_FILE))?;

    if world.start_point.is_none() {
        warn!("no start point; writing it as invalid");
    }
    write_doodads(world.start_point, &world.crystals, &dir.join(DOODAD_FILE))?;

    let rasters = match options.raster {
        Some(format) => write_rasters(&world.grid, dir, format)?,
        None => Vec::new(),
    };

    let manifest = if options.manifest {
        let path = dir.join(MANIFEST_FILE);
        write_manifest(config, world, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(ExportSummary {
        tiles,
        trees: world.trees.len(),
        crystals: world.crystals.len(),
        rasters,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::PackedPlacement;
    use crate::terrain::Material;
    use tempfile::tempdir;

    fn tiny_world() -> World {
        let mut world = World::new();
        for y in 300..320 {
            for x in 300..320 {
                world.grid.set_column(x, y, Material::Grass, 150, 1, 140);
            }
        }
        world.trees = vec![PackedPlacement::at_surface(305, 305, 150)];
        world.crystals = vec![PackedPlacement::at_surface(310, 310, 150)];
        world.start_point = Some(PackedPlacement::at_surface(312, 312, 150));
        world
    }

    #[test]
    fn test_export_world_creates_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("world");

        let summary = export_world(&tiny_world(), &WorldConfig::default(), &out, &ExportOptions::default())
            .unwrap();

        // (300..320, 300..320) lies in tile row 1, column 1.
        assert_eq!(summary.tiles.written, vec![9]);
        assert_eq!(summary.trees, 1);
        assert_eq!(summary.crystals, 1);
        assert!(summary.rasters.is_empty());
        assert!(out.join("Monde_9").exists());
        assert!(out.join(TREE_FILE).exists());
        assert!(out.join(DOODAD_FILE).exists());
        assert_eq!(summary.manifest, Some(out.join(MANIFEST_FILE)));
    }

    #[test]
    fn test_block_across_tile_corner_writes_four_tiles() {
        let mut world = World::new();
        for y in 500..520 {
            for x in 500..520 {
                world.grid.set_column(x, y, Material::Grass, 150, 1, 140);
            }
        }
        let dir = tempdir().unwrap();

        let summary = export_world(&world, &WorldConfig::default(), dir.path(), &ExportOptions::default())
            .unwrap();

        // 512 is a tile boundary on both axes.
        assert_eq!(summary.tiles.written, vec![9, 10, 17, 18]);
        assert!(summary.tiles.removed.is_empty());
    }

    #[test]
    fn test_export_world_with_rasters_without_manifest() {
        let dir = tempdir().unwrap();
        let options = ExportOptions {
            raster: Some(RasterFormat::Png),
            manifest: false,
        };

        let summary = export_world(&tiny_world(), &WorldConfig::default(), dir.path(), &options).unwrap();

        assert_eq!(summary.rasters.len(), 4);
        assert!(dir.path().join("mat.png").exists());
        assert!(summary.manifest.is_none());
        assert!(!dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_export_fails_when_output_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, b"x").unwrap();

        let err = export_world(&World::new(), &WorldConfig::default(), &blocker, &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::OutputDir { .. }));
    }
}
