//! Binary terrain tiles consumed by the game.
//!
//! The 1024×1024 grid is cut into sixteen 256×256 tiles. Tile `i` covers
//! row `i / 8` and column `i % 8` of an 8-wide tile index space, so only
//! indices with `i % 8 <= 3` are used.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::ExportError;
use crate::terrain::{TerrainGrid, GRID_SIZE};

/// Edge length of one tile in cells.
pub const TILE_SIZE: usize = 256;

/// Tiles per row of the grid.
const TILES_PER_ROW: usize = GRID_SIZE / TILE_SIZE;

/// Width of the tile index space.
const INDEX_STRIDE: usize = 8;

/// Returns the tile indices in write order.
pub fn tile_indices() -> impl Iterator<Item = usize> {
    (0..TILES_PER_ROW).flat_map(|row| (0..TILES_PER_ROW).map(move |col| row * INDEX_STRIDE + col))
}

/// Returns the grid coordinates of the top-left cell of tile `index`.
pub fn tile_origin(index: usize) -> (usize, usize) {
    let row = index / INDEX_STRIDE;
    let col = index % INDEX_STRIDE;
    (col * TILE_SIZE, row * TILE_SIZE)
}

/// File name of tile `index`.
pub fn tile_file_name(index: usize) -> String {
    format!("Monde_{}", index)
}

/// Outcome of writing the tile set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSummary {
    /// Tiles written, in index order.
    pub written: Vec<usize>,
    /// Empty tiles whose stale file was deleted.
    pub removed: Vec<usize>,
}

/// Writes one tile: a two-byte zero header, then bottom, top, material
/// code and fraction for every cell in row-major order.
pub fn write_tile(grid: &TerrainGrid, index: usize, path: &Path) -> Result<(), ExportError> {
    let (x0, y0) = tile_origin(index);
    let mut writer = BufWriter::new(File::create(path)?);

    writer.write_all(&[0, 0])?;
    for y in y0..y0 + TILE_SIZE {
        for x in x0..x0 + TILE_SIZE {
            let i = grid.index(x, y);
            writer.write_all(&[
                grid.bottom[i],
                grid.top[i],
                grid.material[i].to_byte(),
                grid.fraction[i],
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes every non-empty tile into `dir`.
///
/// Tiles whose cells are all empty are not written, and a file left over
/// from an earlier run under the same name is removed.
pub fn write_tiles(grid: &TerrainGrid, dir: &Path) -> Result<TileSummary, ExportError> {
    if grid.size != GRID_SIZE {
        return Err(ExportError::GridSize {
            expected: GRID_SIZE,
            actual: grid.size,
        });
    }

    let mut summary = TileSummary::default();

    for index in tile_indices() {
        let path: PathBuf = dir.join(tile_file_name(index));
        let (x0, y0) = tile_origin(index);

        if grid.region_is_empty(x0, y0, TILE_SIZE, TILE_SIZE) {
            if path.exists() {
                fs::remove_file(&path)?;
                summary.removed.push(index);
            }
            debug!("tile {} is empty, skipped", index);
            continue;
        }

        write_tile(grid, index, &path)?;
        summary.written.push(index);
    }

    Ok(summary)
}
