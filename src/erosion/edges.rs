//! Coastline rounding.
//!
//! Two passes peel the outermost land ring: the first lowers it by a whole
//! voxel, the second by one sub-voxel step, so the coast steps down
//! gradually.

use crate::geometry::neighbor_4;
use crate::terrain::{Material, TerrainGrid};

/// Cells changed by [`round_edges`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Cells lowered by a whole voxel in the first pass.
    pub lowered: usize,
    /// Cells lowered by one fraction step in the second pass.
    pub softened: usize,
}

/// True if `(x, y)` and all four of its neighbors are grass.
///
/// Neighbors outside the grid count as not grass.
pub fn is_interior(grid: &TerrainGrid, x: usize, y: usize) -> bool {
    grid.material(x, y) == Material::Grass
        && neighbor_4(grid.size, x, y)
            .iter()
            .all(|n| matches!(n, Some((nx, ny)) if grid.material(*nx, *ny) == Material::Grass))
}

/// Interior flags: a cell is interior iff it and its four neighbors are grass.
///
/// The grid border is never interior.
pub fn interior_mask(grid: &TerrainGrid) -> Vec<bool> {
    let size = grid.size;
    let mut interior = vec![false; grid.cell_count()];
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            interior[y * size + x] = is_interior(grid, x, y);
        }
    }
    interior
}

/// Applies `erode` to every grass cell that is not interior, skipping the border.
fn for_each_coast_cell(grid: &mut TerrainGrid, mut erode: impl FnMut(&mut TerrainGrid, usize)) -> usize {
    let size = grid.size;
    let interior = interior_mask(grid);
    let mut changed = 0;
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            let i = y * size + x;
            if grid.material[i] == Material::Grass && !interior[i] {
                grid.material[i] = Material::Dirt;
                erode(grid, i);
                changed += 1;
            }
        }
    }
    changed
}

/// First pass: coast cells turn to dirt and drop one voxel.
pub fn lower_coast(grid: &mut TerrainGrid, min_thickness: u8) -> usize {
    for_each_coast_cell(grid, |grid, i| {
        grid.top[i] = grid.top[i].saturating_sub(1);
        grid.bottom[i] = grid.top[i].saturating_sub(min_thickness);
    })
}

/// Second pass: coast cells turn to dirt and drop one fraction step,
/// borrowing a voxel when the fraction runs out.
pub fn soften_coast(grid: &mut TerrainGrid, min_thickness: u8) -> usize {
    for_each_coast_cell(grid, |grid, i| {
        grid.fraction[i] = grid.fraction[i].saturating_sub(1);
        if grid.fraction[i] == 0 {
            grid.fraction[i] = 3;
            grid.top[i] = grid.top[i].saturating_sub(1);
            grid.bottom[i] = grid.top[i].saturating_sub(min_thickness);
        }
    })
}

/// Runs both coast passes. The second pass sees the coast left by the first.
pub fn round_edges(grid: &mut TerrainGrid, min_thickness: u8) -> EdgeReport {
    let lowered = lower_coast(grid, min_thickness);
    let softened = soften_coast(grid, min_thickness);
    EdgeReport { lowered, softened }
}
