//! Terrain grid and world data structures.

use serde::{Deserialize, Serialize};

use crate::erosion::RelaxationReport;
use crate::placement::{PackedPlacement, PlacementReport};

/// Width and height of a full world grid.
pub const GRID_SIZE: usize = 1024;

/// Surface material of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Ocean / void, no column.
    #[default]
    Empty,
    /// Untouched interior land.
    Grass,
    /// Eroded coast or a column occupied by a tree.
    Dirt,
}

impl Material {
    /// Byte code used by the tile files and previews.
    pub const fn to_byte(self) -> u8 {
        match self {
            Material::Empty => 0,
            Material::Grass => 2,
            Material::Dirt => 4,
        }
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Material::Empty),
            2 => Some(Material::Grass),
            4 => Some(Material::Dirt),
            _ => None,
        }
    }

    pub const fn is_land(self) -> bool {
        !matches!(self, Material::Empty)
    }
}

/// Column data for a square grid, stored as row-major layers.
///
/// `top`, `fraction` and `bottom` are meaningful only where the material is
/// not [`Material::Empty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainGrid {
    /// Width and height in cells.
    pub size: usize,
    pub material: Vec<Material>,
    /// Surface height.
    pub top: Vec<u8>,
    /// Sub-voxel part of the surface, in `0..=3`.
    pub fraction: Vec<u8>,
    /// Floor height; 0 means open below.
    pub bottom: Vec<u8>,
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainGrid {
    /// Creates an empty full-size grid.
    pub fn new() -> Self {
        Self::with_size(GRID_SIZE)
    }

    /// Creates an empty grid of `size × size` cells.
    ///
    /// Sizes above [`GRID_SIZE`] cannot be addressed by packed placements.
    pub fn with_size(size: usize) -> Self {
        assert!(size >= 3 && size <= GRID_SIZE, "grid size {} out of range", size);
        let cells = size * size;
        Self {
            size,
            material: vec![Material::Empty; cells],
            top: vec![0; cells],
            fraction: vec![0; cells],
            bottom: vec![0; cells],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y * self.size + x
    }

    #[inline]
    pub fn material(&self, x: usize, y: usize) -> Material {
        self.material[self.index(x, y)]
    }

    #[inline]
    pub fn top(&self, x: usize, y: usize) -> u8 {
        self.top[self.index(x, y)]
    }

    #[inline]
    pub fn fraction(&self, x: usize, y: usize) -> u8 {
        self.fraction[self.index(x, y)]
    }

    #[inline]
    pub fn bottom(&self, x: usize, y: usize) -> u8 {
        self.bottom[self.index(x, y)]
    }

    /// Sets every layer of one column.
    pub fn set_column(&mut self, x: usize, y: usize, material: Material, top: u8, fraction: u8, bottom: u8) {
        let i = self.index(x, y);
        self.material[i] = material;
        self.top[i] = top;
        self.fraction[i] = fraction;
        self.bottom[i] = bottom;
    }

    /// Column thickness `top - bottom`, signed so empty columns compare cleanly.
    #[inline]
    pub fn thickness_at(&self, i: usize) -> i16 {
        i16::from(self.top[i]) - i16::from(self.bottom[i])
    }

    /// Number of cells with the given material.
    pub fn count(&self, material: Material) -> usize {
        self.material.iter().filter(|&&m| m == material).count()
    }

    pub fn land_count(&self) -> usize {
        self.material.iter().filter(|m| m.is_land()).count()
    }

    /// Material layer as serialized byte codes.
    pub fn material_bytes(&self) -> Vec<u8> {
        self.material.iter().map(|m| m.to_byte()).collect()
    }

    /// Returns true if every cell in the `width × height` window at `(x0, y0)` is empty.
    pub fn region_is_empty(&self, x0: usize, y0: usize, width: usize, height: usize) -> bool {
        (y0..y0 + height).all(|y| {
            let row = self.index(x0, y);
            self.material[row..row + width].iter().all(|m| !m.is_land())
        })
    }

    /// Min and max top height over land cells, if there are any.
    pub fn height_range(&self) -> Option<(u8, u8)> {
        self.material
            .iter()
            .zip(&self.top)
            .filter(|(m, _)| m.is_land())
            .fold(None, |acc, (_, &h)| match acc {
                None => Some((h, h)),
                Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
            })
    }
}

/// A generated world: the terrain grid plus everything placed on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    pub grid: TerrainGrid,
    /// Tree placements (populated after the tree stage).
    pub trees: Vec<PackedPlacement>,
    /// Crystal placements (populated after the crystal stage).
    pub crystals: Vec<PackedPlacement>,
    /// Player start point; `None` until crystals exist.
    pub start_point: Option<PackedPlacement>,
    /// Outcome of the bottom relaxation (populated after the bottom stage).
    pub relaxation: Option<RelaxationReport>,
    pub tree_report: Option<PlacementReport>,
    pub crystal_report: Option<PlacementReport>,
}

impl World {
    /// Creates a world with an empty full-size grid.
    pub fn new() -> Self {
        Self::with_grid(TerrainGrid::new())
    }

    pub fn with_grid(grid: TerrainGrid) -> Self {
        Self {
            grid,
            trees: Vec::new(),
            crystals: Vec::new(),
            start_point: None,
            relaxation: None,
            tree_report: None,
            crystal_report: None,
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size
    }
}
