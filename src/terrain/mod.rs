//! Terrain generation module.
//!
//! Provides the [`TerrainGrid`] and [`World`] data structures and the
//! noise-driven outline and surface height generators.

mod config;
mod grid;
mod heightmap;
mod island;

pub use config::{HeightConfig, IslandConfig};
pub use grid::{Material, TerrainGrid, World, GRID_SIZE};
pub use heightmap::{generate_height_field, split_height, surface_height};
pub use island::generate_island_mask;
