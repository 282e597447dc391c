//! Procedural floating-island terrain generator.
//!
//! This crate turns a handful of seeds and shape parameters into a
//! 1024×1024 voxel-column island: a noise-shaped outline, a layered
//! surface, rounded coastlines, a relaxed underside, and placed trees,
//! crystals and a start point, ready to be written out as game tiles.

pub mod config;
pub mod erosion;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod pipeline;
pub mod placement;
pub mod terrain;

pub use config::{ConfigError, Seeds, WorldConfig};
pub use erosion::{BottomConfig, RelaxationReport};
pub use export::{export_world, ExportError, ExportOptions, RasterFormat};
pub use noise::OctaveNoiseConfig;
pub use pipeline::{GenerationStage, Pipeline, PipelineError};
pub use placement::{CrystalConfig, PackedPlacement, PlacementReport, TreeConfig};
pub use terrain::{HeightConfig, IslandConfig, Material, TerrainGrid, World, GRID_SIZE};
