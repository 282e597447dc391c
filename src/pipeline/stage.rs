//! Generation stage trait and pipeline orchestration.

use std::time::Instant;

use log::{info, warn};
use thiserror::Error;

use crate::config::{ConfigError, WorldConfig};
use crate::erosion::{relax_bottom, round_edges};
use crate::placement::{grow_crystals, plant_trees};
use crate::terrain::{generate_height_field, generate_island_mask, World};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Island outline from noise and falloff.
    Island,
    /// Surface height and fraction.
    Height,
    /// Coastline rounding.
    Edges,
    /// Underside relaxation.
    Bottom,
    /// Tree placement.
    Trees,
    /// Crystal placement and start point.
    Crystals,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Island => "island",
            StageId::Height => "height",
            StageId::Edges => "edges",
            StageId::Bottom => "bottom",
            StageId::Trees => "trees",
            StageId::Crystals => "crystals",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the world in place, building upon the fields
/// written by the stages it depends on.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the world in place.
    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError>;
}

/// Orchestrates generation stages into a complete pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: WorldConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Creates a pipeline with every stage in dependency order.
    pub fn standard(config: WorldConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(IslandStage)
            .add_stage(HeightStage)
            .add_stage(EdgeStage)
            .add_stage(BottomStage)
            .add_stage(TreeStage)
            .add_stage(CrystalStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Executes all stages in order on the given world.
    pub fn run(&self, world: &mut World) -> Result<(), PipelineError> {
        self.run_with_callbacks(world, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// The configuration is validated against the world's grid size before
    /// the first stage runs.
    ///
    /// # Arguments
    /// * `world` - The world to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        world: &mut World,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        self.config.validate_for_size(world.size())?;

        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            let start = Instant::now();
            stage.execute(world, &self.config)?;
            info!("{} finished in {:.2?}", stage.name(), start.elapsed());
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Island outline stage.
pub struct IslandStage;

impl GenerationStage for IslandStage {
    fn id(&self) -> StageId {
        StageId::Island
    }

    fn name(&self) -> &str {
        "Island Outline"
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let land = generate_island_mask(&mut world.grid, &config.island);
        info!("island outline: {} land cells", land);
        if land == 0 {
            warn!("island outline is empty; try a higher density or another seed");
        }
        Ok(())
    }
}

/// Surface height stage.
pub struct HeightStage;

impl GenerationStage for HeightStage {
    fn id(&self) -> StageId {
        StageId::Height
    }

    fn name(&self) -> &str {
        "Top Layer"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Island]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        generate_height_field(
            &mut world.grid,
            &config.height,
            &config.island.shape,
            config.bottom.min_thickness,
        );
        Ok(())
    }
}

/// Coastline rounding stage.
pub struct EdgeStage;

impl GenerationStage for EdgeStage {
    fn id(&self) -> StageId {
        StageId::Edges
    }

    fn name(&self) -> &str {
        "Edge Rounding"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Height]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let report = round_edges(&mut world.grid, config.bottom.min_thickness);
        info!(
            "edge rounding: {} cells lowered, {} cells softened",
            report.lowered, report.softened
        );
        Ok(())
    }
}

/// Underside relaxation stage.
pub struct BottomStage;

impl GenerationStage for BottomStage {
    fn id(&self) -> StageId {
        StageId::Bottom
    }

    fn name(&self) -> &str {
        "Bottom Relaxation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Edges]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let report = relax_bottom(&mut world.grid, &config.bottom);
        info!(
            "bottom relaxation: {} sweeps, converged: {}",
            report.sweeps, report.converged
        );
        world.relaxation = Some(report);
        Ok(())
    }
}

/// Tree placement stage.
pub struct TreeStage;

impl GenerationStage for TreeStage {
    fn id(&self) -> StageId {
        StageId::Trees
    }

    fn name(&self) -> &str {
        "Tree Planting"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Bottom]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let (trees, report) = plant_trees(&mut world.grid, &config.trees, &config.island.shape);
        world.trees = trees;
        world.tree_report = Some(report);
        Ok(())
    }
}

/// Crystal placement stage.
pub struct CrystalStage;

impl GenerationStage for CrystalStage {
    fn id(&self) -> StageId {
        StageId::Crystals
    }

    fn name(&self) -> &str {
        "Crystal Growth"
    }

    fn dependencies(&self) -> &[StageId] {
        // Trees turn their cells to dirt, which crystals must avoid.
        &[StageId::Trees]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let field = grow_crystals(&world.grid, &config.crystals)
            .map_err(|e| PipelineError::StageFailed(self.name().to_string(), e.to_string()))?;
        world.crystals = field.crystals;
        world.start_point = field.start_point;
        world.crystal_report = Some(field.report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seeds;
    use crate::terrain::{Material, TerrainGrid};

    fn small_world() -> World {
        World::with_grid(TerrainGrid::with_size(256))
    }

    fn small_config() -> WorldConfig {
        let mut config = WorldConfig::with_seeds(Seeds::from_master(5));
        config.island.density = 0.9;
        config.trees.count = 40;
        config.crystals.grass_radius = 4;
        config.crystals.min_distance = 32;
        config
    }

    #[test]
    fn test_stage_id_name() {
        assert_eq!(StageId::Island.name(), "island");
        assert_eq!(StageId::Crystals.name(), "crystals");
    }

    #[test]
    fn test_standard_pipeline_runs() {
        let pipeline = Pipeline::standard(small_config());
        assert_eq!(pipeline.stage_count(), 6);

        let mut world = small_world();
        pipeline.run(&mut world).unwrap();

        assert!(world.grid.land_count() > 0);
        assert!(world.relaxation.is_some_and(|r| r.converged));
        assert_eq!(world.tree_report.map(|r| r.placed as usize), Some(world.trees.len()));
        assert_eq!(world.crystal_report.map(|r| r.placed as usize), Some(world.crystals.len()));
        assert_eq!(world.start_point.is_some(), !world.crystals.is_empty());
    }

    #[test]
    fn test_missing_dependency() {
        let mut pipeline = Pipeline::new(small_config());
        pipeline.add_stage(IslandStage).add_stage(BottomStage);

        let mut world = small_world();
        let err = pipeline.run(&mut world).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDependency(ref stage, ref dep)
            if stage == "Bottom Relaxation" && dep == "edges"));
    }

    #[test]
    fn test_invalid_config_rejected_before_generation() {
        let mut config = small_config();
        config.island.density = -0.5;
        let pipeline = Pipeline::standard(config);

        let mut world = small_world();
        let err = pipeline.run(&mut world).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert_eq!(world.grid.land_count(), 0);
    }

    #[test]
    fn test_oversized_crystal_radius_rejected_before_generation() {
        let mut config = small_config();
        config.crystals.grass_radius = 200;
        let pipeline = Pipeline::standard(config);

        let mut world = small_world();
        let err = pipeline.run(&mut world).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert_eq!(world.grid.land_count(), 0);
    }

    #[test]
    fn test_crystal_stage_reports_placement_error() {
        let mut config = small_config();
        config.crystals.grass_radius = 200;

        let mut world = small_world();
        let err = CrystalStage.execute(&mut world, &config).unwrap_err();
        assert!(matches!(err, PipelineError::StageFailed(ref stage, _) if stage == "Crystal Growth"));
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let mut pipeline = Pipeline::new(small_config());
        pipeline.add_stage(IslandStage).add_stage(HeightStage);

        let mut world = small_world();
        let mut started = Vec::new();
        let mut completed = 0;

        pipeline
            .run_with_callbacks(
                &mut world,
                |name, _, total| {
                    assert_eq!(total, 2);
                    started.push(name.to_string());
                },
                |_, _, _| completed += 1,
            )
            .unwrap();

        assert_eq!(started, vec!["Island Outline", "Top Layer"]);
        assert_eq!(completed, 2);
    }

    #[test]
    fn test_trees_precede_crystals() {
        let pipeline = Pipeline::standard(small_config());
        let mut world = small_world();
        pipeline.run(&mut world).unwrap();

        for tree in &world.trees {
            assert_eq!(world.grid.material(tree.x() as usize, tree.y() as usize), Material::Dirt);
        }
        for crystal in &world.crystals {
            assert_eq!(world.grid.material(crystal.x() as usize, crystal.y() as usize), Material::Grass);
        }
    }
}
