//! Pipeline module for orchestrating world generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that are composed into the complete island generation pipeline.

mod stage;

pub use stage::{
    BottomStage, CrystalStage, EdgeStage, GenerationStage, HeightStage, IslandStage, Pipeline,
    PipelineError, StageId, TreeStage,
};
