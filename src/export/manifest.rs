//! Info file recording how a world was generated.
//!
//! The parameter line uses the command-line flags of `islandgen generate`,
//! so pasting it back reproduces the run.

use std::path::Path;

use crate::config::WorldConfig;
use crate::noise::OctaveNoiseConfig;
use crate::terrain::World;

pub const MANIFEST_FILE: &str = "islandgen.info";

/// Command-line arguments reproducing `world`.
///
/// Tree and crystal counts are the realized ones, so a rerun with these
/// arguments asks for exactly what was placed.
pub fn manifest_args(config: &WorldConfig, world: &World) -> Vec<String> {
    let mut args = Vec::new();

    push_noise(&mut args, "island", &config.island.noise);
    push(&mut args, "island-edge", config.island.shape.edge);
    push(&mut args, "island-size", config.island.shape.size);
    push(&mut args, "island-density", config.island.density);

    push_noise(&mut args, "height", &config.height.noise);
    push(&mut args, "height-base", config.height.base);
    push(&mut args, "height-top", config.height.top);
    push(&mut args, "height-exponent", config.height.exponent);
    push_flag(&mut args, "height-invert", config.height.invert);
    push_flag(&mut args, "height-falloff", config.height.falloff);

    push(&mut args, "bottom-seed", config.bottom.seed);
    push(&mut args, "bottom-add", config.bottom.add);
    push(&mut args, "bottom-min-thickness", config.bottom.min_thickness);
    push(&mut args, "bottom-max-sweeps", config.bottom.max_sweeps);

    push_noise(&mut args, "tree", &config.trees.noise);
    push(&mut args, "tree-position-seed", config.trees.position_seed);
    push(&mut args, "tree-count", world.trees.len());
    push(&mut args, "tree-density", config.trees.density);
    push_flag(&mut args, "tree-invert", config.trees.invert);
    push_flag(&mut args, "tree-falloff", config.trees.falloff);

    push(&mut args, "crystal-seed", config.crystals.seed);
    push(&mut args, "crystal-radius", config.crystals.grass_radius);
    push(&mut args, "crystal-count", world.crystals.len());
    push(&mut args, "crystal-distance", config.crystals.min_distance);
    push(&mut args, "crystal-slope", config.crystals.max_slope);
    push(&mut args, "crystal-start-distance", config.crystals.start_point_distance);

    args
}

fn push(args: &mut Vec<String>, name: &str, value: impl std::fmt::Display) {
    args.push(format!("--{}", name));
    args.push(value.to_string());
}

fn push_flag(args: &mut Vec<String>, name: &str, set: bool) {
    if set {
        args.push(format!("--{}", name));
    }
}

fn push_noise(args: &mut Vec<String>, prefix: &str, noise: &OctaveNoiseConfig) {
    push(args, &format!("{}-seed", prefix), noise.seed);
    push(args, &format!("{}-scale", prefix), noise.scale);
    push(args, &format!("{}-octaves", prefix), noise.octaves);
    push(args, &format!("{}-octave-scale", prefix), noise.octave_scale);
    push(args, &format!("{}-persistence", prefix), noise.persistence);
}

/// Full text of the info file.
pub fn manifest_text(config: &WorldConfig, world: &World) -> String {
    format!(
        "Generated with islandgen {}\n\ngeneration parameters:\n{}\n",
        env!("CARGO_PKG_VERSION"),
        manifest_args(config, world).join(" ")
    )
}

pub fn write_manifest(config: &WorldConfig, world: &World, path: &Path) -> Result<(), std::io::Error> {
    std::fs::write(path, manifest_text(config, world))
}
