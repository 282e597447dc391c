//! Islandgen CLI - Procedural floating-island generator.
//!
//! Generate a voxel-column island and write it out as game tiles,
//! placement files and optional preview images.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use islandgen::config::{Seeds, WorldConfig};
use islandgen::export::{export_world, ExportOptions, RasterFormat, TILE_SIZE};
use islandgen::pipeline::Pipeline;
use islandgen::terrain::{Material, World, GRID_SIZE};

/// Procedural floating-island generator.
#[derive(Parser)]
#[command(name = "islandgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new island.
    Generate(GenerateArgs),

    /// Display grid dimensions, memory use and output sizes.
    Info,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output directory, created if missing.
    #[arg(short, long)]
    output: PathBuf,

    /// Write preview images of the material, top, fraction and bottom layers.
    #[arg(long)]
    preview: Option<PreviewFormat>,

    /// Skip writing the info file.
    #[arg(long)]
    no_info: bool,

    /// Master seed for every seed not given explicitly.
    #[arg(short, long)]
    seed: Option<u64>,

    // Island outline
    /// Island noise seed.
    #[arg(long)]
    island_seed: Option<u32>,

    /// Island noise scale.
    #[arg(long, default_value = "8.0")]
    island_scale: f64,

    /// Island noise octaves.
    #[arg(long, default_value = "3")]
    island_octaves: u8,

    /// Frequency of the first island octave.
    #[arg(long, default_value = "0.5")]
    island_octave_scale: f64,

    /// Amplitude decay per island octave.
    #[arg(long, default_value = "0.5")]
    island_persistence: f64,

    /// Width of the falloff edge.
    #[arg(long, default_value = "0.25")]
    island_edge: f64,

    /// Island size; no land beyond this radius.
    #[arg(long, default_value = "0.65")]
    island_size: f64,

    /// Island density (0-1).
    #[arg(long, default_value = "0.5")]
    island_density: f64,

    // Terrain height
    /// Height noise seed.
    #[arg(long)]
    height_seed: Option<u32>,

    /// Height noise scale.
    #[arg(long, default_value = "8.0")]
    height_scale: f64,

    /// Height noise octaves.
    #[arg(long, default_value = "3")]
    height_octaves: u8,

    /// Frequency of the first height octave.
    #[arg(long, default_value = "0.5")]
    height_octave_scale: f64,

    /// Amplitude decay per height octave.
    #[arg(long, default_value = "0.5")]
    height_persistence: f64,

    /// Lowest surface height.
    #[arg(long, default_value = "128.0")]
    height_base: f64,

    /// Highest surface height.
    #[arg(long, default_value = "192.0")]
    height_top: f64,

    /// Exponent applied to the height noise.
    #[arg(long, default_value = "4.0")]
    height_exponent: f64,

    /// Invert the height noise.
    #[arg(long)]
    height_invert: bool,

    /// Multiply the height noise by the island falloff.
    #[arg(long)]
    height_falloff: bool,

    // Bottom
    /// Bottom relaxation seed.
    #[arg(long)]
    bottom_seed: Option<u32>,

    /// Random extra depth per relaxation step.
    #[arg(long, default_value = "1.0")]
    bottom_add: f64,

    /// Minimum column thickness.
    #[arg(long, default_value = "3")]
    bottom_min_thickness: u8,

    /// Upper bound on relaxation sweeps.
    #[arg(long, default_value = "16384")]
    bottom_max_sweeps: u32,

    // Trees
    /// Tree noise seed.
    #[arg(long)]
    tree_seed: Option<u32>,

    /// Tree noise scale.
    #[arg(long, default_value = "32.0")]
    tree_scale: f64,

    /// Tree noise octaves.
    #[arg(long, default_value = "1")]
    tree_octaves: u8,

    /// Frequency of the first tree octave.
    #[arg(long, default_value = "0.5")]
    tree_octave_scale: f64,

    /// Amplitude decay per tree octave.
    #[arg(long, default_value = "0.5")]
    tree_persistence: f64,

    /// Tree position seed.
    #[arg(long)]
    tree_position_seed: Option<u32>,

    /// Number of trees.
    #[arg(long, default_value = "1536")]
    tree_count: u32,

    /// Tree noise threshold (0-1).
    #[arg(long, default_value = "0.6")]
    tree_density: f64,

    /// Invert the tree noise.
    #[arg(long)]
    tree_invert: bool,

    /// Multiply the tree noise by the island falloff.
    #[arg(long)]
    tree_falloff: bool,

    // Crystals
    /// Crystal seed.
    #[arg(long)]
    crystal_seed: Option<u32>,

    /// Radius of grass required around a crystal.
    #[arg(long, default_value = "16")]
    crystal_radius: u32,

    /// Number of crystals.
    #[arg(long, default_value = "4")]
    crystal_count: u32,

    /// Minimum distance between crystals.
    #[arg(long, default_value = "128")]
    crystal_distance: u32,

    /// Maximum slope around a crystal.
    #[arg(long, default_value = "0.13")]
    crystal_slope: f64,

    /// Distance of the start point from the first crystal.
    #[arg(long, default_value = "8.0")]
    crystal_start_distance: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PreviewFormat {
    /// 8-bit binary PGM.
    Pgm,
    /// 8-bit grayscale PNG.
    Png,
}

impl From<PreviewFormat> for RasterFormat {
    fn from(format: PreviewFormat) -> Self {
        match format {
            PreviewFormat::Pgm => RasterFormat::Pgm,
            PreviewFormat::Png => RasterFormat::Png,
        }
    }
}

impl GenerateArgs {
    /// Fills in missing seeds from `fallback`.
    fn seeds(&self, fallback: Seeds) -> Seeds {
        Seeds {
            island: self.island_seed.unwrap_or(fallback.island),
            height: self.height_seed.unwrap_or(fallback.height),
            bottom: self.bottom_seed.unwrap_or(fallback.bottom),
            tree: self.tree_seed.unwrap_or(fallback.tree),
            tree_position: self.tree_position_seed.unwrap_or(fallback.tree_position),
            crystal: self.crystal_seed.unwrap_or(fallback.crystal),
        }
    }

    fn world_config(&self, seeds: Seeds) -> WorldConfig {
        let mut config = WorldConfig::with_seeds(seeds);

        let island = &mut config.island;
        island.noise.scale = self.island_scale;
        island.noise.octaves = self.island_octaves;
        island.noise.octave_scale = self.island_octave_scale;
        island.noise.persistence = self.island_persistence;
        island.shape.edge = self.island_edge;
        island.shape.size = self.island_size;
        island.density = self.island_density;

        let height = &mut config.height;
        height.noise.scale = self.height_scale;
        height.noise.octaves = self.height_octaves;
        height.noise.octave_scale = self.height_octave_scale;
        height.noise.persistence = self.height_persistence;
        height.base = self.height_base;
        height.top = self.height_top;
        height.exponent = self.height_exponent;
        height.invert = self.height_invert;
        height.falloff = self.height_falloff;

        let bottom = &mut config.bottom;
        bottom.add = self.bottom_add;
        bottom.min_thickness = self.bottom_min_thickness;
        bottom.max_sweeps = self.bottom_max_sweeps;

        let trees = &mut config.trees;
        trees.noise.scale = self.tree_scale;
        trees.noise.octaves = self.tree_octaves;
        trees.noise.octave_scale = self.tree_octave_scale;
        trees.noise.persistence = self.tree_persistence;
        trees.count = self.tree_count;
        trees.density = self.tree_density;
        trees.invert = self.tree_invert;
        trees.falloff = self.tree_falloff;

        let crystals = &mut config.crystals;
        crystals.grass_radius = self.crystal_radius;
        crystals.count = self.crystal_count;
        crystals.min_distance = self.crystal_distance;
        crystals.max_slope = self.crystal_slope;
        crystals.start_point_distance = self.crystal_start_distance;

        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info => run_info(),
    }
}

fn run_generate(args: GenerateArgs) {
    let fallback = match args.seed {
        Some(master) => Seeds::from_master(master),
        None => Seeds::from_clock(),
    };
    let seeds = args.seeds(fallback);
    let config = args.world_config(seeds);

    if let Err(e) = config.validate_for_size(GRID_SIZE) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("Islandgen - Floating Island Generator");
    println!("=====================================");
    println!("Grid: {}x{}", GRID_SIZE, GRID_SIZE);
    println!(
        "Seeds: island {} height {} bottom {} tree {} tree position {} crystal {}",
        seeds.island, seeds.height, seeds.bottom, seeds.tree, seeds.tree_position, seeds.crystal
    );
    println!("Output: {}", args.output.display());

    let start = Instant::now();

    println!("\nRunning generation pipeline...");
    let mut world = World::new();
    let pipeline = Pipeline::standard(config);

    pipeline
        .run_with_callbacks(
            &mut world,
            |name, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });

    println!("Generation completed in {:.2?}", start.elapsed());
    println!(
        "Land: {} grass, {} dirt",
        world.grid.count(Material::Grass),
        world.grid.count(Material::Dirt)
    );
    if let Some((low, high)) = world.grid.height_range() {
        println!("Surface height range: [{}, {}]", low, high);
    }
    if let Some(report) = world.tree_report {
        println!("Trees: {}/{}", report.placed, report.requested);
    }
    if let Some(report) = world.crystal_report {
        println!("Crystals: {}/{}", report.placed, report.requested);
    }
    match world.start_point {
        Some(p) => println!("Start point: ({}, {}) at height {}", p.x(), p.y(), p.height()),
        None => println!("Start point: none"),
    }

    println!("\nWriting files...");
    let export_start = Instant::now();
    let options = ExportOptions {
        raster: args.preview.map(RasterFormat::from),
        manifest: !args.no_info,
    };

    let summary = export_world(&world, pipeline.config(), &args.output, &options).unwrap_or_else(|e| {
        eprintln!("Error writing files: {}", e);
        std::process::exit(1);
    });

    println!(
        "  Tiles: {} written, {} stale removed",
        summary.tiles.written.len(),
        summary.tiles.removed.len()
    );
    println!("  Placements: {} trees, {} crystals", summary.trees, summary.crystals);
    if !summary.rasters.is_empty() {
        println!("  Previews: {} images", summary.rasters.len());
    }
    if let Some(path) = &summary.manifest {
        println!("  Info: {}", path.display());
    }

    println!("Export completed in {:.2?}", export_start.elapsed());
    println!("\nDone! Total time: {:.2?}", start.elapsed());
}

fn run_info() {
    let cells = (GRID_SIZE as u64) * (GRID_SIZE as u64);
    let layers = 4u64;
    let bytes_grid = cells * layers;
    let tiles = (GRID_SIZE / TILE_SIZE) as u64;
    let tile_count = tiles * tiles;
    let bytes_tile = 2 + (TILE_SIZE as u64) * (TILE_SIZE as u64) * 4;
    let config = WorldConfig::default();
    let bytes_trees = u64::from(config.trees.count) * 4;

    println!("Islandgen - Grid Configuration Info");
    println!("===================================");
    println!();
    println!("Grid: {}x{} cells", GRID_SIZE, GRID_SIZE);
    println!("Tiles: {} of {}x{} cells", tile_count, TILE_SIZE, TILE_SIZE);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Per layer:  {:>12} bytes ({:.2} MB)", cells, mb(cells));
    println!("  Layers:     {:>12}", layers);
    println!("  Total:      {:>12} bytes ({:.2} MB)", bytes_grid, mb(bytes_grid));
    println!();
    println!("Export file sizes:");
    println!("  Tile:       {:>12} bytes ({:.2} MB) - up to {} files", bytes_tile, mb(bytes_tile), tile_count);
    println!("  All tiles:  {:>12} bytes ({:.2} MB)", bytes_tile * tile_count, mb(bytes_tile * tile_count));
    println!("  Trees:      {:>12} bytes at the default {} trees", bytes_trees, config.trees.count);
    println!("  Preview:    {:>12} bytes per layer (PGM, plus header)", cells);
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
