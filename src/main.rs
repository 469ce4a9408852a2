//! # Hivegen Entry Point
//!
//! Runs one world generation into an in-memory store, then optionally writes
//! the store snapshot and prints the carved map.

use clap::Parser;
use hivegen::{
    GenerationConfig, HiveContent, HiveResult, MemoryStore, MonsterSpec, Tier,
    WorldGenerator,
};
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for the hive generator.
#[derive(Parser, Debug)]
#[command(name = "hivegen")]
#[command(about = "Carve a tunnel network and build a linked, monster-filled hive world")]
#[command(version)]
struct Args {
    /// Random seed for carving, content and encounters
    #[arg(short, long)]
    seed: Option<u64>,

    /// Side length of the square grid
    #[arg(short, long)]
    dimensions: Option<usize>,

    /// Number of tunnels to carve
    #[arg(long)]
    max_tunnels: Option<u32>,

    /// Maximum length of a single tunnel
    #[arg(long)]
    max_length: Option<u32>,

    /// JSON generation config; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON monster catalog (ten entries, weakest first)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Write the generated world snapshot to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the carved grid
    #[arg(long)]
    print_map: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Generation aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Merges the config file and flags into one configuration.
fn build_config(args: &Args) -> HiveResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dimensions) = args.dimensions {
        config.dimensions = dimensions;
    }
    if let Some(max_tunnels) = args.max_tunnels {
        config.max_tunnels = max_tunnels;
    }
    if let Some(max_length) = args.max_length {
        config.max_length = max_length;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> HiveResult<()> {
    info!("Starting Hivegen v{}", hivegen::VERSION);

    let config = build_config(args)?;
    let mut generator = WorldGenerator::new(config.clone());
    if let Some(path) = &args.catalog {
        generator = generator.with_catalog(MonsterSpec::load_catalog(path)?);
    }

    let mut store = MemoryStore::new();
    let mut content = HiveContent::new(config.seed);
    let summary = generator.generate(&mut store, &mut content)?;

    if args.print_map {
        print!("{}", summary.grid);
    }

    info!(
        "{} rooms, {} links, {} of {} tunnels hit the edge",
        summary.rooms, summary.links, summary.truncated_tunnels, summary.tunnels_carved
    );
    for tier in Tier::all() {
        info!("  {}: {} rooms", tier, summary.encounters.count(tier));
    }

    if let Some(path) = &args.output {
        store.save_to_path(path)?;
        info!("Saved world snapshot to {}", path.display());
    }

    Ok(())
}
