#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod app;
mod narrative_log;
mod palette;

use anyhow::Context;
use bunny_sim::{Population, Random, Tile, TileGrid, INITIAL_POPULATION};
use clap::Parser;
use log::info;
use narrative_log::NarrativeLog;
use std::path::PathBuf;
use std::time::Duration;

const FLOOR_TILE: Tile = Tile::Floor;

/// Watch a warren of rabbits breed, sicken and starve, one turn at a time.
///
/// Keys: T next turn, Space toggle auto-run, R reset, C toggle console
/// narrative, Esc or Q quit.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Grid width in tiles
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Grid height in tiles
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Window pixels per tile
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    tile_size: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// File the narrative is written to
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// Echo the narrative to stdout from the start
    #[arg(long)]
    console: bool,

    /// Milliseconds between turns while auto-running
    #[arg(long, default_value_t = 400)]
    step_millis: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let narrative = NarrativeLog::create(&args.output, args.console)
        .with_context(|| format!("Cannot create narrative log {}", args.output.display()))?;
    let rand = args.seed.map_or_else(Random::new, Random::from_seed);
    let grid = TileGrid::new(args.width, args.height, args.tile_size, FLOOR_TILE);

    let mut population = Population::new(grid, FLOOR_TILE, narrative, rand);
    population.spawn(INITIAL_POPULATION);
    info!(
        "Started {}x{} warren, narrative in {}",
        args.width,
        args.height,
        args.output.display()
    );

    app::run(population, Duration::from_millis(args.step_millis))
}
