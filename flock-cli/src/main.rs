use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{build_simulation, load_script, load_settings, write_snapshot, Runner};
use flock_shared::FlockSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless k-nearest flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the initial flock, overrides the settings file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// JSON control script: [{"tick": 10, "command": {"action": "pause"}}, ...]
    #[arg(long)]
    script: Option<PathBuf>,

    /// Highlight this boid and its neighbours from the first frame
    #[arg(long)]
    select: Option<usize>,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// Log a progress line every N frames (0 disables)
    #[arg(long, default_value_t = 100)]
    log_every: u64,

    /// Write the final snapshot here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => FlockSettings::default(),
    };
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let (mut sim, seed) = build_simulation(&settings, args.seed)?;
    log::info!("Flock seeded with {}", seed);

    if args.select.is_some() {
        sim.select(args.select);
    }
    if args.paused {
        sim.pause();
    }

    let mut runner = Runner::new(sim, script, args.log_every);
    let snapshot = runner.run(args.ticks);

    write_snapshot(&snapshot, args.output.as_deref()).context("Flock run failed")?;
    log::info!("Finished at tick {}", snapshot.tick);

    Ok(())
}
