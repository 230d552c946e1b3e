//! Cave Flyer entry point
//!
//! Runs the game headless, flown by the autopilot unless `--manual` is
//! given, and prints a JSON summary of the run.

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use cave_flyer::{Game, HeadlessPresenter, Settings};

#[derive(Debug, Parser)]
#[command(name = "cave-flyer", about = "Fly the cave headless and report how it went")]
struct Args {
    /// JSON settings file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks to run across all sessions
    #[arg(long, default_value_t = 3000)]
    ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Leave the controls alone (the vehicle just falls)
    #[arg(long)]
    manual: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    sessions: u32,
    crashes: u32,
    best_score: u32,
    final_score: Option<u32>,
    dropped_ticks: u64,
    elapsed_ms: u128,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    if args.print_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }
    if args.ticks == 0 {
        bail!("--ticks must be > 0");
    }

    let mut game = Game::new(settings, HeadlessPresenter::new()).context("invalid settings")?;
    log::info!("Cave Flyer (headless) running {} ticks", args.ticks);

    let interval = game.settings().tick_interval();
    let started = Instant::now();
    let mut last = started;
    while game.stats().ticks < args.ticks {
        if !args.manual {
            game.steer_with_autopilot();
        }
        if args.realtime {
            thread::sleep(interval);
            let now = Instant::now();
            game.advance(now - last);
            last = now;
        } else {
            game.advance(interval);
        }
    }

    let stats = game.stats();
    let summary = RunSummary {
        seed: game.seed(),
        ticks: stats.ticks,
        sessions: stats.sessions,
        crashes: stats.crashes,
        best_score: stats.best_score,
        final_score: game.score(),
        dropped_ticks: stats.dropped_ticks,
        elapsed_ms: started.elapsed().as_millis(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
