//! Headless runner: deals seeded rounds, lets the built-in policy play all
//! four seats and prints or writes the resulting trace.

use clap::Parser;
use daifugo_autoplay::{run_autoplay, write_json, write_text, AutoplayConfig};
use daifugo_core::SEATS;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "daifugo")]
#[command(about = "Plays seeded four-seat rounds and reports the outcome")]
struct Args {
    /// JSON file with an autoplay config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base shuffle seed; round i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to play
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Seat that receives the first dealt card
    #[arg(long)]
    deal_start: Option<usize>,

    /// Abandon a round after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Skip all pacing delays
    #[arg(long)]
    instant: bool,

    /// Keep every event in the report
    #[arg(long)]
    trace: bool,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the text report to a file instead of stdout
    #[arg(long)]
    text: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn autoplay_config(&self) -> Result<AutoplayConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => AutoplayConfig::load(path)?,
            None => AutoplayConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seat) = self.deal_start {
            if seat >= SEATS {
                return Err(format!("deal start seat {seat} is out of range").into());
            }
            config.deal_start = seat;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if self.instant {
            config.round.deal_delay_ticks = 0;
            config.round.turn_delay_ticks = 0;
        }
        config.round.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.autoplay_config()?;
    info!(seed = config.seed, rounds = config.rounds, "starting autoplay");
    let result = run_autoplay(&config, args.trace)?;

    if let Some(path) = &args.json {
        write_json(path, &result)?;
        println!("json: {}", path.display());
    }
    match &args.text {
        Some(path) => {
            write_text(path, &result)?;
            println!("text: {}", path.display());
        }
        None => println!("{}", result.to_text_report()),
    }
    Ok(())
}
