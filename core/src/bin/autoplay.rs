use anyhow::Context;
use clap::Parser;
use pairs_core::*;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Plays a full game with a perfect-memory player and prints how it went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON game config, defaults to a 6x6 grid
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up after this many frames
    #[arg(long, default_value_t = 100_000)]
    max_frames: u32,

    /// Simulated frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Print every engine event
    #[arg(long)]
    events: bool,
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json_str(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);

    let mut engine = PairsEngine::deal(config, RandomDealer::new(seed))?;
    let mut events = Vec::new();
    let report = RecallPlayer::new().play(
        &mut engine,
        Duration::from_millis(args.frame_ms),
        args.max_frames,
        &mut events,
    )?;

    if args.events {
        for event in &events {
            println!("{:?}", event);
        }
    }

    println!("seed: {}", seed);
    println!("grid: {}x{}", config.size.0, config.size.1);
    println!(
        "pairs: {}/{}",
        engine.matched_pairs(),
        engine.pair_count()
    );
    println!("clicks: {} ({} mismatched)", report.clicks, report.mismatches);
    println!(
        "time: {:.2}s over {} frames",
        report.elapsed.as_secs_f64(),
        report.frames
    );
    println!("{}", if report.won { "Got them all!" } else { "Gave up" });

    Ok(())
}
