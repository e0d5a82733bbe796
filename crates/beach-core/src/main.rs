//! Octopus Beach
//!
//! Runs a beach from `beach.toml` and command line overrides, logging a
//! summary per day and optionally printing JSON snapshots to stdout.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use beach_core::{parse_coord, Beach, BeachConfig, BeachError, Coord, Driver, FireLog, Tier};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "beach")]
#[command(about = "Spreading activation across a beach of octopuses")]
struct Args {
    /// Configuration file (beach.toml is used when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Behaviour layers to enable
    #[arg(long, value_enum)]
    tier: Option<Tier>,

    /// Maximum ticks per day
    #[arg(long)]
    iterations: Option<u64>,

    /// Days to run, with a night in between
    #[arg(long)]
    days: Option<u32>,

    /// Cell triggered each morning as row,col (repeatable)
    #[arg(long = "trigger", value_parser = parse_trigger)]
    triggers: Vec<Coord>,

    /// Print a JSON snapshot after the trigger and after every tick
    #[arg(long)]
    snapshots: bool,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_trigger(input: &str) -> Result<Coord, String> {
    parse_coord(input).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(config: &mut BeachConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.beach.seed = seed;
    }
    if let Some(width) = args.width {
        config.beach.width = width;
    }
    if let Some(height) = args.height {
        config.beach.height = height;
    }
    if let Some(tier) = args.tier {
        config.beach.tier = tier;
    }
    if let Some(iterations) = args.iterations {
        config.run.iterations = iterations;
    }
    if let Some(days) = args.days {
        config.run.days = days;
    }
    if !args.triggers.is_empty() {
        config.run.trigger = args.triggers.iter().map(|&(row, col)| [row, col]).collect();
    }
    if args.snapshots {
        config.run.emit_snapshots = true;
    }
}

fn run(args: Args) -> Result<(), BeachError> {
    let mut config = match &args.config {
        Some(path) => BeachConfig::from_file(path)?,
        None => BeachConfig::load_or_default(),
    };
    apply_overrides(&mut config, &args);

    if args.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut beach = Beach::new(config.params())?;
    let plan = config.day_plan();

    // Watch the triggered cells so exhaustion shows up in the summary
    let log = FireLog::new();
    if beach.capabilities().listeners {
        beach.attach_listener(&plan.trigger, log.clone())?;
    }

    info!(
        width = config.beach.width,
        height = config.beach.height,
        tier = ?config.beach.tier,
        seed = config.beach.seed,
        days = plan.days,
        "beach ready"
    );

    let days = {
        let mut driver = Driver::new(&mut beach);
        if config.run.emit_snapshots {
            driver = driver.with_observer(|snapshot| match snapshot.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => error!("could not serialize snapshot: {}", e),
            });
        }
        driver.run_days(&plan)?
    };

    for (day, summary) in days.iter().enumerate() {
        info!(
            day = day + 1,
            ticks = summary.ticks_run,
            woken = summary.total_woken(),
            exhausted = summary.total_exhausted(),
            peak_awake = summary.peak_awake(),
            stopped_early = summary.stopped_early,
            "day summary"
        );
    }
    info!(
        listener_fires = log.total(),
        smell = beach.smell(),
        "simulation complete"
    );
    Ok(())
}
