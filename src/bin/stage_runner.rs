//! Headless Stage Runner
//!
//! Runs one stage attempt (or a seeded batch) from command-line selections
//! and prints the result as JSON or text.

use clap::Parser;
use rally_sim::analysis::{gap_to_optimal, simulate_batch, BatchSummary};
use rally_sim::catalog::Catalog;
use rally_sim::core::config::RuleSet;
use rally_sim::core::error::Result;
use rally_sim::core::types::{Gearing, RideHeight, Suspension, TireType};
use rally_sim::entity::Setup;
use rally_sim::report;
use rally_sim::simulation::{SimulationEngine, SimulationResult};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Headless Stage Runner - simulate a rally stage attempt
#[derive(Parser, Debug)]
#[command(name = "stage_runner")]
#[command(about = "Simulate a rally stage attempt and print the result")]
struct Args {
    /// Stage preset name or list number
    #[arg(long, default_value = "Rally Finland")]
    stage: String,

    /// Car preset name or list number
    #[arg(long, default_value = "Subaru Impreza GC8")]
    car: String,

    #[arg(long, value_enum, default_value_t = Suspension::Medium)]
    suspension: Suspension,

    #[arg(long, value_enum, default_value_t = RideHeight::Medium)]
    ride_height: RideHeight,

    #[arg(long, value_enum, default_value_t = Gearing::Medium)]
    gearing: Gearing,

    /// Tire compound (defaults to the stage surface)
    #[arg(long, value_enum)]
    tires: Option<TireType>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of attempts; more than one prints a batch summary
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Rule profile name (loaded from data/rule_profiles/)
    #[arg(long)]
    profile: Option<String>,

    /// Preset catalog TOML file (defaults to the built-in presets)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output for a single attempt
#[derive(Serialize)]
struct AttemptReport<'a> {
    stage: &'a str,
    car: &'a str,
    setup: Setup,
    seed: u64,
    profile: &'a str,
    optimal_time_sec: Option<f64>,
    gap_to_optimal_sec: Option<f64>,
    result: &'a SimulationResult,
}

/// JSON output for a batch
#[derive(Serialize)]
struct BatchReport<'a> {
    stage: &'a str,
    car: &'a str,
    setup: Setup,
    seed: u64,
    profile: &'a str,
    optimal_time_sec: Option<f64>,
    summary: &'a BatchSummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rally_sim=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let rules = match &args.profile {
        Some(name) => RuleSet::load_profile(name)?,
        None => RuleSet::new(),
    };
    let engine = SimulationEngine::new(rules);

    let stage = catalog.find_stage(&args.stage)?;
    let car = catalog.find_car(&args.car)?;
    let setup = Setup::new(
        args.suspension,
        args.ride_height,
        args.gearing,
        args.tires.unwrap_or(stage.surface),
    );

    // Determine seed
    let seed = args.seed.unwrap_or_else(rand::random);
    let optimal = engine.predict_optimal_time(stage);
    let profile = engine.rules().name.as_str();
    let json = args.format != "text";

    if args.runs > 1 {
        let summary = simulate_batch(&engine, stage, car, &setup, args.runs, seed);
        if json {
            let out = BatchReport {
                stage: &stage.name,
                car: &car.name,
                setup,
                seed,
                profile,
                optimal_time_sec: optimal,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{} | {} | {}", stage.name, car.name, report::describe_setup(&setup));
            println!("{}", report::render_optimal(optimal));
            println!(
                "{} runs: {} finished, {} DNF, mean risk {}",
                summary.runs, summary.finishes, summary.dnfs, summary.mean_risk
            );
        }
        return Ok(());
    }

    let result = engine.run_seeded(stage, car, &setup, seed);
    if json {
        let out = AttemptReport {
            stage: &stage.name,
            car: &car.name,
            setup,
            seed,
            profile,
            optimal_time_sec: optimal,
            gap_to_optimal_sec: optimal.and_then(|o| gap_to_optimal(&result, o)),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} | {} | {}", stage.name, car.name, report::describe_setup(&setup));
        println!("{}", report::render_optimal(optimal));
        print!("{}", report::render_result(&result));
    }
    Ok(())
}
