//! Rally Sim - Entry Point
//!
//! Interactive selection screen: pick a stage and a car from the preset
//! catalog, tune the setup, then run the stage against the clock.

use clap::ValueEnum;
use rally_sim::analysis::{gap_to_optimal, simulate_batch};
use rally_sim::catalog::Catalog;
use rally_sim::core::error::Result;
use rally_sim::core::types::{Gearing, RideHeight, Suspension, TireType};
use rally_sim::entity::{Car, Setup, Stage};
use rally_sim::report;
use rally_sim::simulation::{format_time, SimulationEngine};

use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Current selections on the screen
struct Session {
    catalog: Catalog,
    engine: SimulationEngine,
    stage: Stage,
    car: Car,
    setup: Setup,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rally_sim=info")),
        )
        .init();

    tracing::info!("Rally Sim starting...");

    let catalog = Catalog::builtin()?;
    let (Some(stage), Some(car)) = (catalog.stages.first().cloned(), catalog.cars.first().cloned())
    else {
        tracing::error!("Preset catalog has no stages or no cars");
        return Ok(());
    };
    let setup = Setup::balanced(stage.surface);
    let mut session = Session {
        catalog,
        engine: SimulationEngine::default(),
        stage,
        car,
        setup,
    };

    println!("\n=== RALLY SETUP SIMULATION ===");
    println!();
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "stages" => {
                for (i, stage) in session.catalog.stages.iter().enumerate() {
                    println!("  {:>2}. {} ({}, {} km)", i + 1, stage.name, stage.surface, stage.length_km);
                }
            }
            "cars" => {
                for (i, car) in session.catalog.cars.iter().enumerate() {
                    println!("  {:>2}. {} ({}, {} HP)", i + 1, car.name, car.drivetrain, car.power);
                }
            }
            "stage" => match session.catalog.find_stage(arg) {
                Ok(stage) => {
                    session.stage = stage.clone();
                    println!("{}", report::describe_stage(&session.stage));
                    println!("{}", report::render_optimal(session.engine.predict_optimal_time(&session.stage)));
                }
                Err(e) => println!("{}", e),
            },
            "car" => match session.catalog.find_car(arg) {
                Ok(car) => {
                    session.car = car.clone();
                    println!("{}", report::describe_car(&session.car));
                }
                Err(e) => println!("{}", e),
            },
            "setup" => match apply_setup(&mut session.setup, arg) {
                Ok(()) => println!("Setup: {}", report::describe_setup(&session.setup)),
                Err(e) => println!("{}", e),
            },
            "show" | "s" => display_selection(&session),
            "run" | "r" => run_stage(&session),
            "batch" => match arg.parse::<u32>() {
                Ok(runs) if runs > 0 => run_batch(&session, runs),
                _ => println!("Usage: batch <number>"),
            },
            _ => println!("Unknown command. Type 'help' for the command list."),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  stages                  - List stage presets");
    println!("  cars                    - List car presets");
    println!("  stage <name|number>     - Select a stage");
    println!("  car <name|number>       - Select a car");
    println!("  setup <field> <value>   - Tune the setup (suspension, ride_height, gearing, tires)");
    println!("  show / s                - Show current selections and predicted optimal times");
    println!("  run / r                 - Run the stage");
    println!("  batch <n>               - Run the stage n times and summarize");
    println!("  quit / q                - Exit");
    println!();
}

/// Parse `<field> <value>` and update one setup field
fn apply_setup(setup: &mut Setup, arg: &str) -> std::result::Result<(), String> {
    let (field, value) = arg
        .split_once(' ')
        .map(|(f, v)| (f.trim(), v.trim()))
        .ok_or_else(|| "Usage: setup <field> <value>".to_string())?;

    match field {
        "suspension" => setup.suspension = Suspension::from_str(value, true)?,
        "ride_height" | "ride-height" | "height" => {
            setup.ride_height = RideHeight::from_str(value, true)?
        }
        "gearing" => setup.gearing = Gearing::from_str(value, true)?,
        "tires" | "tyres" | "tire_type" => setup.tire_type = TireType::from_str(value, true)?,
        _ => return Err(format!("Unknown setup field: {}", field)),
    }
    Ok(())
}

fn display_selection(session: &Session) {
    println!();
    println!("=== Stage ===");
    println!("{}", report::describe_stage(&session.stage));
    println!("=== Car ===");
    println!("{}", report::describe_car(&session.car));
    println!("=== Setup ===");
    println!("  {}", report::describe_setup(&session.setup));
    println!();
    println!("{}", report::render_optimal(session.engine.predict_optimal_time(&session.stage)));
    for (surface, optimal) in session.engine.optimal_by_surface(&session.stage) {
        match optimal {
            Some(time) => println!("  on {:<8} {}", surface.label(), format_time(time)),
            None => println!("  on {:<8} unavailable", surface.label()),
        }
    }
    println!();
}

fn run_stage(session: &Session) {
    let result = session
        .engine
        .run(&session.stage, &session.car, &session.setup);
    println!();
    print!("{}", report::render_result(&result));

    if let Some(optimal) = session.engine.predict_optimal_time(&session.stage) {
        if let Some(gap) = gap_to_optimal(&result, optimal) {
            println!("Gap to optimal: {:+.2}s", gap);
        }
    }
    println!();
}

fn run_batch(session: &Session, runs: u32) {
    let seed = rand::random();
    let summary = simulate_batch(
        &session.engine,
        &session.stage,
        &session.car,
        &session.setup,
        runs,
        seed,
    );
    println!();
    println!(
        "{} runs: {} finished, {} DNF ({:.0}% finish rate), mean risk {}",
        summary.runs,
        summary.finishes,
        summary.dnfs,
        summary.finish_rate * 100.0,
        summary.mean_risk
    );
    if let (Some(best), Some(mean), Some(worst)) =
        (summary.best_time, summary.mean_time, summary.worst_time)
    {
        println!(
            "  Best {} | Mean {} | Worst {}",
            format_time(best),
            format_time(mean),
            format_time(worst)
        );
    }
    println!();
}
