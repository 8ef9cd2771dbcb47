//! Plain-text rendering of presets and results for the terminal front ends

use crate::entity::{Car, Setup, Stage};
use crate::simulation::{format_time, Outcome, SimulationResult};

pub fn describe_stage(stage: &Stage) -> String {
    format!(
        "{}\n  Surface: {}\n  Length: {} km\n  Roughness: {}\n  Average speed: {}\n  Description: {}",
        stage.name, stage.surface, stage.length_km, stage.roughness, stage.speed, stage.description
    )
}

pub fn describe_car(car: &Car) -> String {
    format!(
        "{}\n  Power: {} HP\n  Weight: {} kg\n  Drivetrain: {}\n  Reliability: {}",
        car.name, car.power, car.weight, car.drivetrain, car.reliability
    )
}

pub fn describe_setup(setup: &Setup) -> String {
    format!(
        "suspension={} ride_height={} gearing={} tires={}",
        setup.suspension, setup.ride_height, setup.gearing, setup.tire_type
    )
}

/// Result banner, risk level and the analysis notes
pub fn render_result(result: &SimulationResult) -> String {
    let mut out = match (result.outcome(), result.time_sec()) {
        (Outcome::Finished, Some(time)) => format!("Stage completed in {}\n", format_time(time)),
        _ => "DNF - Stage not finished\n".to_string(),
    };
    out.push_str(&format!("Risk level: {}\n", result.risk()));
    if !result.notes().is_empty() {
        out.push_str("Analysis:\n");
        for note in result.notes() {
            out.push_str(&format!("  - {}\n", note));
        }
    }
    out
}

/// `None` renders as unavailable; the reference car never DNFs under the
/// canonical rules but a custom profile can make it
pub fn render_optimal(optimal: Option<f64>) -> String {
    match optimal {
        Some(time) => format!("Predicted optimal time: {}", format_time(time)),
        None => "Predicted optimal time: unavailable".to_string(),
    }
}
