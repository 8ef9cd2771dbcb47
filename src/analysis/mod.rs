//! Batch analysis of repeated attempts
//!
//! Runs many independent attempts of the same stage/car/setup in parallel.
//! Attempt `i` draws its jitter from `ChaCha8Rng` seeded with `seed + i`, so
//! a summary is reproducible for a given seed regardless of thread count.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::{Car, Setup, Stage};
use crate::simulation::{round_to_hundredths, RngJitter, SimulationEngine, SimulationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: u32,
    pub finishes: u32,
    pub dnfs: u32,
    /// Fraction of attempts that finished (0.0 to 1.0)
    pub finish_rate: f64,
    pub best_time: Option<f64>,
    pub mean_time: Option<f64>,
    pub worst_time: Option<f64>,
    pub mean_risk: f64,
}

/// Simulate `runs` attempts and summarize them
pub fn simulate_batch(
    engine: &SimulationEngine,
    stage: &Stage,
    car: &Car,
    setup: &Setup,
    runs: u32,
    seed: u64,
) -> BatchSummary {
    let results: Vec<SimulationResult> = (0..runs)
        .into_par_iter()
        .map(|i| {
            let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(i)));
            engine.evaluate(stage, car, setup, &mut RngJitter::new(rng))
        })
        .collect();

    let summary = summarize(&results);
    tracing::debug!(
        "Batch of {} on {} with {}: {} finished, {} DNF",
        runs,
        stage.name,
        car.name,
        summary.finishes,
        summary.dnfs
    );
    summary
}

/// Aggregate a set of results
pub fn summarize(results: &[SimulationResult]) -> BatchSummary {
    let runs = results.len() as u32;
    let times: Vec<f64> = results.iter().filter_map(|r| r.time_sec()).collect();
    let finishes = times.len() as u32;

    let best_time = times.iter().copied().reduce(f64::min);
    let worst_time = times.iter().copied().reduce(f64::max);
    let mean_time = if times.is_empty() {
        None
    } else {
        Some(round_to_hundredths(times.iter().sum::<f64>() / times.len() as f64))
    };

    let mean_risk = if results.is_empty() {
        0.0
    } else {
        round_to_hundredths(results.iter().map(|r| r.risk()).sum::<f64>() / runs as f64)
    };

    BatchSummary {
        runs,
        finishes,
        dnfs: runs - finishes,
        finish_rate: if runs > 0 {
            finishes as f64 / runs as f64
        } else {
            0.0
        },
        best_time,
        mean_time,
        worst_time,
        mean_risk,
    }
}

/// Seconds slower than the reference time; `None` for a DNF
pub fn gap_to_optimal(result: &SimulationResult, optimal: f64) -> Option<f64> {
    result
        .time_sec()
        .map(|time| round_to_hundredths(time - optimal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Drivetrain, Surface};

    fn finland() -> Stage {
        Stage::new("Rally Finland", 10.5, Surface::Gravel, 0.4, 0.9, "").unwrap()
    }

    fn yaris() -> Car {
        Car::new("Toyota Yaris GR", 261.0, 1280.0, Drivetrain::Awd, 0.9).unwrap()
    }

    #[test]
    fn test_batch_is_reproducible() {
        let engine = SimulationEngine::default();
        let setup = Setup::balanced(Surface::Gravel);
        let a = simulate_batch(&engine, &finland(), &yaris(), &setup, 64, 12345);
        let b = simulate_batch(&engine, &finland(), &yaris(), &setup, 64, 12345);
        assert_eq!(a, b);
        assert_eq!(a.runs, 64);
        assert_eq!(a.finishes, 64);
        assert_eq!(a.finish_rate, 1.0);
    }

    #[test]
    fn test_batch_times_ordered() {
        let engine = SimulationEngine::default();
        let setup = Setup::balanced(Surface::Gravel);
        let summary = simulate_batch(&engine, &finland(), &yaris(), &setup, 100, 7);
        let best = summary.best_time.unwrap();
        let mean = summary.mean_time.unwrap();
        let worst = summary.worst_time.unwrap();
        assert!(best <= mean && mean <= worst);
        // Jitter is below 5% of base time
        assert!(worst - best < 420.0 * 0.05);
    }

    #[test]
    fn test_summarize_empty_and_all_dnf() {
        let empty = summarize(&[]);
        assert_eq!(empty.runs, 0);
        assert_eq!(empty.finish_rate, 0.0);
        assert_eq!(empty.best_time, None);

        let dnfs = vec![SimulationResult::dnf(0.88, vec![]), SimulationResult::dnf(0.92, vec![])];
        let summary = summarize(&dnfs);
        assert_eq!(summary.dnfs, 2);
        assert_eq!(summary.mean_time, None);
        assert!((summary.mean_risk - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_gap_to_optimal() {
        let result = SimulationResult::finished(430.0, 0.1, vec![]);
        assert_eq!(gap_to_optimal(&result, 417.56), Some(12.44));
        let dnf = SimulationResult::dnf(0.9, vec![]);
        assert_eq!(gap_to_optimal(&dnf, 417.56), None);
    }
}
