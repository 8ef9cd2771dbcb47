//! Simulation engine
//!
//! Turns a stage, a car and a setup into a finished time or a DNF.
//!
//! 1. Evaluate every rule in `Rule::ALL` and sum penalty and risk
//! 2. Clamp risk to the configured maximum
//! 3. Add the jitter draw to the time penalty
//! 4. Decide the outcome: DNF if risk is strictly above the threshold,
//!    otherwise `base_time * (1 + penalty)`
//!
//! The engine holds no state between calls and can be shared across threads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::jitter::{JitterSource, NoJitter, RngJitter};
use super::result::{Outcome, SimulationResult};
use super::rules::{Assessment, Rule, RuleContext};
use crate::core::config::RuleSet;
use crate::core::types::{Drivetrain, Surface};
use crate::entity::{Car, Setup, Stage};

/// Reference car used for the optimal-time prediction
const REFERENCE_CAR_NAME: &str = "Optimal AWD";
const REFERENCE_POWER: f64 = 300.0;
const REFERENCE_WEIGHT: f64 = 1300.0;
const REFERENCE_RELIABILITY: f64 = 0.95;

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    rules: RuleSet,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(RuleSet::new())
    }
}

impl SimulationEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Stage time before any penalty
    pub fn base_time(&self, stage: &Stage) -> f64 {
        stage.length_km * 60.0 / (self.rules.timing.speed_offset + stage.speed)
    }

    /// Deterministic part of the evaluation: rules 1-8 with risk clamped
    pub fn assess(&self, stage: &Stage, car: &Car, setup: &Setup) -> Assessment {
        debug_assert!(stage.validate().is_ok(), "invalid stage: {:?}", stage);
        debug_assert!(car.validate().is_ok(), "invalid car: {:?}", car);

        let ctx = RuleContext::new(stage, car, setup, &self.rules);
        let mut acc = Assessment::new();
        for rule in Rule::ALL {
            let notes_before = acc.notes.len();
            rule.apply(&ctx, &mut acc);
            if acc.notes.len() > notes_before {
                tracing::debug!(
                    "Rule {} fired on {}: {:?}",
                    rule.name(),
                    stage.name,
                    &acc.notes[notes_before..]
                );
            }
        }
        acc.risk = acc.risk.min(self.rules.risk.max_risk);
        acc
    }

    /// Full evaluation with an explicit random source
    pub fn evaluate(
        &self,
        stage: &Stage,
        car: &Car,
        setup: &Setup,
        jitter: &mut dyn JitterSource,
    ) -> SimulationResult {
        let mut acc = self.assess(stage, car, setup);

        let draw = jitter.draw(self.rules.risk.jitter_max);
        acc.penalty += draw;
        if self.rules.risk.jitter_affects_risk {
            acc.risk = (acc.risk + draw).min(self.rules.risk.max_risk);
        }

        match Outcome::decide(acc.risk, self.rules.risk.dnf_threshold) {
            Outcome::Dnf => {
                tracing::debug!(
                    "{} in {}: DNF at risk {:.3}",
                    car.name,
                    stage.name,
                    acc.risk
                );
                SimulationResult::dnf(acc.risk, acc.notes)
            }
            Outcome::Finished => {
                let time = self.base_time(stage) * (1.0 + acc.penalty);
                tracing::debug!(
                    "{} in {}: finished in {:.2}s (penalty {:.3}, risk {:.3})",
                    car.name,
                    stage.name,
                    time,
                    acc.penalty,
                    acc.risk
                );
                SimulationResult::finished(time, acc.risk, acc.notes)
            }
        }
    }

    /// Stochastic attempt using the thread-local generator
    pub fn run(&self, stage: &Stage, car: &Car, setup: &Setup) -> SimulationResult {
        let mut jitter = RngJitter::new(rand::thread_rng());
        self.evaluate(stage, car, setup, &mut jitter)
    }

    /// Stochastic attempt that replays identically for the same seed
    pub fn run_seeded(&self, stage: &Stage, car: &Car, setup: &Setup, seed: u64) -> SimulationResult {
        let mut jitter = RngJitter::new(ChaCha8Rng::seed_from_u64(seed));
        self.evaluate(stage, car, setup, &mut jitter)
    }

    /// Best achievable time on `stage` with the reference car and setup,
    /// randomness disabled. `None` if even that combination would DNF.
    pub fn predict_optimal_time(&self, stage: &Stage) -> Option<f64> {
        let car = Self::reference_car();
        let setup = Self::reference_setup(stage);
        self.evaluate(stage, &car, &setup, &mut NoJitter).time_sec()
    }

    /// AWD, 300 HP, 1300 kg, 0.95 reliability
    pub fn reference_car() -> Car {
        Car {
            name: REFERENCE_CAR_NAME.to_string(),
            power: REFERENCE_POWER,
            weight: REFERENCE_WEIGHT,
            drivetrain: Drivetrain::Awd,
            reliability: REFERENCE_RELIABILITY,
        }
    }

    /// All-medium setup on the stage's own tires
    pub fn reference_setup(stage: &Stage) -> Setup {
        Setup::balanced(stage.surface)
    }

    /// Optimal time for each surface on an otherwise identical stage
    pub fn optimal_by_surface(&self, stage: &Stage) -> Vec<(Surface, Option<f64>)> {
        Surface::ALL
            .iter()
            .map(|&surface| {
                let variant = Stage {
                    surface,
                    ..stage.clone()
                };
                (surface, self.predict_optimal_time(&variant))
            })
            .collect()
    }
}
