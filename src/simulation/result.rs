//! Simulation output

use serde::{Deserialize, Serialize};

use super::notes;
use super::timing::round_to_hundredths;

/// Terminal state of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Finished,
    /// Did not finish
    Dnf,
}

/// Summing risk terms in `f64` leaves residue in the last bits
/// (0.2 + 0.25 + 0.2 + 0.15 + 0.05 is 0.8500000000000001), far below the
/// 2-decimal resolution of the rule weights.
const RISK_TOLERANCE: f64 = 1e-9;

impl Outcome {
    /// The only transition: risk strictly above the threshold is a DNF
    pub fn decide(risk: f64, dnf_threshold: f64) -> Self {
        if risk > dnf_threshold + RISK_TOLERANCE {
            Self::Dnf
        } else {
            Self::Finished
        }
    }
}

/// Snapshot of one engine evaluation
///
/// Exactly one of these holds: finished with a time, or DNF without one.
/// Risk and time are rounded to 2 decimals on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    finished: bool,
    time_sec: Option<f64>,
    risk: f64,
    notes: Vec<String>,
}

impl SimulationResult {
    pub fn finished(time_sec: f64, risk: f64, notes: Vec<String>) -> Self {
        Self {
            finished: true,
            time_sec: Some(round_to_hundredths(time_sec)),
            risk: round_to_hundredths(risk),
            notes,
        }
    }

    /// Appends the DNF note after the rule notes
    pub fn dnf(risk: f64, mut notes: Vec<String>) -> Self {
        notes.push(notes::DNF.to_string());
        Self {
            finished: false,
            time_sec: None,
            risk: round_to_hundredths(risk),
            notes,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn outcome(&self) -> Outcome {
        if self.finished {
            Outcome::Finished
        } else {
            Outcome::Dnf
        }
    }

    /// Elapsed time in seconds, `None` for a DNF
    pub fn time_sec(&self) -> Option<f64> {
        self.time_sec
    }

    pub fn risk(&self) -> f64 {
        self.risk
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}
