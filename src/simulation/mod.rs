//! Stage attempt simulation
//!
//! A hand-tuned heuristic scorer, not a physical simulator: an ordered list
//! of independent rules adds time penalty and risk, one random draw perturbs
//! the time, and a single threshold separates a finish from a DNF.

pub mod engine;
pub mod jitter;
pub mod notes;
pub mod result;
pub mod rules;
pub mod timing;

pub use engine::SimulationEngine;
pub use jitter::{FixedJitter, JitterSource, NoJitter, RngJitter};
pub use result::{Outcome, SimulationResult};
pub use rules::{Assessment, Rule, RuleContext};
pub use timing::{format_time, round_to_hundredths};
