//! Domain entities describing one stage attempt
//!
//! `Stage`, `Car` and `Setup` are the three inputs of the simulation engine.
//! They are plain values: validated on construction and never mutated by the
//! engine.

pub mod car;
pub mod setup;
pub mod stage;

pub use car::Car;
pub use setup::Setup;
pub use stage::Stage;

/// Check that a value is a finite number within [0, 1]
pub(crate) fn unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Check that a value is a finite number greater than zero
pub(crate) fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
