pub mod config;
pub mod error;
pub mod types;

pub use config::RuleSet;
pub use error::{RallyError, Result};
pub use types::{Drivetrain, Gearing, RideHeight, Surface, Suspension, TireType};
