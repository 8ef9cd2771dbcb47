//! Rally car

use serde::{Deserialize, Serialize};

use super::{positive, unit_interval};
use crate::core::error::{RallyError, Result};
use crate::core::types::{Drivetrain, Surface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub name: String,
    /// Engine power (HP)
    pub power: f64,
    /// Mass (kg)
    pub weight: f64,
    pub drivetrain: Drivetrain,
    /// Higher = less failure-prone (0.0 to 1.0)
    pub reliability: f64,
}

impl Car {
    pub fn new(
        name: impl Into<String>,
        power: f64,
        weight: f64,
        drivetrain: Drivetrain,
        reliability: f64,
    ) -> Result<Self> {
        let car = Self {
            name: name.into(),
            power,
            weight,
            drivetrain,
            reliability,
        };
        car.validate()?;
        Ok(car)
    }

    pub fn validate(&self) -> Result<()> {
        if !positive(self.power) {
            return Err(RallyError::InvalidCar(format!(
                "{}: power must be positive, got {}",
                self.name, self.power
            )));
        }
        if !positive(self.weight) {
            return Err(RallyError::InvalidCar(format!(
                "{}: weight must be positive, got {}",
                self.name, self.weight
            )));
        }
        if !unit_interval(self.reliability) {
            return Err(RallyError::InvalidCar(format!(
                "{}: reliability must be within [0, 1], got {}",
                self.name, self.reliability
            )));
        }
        Ok(())
    }

    /// Recomputed on every call; never stored
    pub fn power_to_weight(&self) -> f64 {
        self.power / self.weight
    }

    /// Surface control risk for this car's drivetrain
    pub fn control_risk(&self, surface: Surface) -> f64 {
        self.drivetrain.control_risk(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_to_weight() {
        let car = Car::new("Audi Quattro S1", 450.0, 1350.0, Drivetrain::Awd, 0.9).unwrap();
        assert!((car.power_to_weight() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_control_risk_delegates_to_drivetrain() {
        let car = Car::new("BMW E30", 220.0, 1200.0, Drivetrain::Rwd, 0.85).unwrap();
        assert_eq!(car.control_risk(Surface::Snow), 0.15);
        assert_eq!(car.control_risk(Surface::Asphalt), 0.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Car::new("Ghost", 200.0, 0.0, Drivetrain::Fwd, 0.9).is_err());
        assert!(Car::new("Pushed", 0.0, 1000.0, Drivetrain::Fwd, 0.9).is_err());
        assert!(Car::new("Lemon", 200.0, 1000.0, Drivetrain::Fwd, 1.5).is_err());
        assert!(Car::new("Cursed", 200.0, 1000.0, Drivetrain::Fwd, -0.1).is_err());
    }
}
