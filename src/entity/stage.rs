//! Rally stage

use serde::{Deserialize, Serialize};

use super::{positive, unit_interval};
use crate::core::error::{RallyError, Result};
use crate::core::types::Surface;

/// A timed race segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub length_km: f64,
    pub surface: Surface,
    /// Road roughness (0.0 = billiard table, 1.0 = rock garden)
    pub roughness: f64,
    /// Average-speed factor (0.0 = hairpins, 1.0 = flat out)
    pub speed: f64,
    /// Display only
    #[serde(default)]
    pub description: String,
}

impl Stage {
    pub fn new(
        name: impl Into<String>,
        length_km: f64,
        surface: Surface,
        roughness: f64,
        speed: f64,
        description: impl Into<String>,
    ) -> Result<Self> {
        let stage = Self {
            name: name.into(),
            length_km,
            surface,
            roughness,
            speed,
            description: description.into(),
        };
        stage.validate()?;
        Ok(stage)
    }

    pub fn validate(&self) -> Result<()> {
        if !positive(self.length_km) {
            return Err(RallyError::InvalidStage(format!(
                "{}: length_km must be positive, got {}",
                self.name, self.length_km
            )));
        }
        if !unit_interval(self.roughness) {
            return Err(RallyError::InvalidStage(format!(
                "{}: roughness must be within [0, 1], got {}",
                self.name, self.roughness
            )));
        }
        if !unit_interval(self.speed) {
            return Err(RallyError::InvalidStage(format!(
                "{}: speed must be within [0, 1], got {}",
                self.name, self.speed
            )));
        }
        Ok(())
    }

    pub fn is_rough(&self, threshold: f64) -> bool {
        self.roughness > threshold
    }
}
