//! Named stage and car presets
//!
//! Presets are data, not behavior. The built-in catalog is embedded from
//! `data/catalog.toml`; a replacement file can be loaded at runtime.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{RallyError, Result};
use crate::entity::{Car, Stage};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub cars: Vec<Car>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate every entry
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(contents)?;
        for stage in &catalog.stages {
            stage.validate()?;
        }
        for car in &catalog.cars {
            car.validate()?;
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded catalog from {:?}: {} stages, {} cars",
            path,
            catalog.stages.len(),
            catalog.cars.len()
        );
        Ok(catalog)
    }

    /// Case-insensitive lookup by name
    pub fn stage(&self, name: &str) -> Result<&Stage> {
        self.stages
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RallyError::UnknownPreset(format!("stage '{}'", name)))
    }

    /// Case-insensitive lookup by name
    pub fn car(&self, name: &str) -> Result<&Car> {
        self.cars
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RallyError::UnknownPreset(format!("car '{}'", name)))
    }

    /// Lookup by 1-based list position or by name
    pub fn find_stage(&self, key: &str) -> Result<&Stage> {
        match key.trim().parse::<usize>() {
            Ok(n) => n
                .checked_sub(1)
                .and_then(|i| self.stages.get(i))
                .ok_or_else(|| RallyError::UnknownPreset(format!("stage #{}", n))),
            Err(_) => self.stage(key),
        }
    }

    /// Lookup by 1-based list position or by name
    pub fn find_car(&self, key: &str) -> Result<&Car> {
        match key.trim().parse::<usize>() {
            Ok(n) => n
                .checked_sub(1)
                .and_then(|i| self.cars.get(i))
                .ok_or_else(|| RallyError::UnknownPreset(format!("car #{}", n))),
            Err(_) => self.car(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Drivetrain, Surface};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("builtin catalog is valid");
        assert_eq!(catalog.stages.len(), 8);
        assert_eq!(catalog.cars.len(), 18);
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::builtin().unwrap();
        let stage = catalog.stage("rally sweden").unwrap();
        assert_eq!(stage.surface, Surface::Snow);
        let car = catalog.car("BMW E30").unwrap();
        assert_eq!(car.drivetrain, Drivetrain::Rwd);
        assert!(matches!(catalog.car("Trabant"), Err(RallyError::UnknownPreset(_))));
    }

    #[test]
    fn test_lookup_by_index() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.find_stage("1").unwrap().name, "Rally Finland");
        assert_eq!(catalog.find_car("18").unwrap().name, "Lancia 037");
        assert!(catalog.find_car("0").is_err());
        assert!(catalog.find_car("19").is_err());
        assert_eq!(catalog.find_stage("Monte Carlo").unwrap().length_km, 8.2);
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let toml = r#"
            [[cars]]
            name = "Ghost"
            power = 200.0
            weight = 0.0
            drivetrain = "fwd"
            reliability = 0.9
        "#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(RallyError::InvalidCar(_))
        ));
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let toml = r#"
            [[stages]]
            name = "Moon"
            length_km = 3.0
            surface = "regolith"
            roughness = 0.5
            speed = 0.5
        "#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(RallyError::TomlError(_))
        ));
    }
}
