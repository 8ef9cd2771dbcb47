//! Rule set configuration with documented constants
//!
//! All magic numbers of the scoring rules are collected here with
//! explanations of their purpose and how they interact with each other.
//! The defaults are the canonical rule list; alternate revisions of the
//! engine are expressed as named profiles loaded from TOML rather than as
//! forks of the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::error::{RallyError, Result};

/// Power-to-weight effects on time and risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRules {
    /// Power/weight ratio that neither gains nor loses time
    ///
    /// Cars above the baseline gain time, cars below lose it.
    pub baseline_ptw: f64,

    /// Scale of the power-to-weight time effect
    ///
    /// The effect is `-(ptw - baseline) * stage.speed * speed_weight`, so fast
    /// stages reward power more than twisty ones.
    pub speed_weight: f64,

    /// Magnitude of the time effect above which a note is emitted
    pub note_margin: f64,

    /// Power/weight ratio above which a car is hard to control anywhere
    pub ceiling_ptw: f64,
    pub ceiling_risk: f64,

    /// Power/weight ratio above which a car is hard to control on rough stages
    ///
    /// Deliberately lower than `ceiling_ptw`: the rough-terrain check fires on
    /// its own for cars that are merely strong.
    pub rough_ptw: f64,
    pub rough_risk: f64,
}

impl Default for PowerRules {
    fn default() -> Self {
        Self {
            baseline_ptw: 0.22,
            speed_weight: 0.6,
            note_margin: 0.03,
            ceiling_ptw: 0.30,
            ceiling_risk: 0.1,
            rough_ptw: 0.25,
            rough_risk: 0.05,
        }
    }
}

/// Suspension and ride height against stage roughness and speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainRules {
    /// Roughness above which a stage counts as rough terrain
    pub rough_threshold: f64,

    /// Stage speed above which a stage counts as high-speed
    pub fast_threshold: f64,

    /// Stage speed below which a stage counts as tight/slow
    pub slow_threshold: f64,

    pub stiff_rough_penalty: f64,
    pub stiff_rough_risk: f64,

    /// Soft suspension on a rough stage only hurts when it is also fast
    pub soft_fast_rough_penalty: f64,
    pub soft_fast_rough_risk: f64,

    /// Soft suspension on a smooth, fast stage wallows but stays on the road
    pub soft_fast_smooth_penalty: f64,

    pub low_ride_penalty: f64,
    pub low_ride_risk: f64,
    pub medium_ride_penalty: f64,
    pub medium_ride_risk: f64,
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            rough_threshold: 0.6,
            fast_threshold: 0.7,
            slow_threshold: 0.5,
            stiff_rough_penalty: 0.15,
            stiff_rough_risk: 0.2,
            soft_fast_rough_penalty: 0.1,
            soft_fast_rough_risk: 0.2,
            soft_fast_smooth_penalty: 0.1,
            low_ride_penalty: 0.2,
            low_ride_risk: 0.25,
            medium_ride_penalty: 0.05,
            medium_ride_risk: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireRules {
    pub mismatch_penalty: f64,
    pub mismatch_risk: f64,
}

impl Default for TireRules {
    fn default() -> Self {
        Self {
            mismatch_penalty: 0.15,
            mismatch_risk: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearingRules {
    /// Short gearing on a fast stage, or long gearing on a slow one
    pub mismatch_penalty: f64,
}

impl Default for GearingRules {
    fn default() -> Self {
        Self {
            mismatch_penalty: 0.08,
        }
    }
}

/// Risk aggregation and the finish/DNF decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRules {
    /// Weight of `(1 - reliability)` in the risk sum
    ///
    /// At 0.25 even a car with zero reliability only contributes a quarter
    /// of the way to certain failure; setup mistakes do the rest.
    pub reliability_weight: f64,

    /// Upper clamp applied once all risk terms are summed
    pub max_risk: f64,

    /// Aggregated risk strictly above this ends the attempt in a DNF
    pub dnf_threshold: f64,

    /// Exclusive upper bound of the random time-penalty jitter
    pub jitter_max: f64,

    /// Whether the jitter draw is also added to risk
    ///
    /// Off in the canonical rules. One revision of the engine perturbed
    /// risk as well; the `jittered_risk` profile turns this on.
    pub jitter_affects_risk: bool,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            reliability_weight: 0.25,
            max_risk: 1.0,
            dnf_threshold: 0.85,
            jitter_max: 0.05,
            jitter_affects_risk: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingRules {
    /// Offset added to stage speed in the base time denominator
    ///
    /// `base_time = length_km * 60 / (speed_offset + speed)`. Keeps the
    /// denominator positive for a stage with speed 0.
    pub speed_offset: f64,
}

impl Default for TimingRules {
    fn default() -> Self {
        Self { speed_offset: 0.6 }
    }
}

/// Complete rule set consumed by the simulation engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Profile name (set from the file name when loaded as a profile)
    pub name: String,
    pub power: PowerRules,
    pub terrain: TerrainRules,
    pub tires: TireRules,
    pub gearing: GearingRules,
    pub risk: RiskRules,
    pub timing: TimingRules,
}

impl RuleSet {
    /// Canonical rule set
    pub fn new() -> Self {
        Self {
            name: "canonical".to_string(),
            ..Self::default()
        }
    }

    /// Parse a possibly partial TOML document; anything missing keeps its
    /// canonical value
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let rules: RuleSet = toml::from_str(contents)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load a named profile from `data/rule_profiles/{name}.toml`
    pub fn load_profile(name: &str) -> Result<Self> {
        let path = profile_path(name);
        let contents = fs::read_to_string(&path)?;
        let mut rules = Self::from_toml_str(&contents)?;
        rules.name = name.to_string();
        tracing::info!("Loaded rule profile '{}' from {:?}", name, path);
        Ok(rules)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("power.speed_weight", self.power.speed_weight),
            ("power.note_margin", self.power.note_margin),
            ("power.ceiling_risk", self.power.ceiling_risk),
            ("power.rough_risk", self.power.rough_risk),
            ("terrain.stiff_rough_penalty", self.terrain.stiff_rough_penalty),
            ("terrain.stiff_rough_risk", self.terrain.stiff_rough_risk),
            ("terrain.soft_fast_rough_penalty", self.terrain.soft_fast_rough_penalty),
            ("terrain.soft_fast_rough_risk", self.terrain.soft_fast_rough_risk),
            ("terrain.soft_fast_smooth_penalty", self.terrain.soft_fast_smooth_penalty),
            ("terrain.low_ride_penalty", self.terrain.low_ride_penalty),
            ("terrain.low_ride_risk", self.terrain.low_ride_risk),
            ("terrain.medium_ride_penalty", self.terrain.medium_ride_penalty),
            ("terrain.medium_ride_risk", self.terrain.medium_ride_risk),
            ("tires.mismatch_penalty", self.tires.mismatch_penalty),
            ("tires.mismatch_risk", self.tires.mismatch_risk),
            ("gearing.mismatch_penalty", self.gearing.mismatch_penalty),
            ("risk.reliability_weight", self.risk.reliability_weight),
            ("risk.jitter_max", self.risk.jitter_max),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RallyError::InvalidRuleSet(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }

        let unit_thresholds = [
            ("terrain.rough_threshold", self.terrain.rough_threshold),
            ("terrain.fast_threshold", self.terrain.fast_threshold),
            ("terrain.slow_threshold", self.terrain.slow_threshold),
            ("risk.max_risk", self.risk.max_risk),
            ("risk.dnf_threshold", self.risk.dnf_threshold),
        ];
        for (field, value) in unit_thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(RallyError::InvalidRuleSet(format!(
                    "{} must be within [0, 1], got {}",
                    field, value
                )));
            }
        }

        // Gearing rules rely on a slow stage never also being a fast one
        if self.terrain.slow_threshold > self.terrain.fast_threshold {
            return Err(RallyError::InvalidRuleSet(format!(
                "terrain.slow_threshold ({}) should be <= terrain.fast_threshold ({})",
                self.terrain.slow_threshold, self.terrain.fast_threshold
            )));
        }

        if self.risk.dnf_threshold > self.risk.max_risk {
            return Err(RallyError::InvalidRuleSet(format!(
                "risk.dnf_threshold ({}) should be <= risk.max_risk ({})",
                self.risk.dnf_threshold, self.risk.max_risk
            )));
        }

        if !self.timing.speed_offset.is_finite() || self.timing.speed_offset <= 0.0 {
            return Err(RallyError::InvalidRuleSet(format!(
                "timing.speed_offset must be positive, got {}",
                self.timing.speed_offset
            )));
        }

        Ok(())
    }
}

/// Get path to a rule profile file
fn profile_path(name: &str) -> PathBuf {
    PathBuf::from("data/rule_profiles").join(format!("{}.toml", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_validate() {
        assert!(RuleSet::new().validate().is_ok());
        assert_eq!(RuleSet::new().name, "canonical");
    }

    #[test]
    fn test_canonical_values() {
        let rules = RuleSet::new();
        assert_eq!(rules.power.baseline_ptw, 0.22);
        assert_eq!(rules.terrain.rough_threshold, 0.6);
        assert_eq!(rules.risk.dnf_threshold, 0.85);
        assert_eq!(rules.risk.jitter_max, 0.05);
        assert!(!rules.risk.jitter_affects_risk);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules = RuleSet::from_toml_str(
            r#"
            [risk]
            dnf_threshold = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(rules.risk.dnf_threshold, 0.9);
        assert_eq!(rules.risk.reliability_weight, 0.25);
        assert_eq!(rules.tires, TireRules::default());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = RuleSet::from_toml_str("[tires]\nmismatch_penalty = -0.1\n").unwrap_err();
        assert!(matches!(err, RallyError::InvalidRuleSet(_)));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut rules = RuleSet::new();
        rules.risk.dnf_threshold = 0.95;
        rules.risk.max_risk = 0.9;
        assert!(rules.validate().is_err());

        let mut rules = RuleSet::new();
        rules.terrain.slow_threshold = 0.8;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = RuleSet::from_toml_str("[risk\n").unwrap_err();
        assert!(matches!(err, RallyError::TomlError(_)));
    }

    #[test]
    fn test_load_canonical_profile() {
        let rules = RuleSet::load_profile("canonical").expect("Should load canonical profile");
        assert_eq!(rules.name, "canonical");
        let mut expected = RuleSet::new();
        expected.name = rules.name.clone();
        assert_eq!(rules, expected);
    }

    #[test]
    fn test_load_jittered_risk_profile() {
        let rules = RuleSet::load_profile("jittered_risk").expect("Should load jittered profile");
        assert!(rules.risk.jitter_affects_risk);
    }

    #[test]
    fn test_missing_profile() {
        let err = RuleSet::load_profile("no_such_profile").unwrap_err();
        assert!(matches!(err, RallyError::IoError(_)));
    }
}
