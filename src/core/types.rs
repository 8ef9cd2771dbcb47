//! Core type definitions used throughout the codebase
//!
//! Every enum here is a closed domain: the selection screen can only offer
//! these values, and the rule set matches on them exhaustively.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Road surface of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Gravel,
    Asphalt,
    Snow,
}

/// Tire compounds mirror the surface domain one-to-one.
pub type TireType = Surface;

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Gravel, Surface::Asphalt, Surface::Snow];

    /// Loose surfaces punish cars that can't put power down on all four wheels
    pub fn is_loose(&self) -> bool {
        matches!(self, Self::Gravel | Self::Snow)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gravel => "gravel",
            Self::Asphalt => "asphalt",
            Self::Snow => "snow",
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which wheels are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Drivetrain {
    Fwd,
    Rwd,
    Awd,
}

impl Drivetrain {
    /// Base risk of losing the car on the given surface, independent of setup
    ///
    /// | drivetrain | gravel / snow | asphalt |
    /// |------------|---------------|---------|
    /// | FWD        | 0.10          | 0.0     |
    /// | RWD        | 0.15          | 0.0     |
    /// | AWD        | 0.0           | 0.0     |
    pub fn control_risk(&self, surface: Surface) -> f64 {
        if !surface.is_loose() {
            return 0.0;
        }
        match self {
            Self::Fwd => 0.1,
            Self::Rwd => 0.15,
            Self::Awd => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fwd => "FWD",
            Self::Rwd => "RWD",
            Self::Awd => "AWD",
        }
    }
}

impl std::fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Spring and damper stiffness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Suspension {
    Soft,
    Medium,
    Stiff,
}

impl Suspension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Medium => "medium",
            Self::Stiff => "stiff",
        }
    }
}

impl std::fmt::Display for Suspension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RideHeight {
    Low,
    Medium,
    High,
}

impl RideHeight {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RideHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Final drive ratio: short favours acceleration, long favours top speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gearing {
    Short,
    Medium,
    Long,
}

impl Gearing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for Gearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
