//! Ordered scoring rules
//!
//! Each rule reads only the three immutable inputs and adds a time-penalty
//! delta, a risk delta and optionally a note. Contributions are additive, so
//! the order in `Rule::ALL` decides note order and nothing else.

use serde::{Deserialize, Serialize};

use super::notes;
use crate::core::config::RuleSet;
use crate::core::types::{Gearing, RideHeight, Suspension};
use crate::entity::{Car, Setup, Stage};

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub stage: &'a Stage,
    pub car: &'a Car,
    pub setup: &'a Setup,
    pub rules: &'a RuleSet,
    /// Power-to-weight of `car`, computed once per evaluation
    pub ptw: f64,
}

impl<'a> RuleContext<'a> {
    pub fn new(stage: &'a Stage, car: &'a Car, setup: &'a Setup, rules: &'a RuleSet) -> Self {
        Self {
            stage,
            car,
            setup,
            rules,
            ptw: car.power_to_weight(),
        }
    }

    fn is_rough(&self) -> bool {
        self.stage.is_rough(self.rules.terrain.rough_threshold)
    }

    fn is_fast(&self) -> bool {
        self.stage.speed > self.rules.terrain.fast_threshold
    }

    fn is_slow(&self) -> bool {
        self.stage.speed < self.rules.terrain.slow_threshold
    }
}

/// Running totals of the rule contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Fractional time penalty (0.1 = 10% slower than base time)
    pub penalty: f64,
    pub risk: f64,
    /// In firing order
    pub notes: Vec<String>,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, penalty: f64, risk: f64) {
        self.penalty += penalty;
        self.risk += risk;
    }

    pub fn note(&mut self, note: &str) {
        self.notes.push(note.to_string());
    }

    pub fn has_note(&self, note: &str) -> bool {
        self.notes.iter().any(|n| n == note)
    }
}

/// The canonical rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    PowerToWeight,
    SuspensionVsRoughness,
    RideHeightVsRoughness,
    TireMismatch,
    DrivetrainControl,
    GearingVsSpeed,
    ReliabilityFloor,
    PowerCeiling,
}

impl Rule {
    pub const ALL: [Rule; 8] = [
        Rule::PowerToWeight,
        Rule::SuspensionVsRoughness,
        Rule::RideHeightVsRoughness,
        Rule::TireMismatch,
        Rule::DrivetrainControl,
        Rule::GearingVsSpeed,
        Rule::ReliabilityFloor,
        Rule::PowerCeiling,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerToWeight => "power_to_weight",
            Self::SuspensionVsRoughness => "suspension_vs_roughness",
            Self::RideHeightVsRoughness => "ride_height_vs_roughness",
            Self::TireMismatch => "tire_mismatch",
            Self::DrivetrainControl => "drivetrain_control",
            Self::GearingVsSpeed => "gearing_vs_speed",
            Self::ReliabilityFloor => "reliability_floor",
            Self::PowerCeiling => "power_ceiling",
        }
    }

    /// Add this rule's contribution to `acc`
    pub fn apply(&self, ctx: &RuleContext<'_>, acc: &mut Assessment) {
        match self {
            Self::PowerToWeight => power_to_weight(ctx, acc),
            Self::SuspensionVsRoughness => suspension(ctx, acc),
            Self::RideHeightVsRoughness => ride_height(ctx, acc),
            Self::TireMismatch => tires(ctx, acc),
            Self::DrivetrainControl => {
                acc.add(0.0, ctx.car.control_risk(ctx.stage.surface));
            }
            Self::GearingVsSpeed => gearing(ctx, acc),
            Self::ReliabilityFloor => {
                let weight = ctx.rules.risk.reliability_weight;
                acc.add(0.0, (1.0 - ctx.car.reliability) * weight);
            }
            Self::PowerCeiling => power_ceiling(ctx, acc),
        }
    }
}

/// Time effect of power-to-weight relative to the baseline, scaled by how
/// much the stage rewards speed. Negative is a time gain.
fn power_to_weight(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    let power = &ctx.rules.power;
    let diff = ctx.ptw - power.baseline_ptw;
    let effect = -diff * ctx.stage.speed * power.speed_weight;
    acc.add(effect, 0.0);

    if effect < -power.note_margin {
        acc.note(notes::PTW_ADVANTAGE);
    } else if effect > power.note_margin {
        acc.note(notes::PTW_LACKING);
    }
}

fn suspension(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    let terrain = &ctx.rules.terrain;
    if ctx.is_rough() {
        match ctx.setup.suspension {
            Suspension::Stiff => {
                acc.add(terrain.stiff_rough_penalty, terrain.stiff_rough_risk);
                acc.note(notes::SUSPENSION_TOO_STIFF);
            }
            Suspension::Soft if ctx.is_fast() => {
                acc.add(terrain.soft_fast_rough_penalty, terrain.soft_fast_rough_risk);
                acc.note(notes::SUSPENSION_TOO_SOFT_ROUGH);
            }
            Suspension::Soft | Suspension::Medium => {}
        }
    } else if ctx.is_fast() && ctx.setup.suspension == Suspension::Soft {
        acc.add(terrain.soft_fast_smooth_penalty, 0.0);
        acc.note(notes::SUSPENSION_UNSTABLE);
    }
}

/// Only rough stages care about ride height
fn ride_height(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    if !ctx.is_rough() {
        return;
    }
    let terrain = &ctx.rules.terrain;
    match ctx.setup.ride_height {
        RideHeight::Low => {
            acc.add(terrain.low_ride_penalty, terrain.low_ride_risk);
            acc.note(notes::RIDE_HEIGHT_TOO_LOW);
        }
        RideHeight::Medium => acc.add(terrain.medium_ride_penalty, terrain.medium_ride_risk),
        RideHeight::High => {}
    }
}

fn tires(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    if ctx.setup.tire_type != ctx.stage.surface {
        acc.add(ctx.rules.tires.mismatch_penalty, ctx.rules.tires.mismatch_risk);
        acc.note(notes::WRONG_TIRES);
    }
}

fn gearing(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    let penalty = ctx.rules.gearing.mismatch_penalty;
    match ctx.setup.gearing {
        Gearing::Short if ctx.is_fast() => {
            acc.add(penalty, 0.0);
            acc.note(notes::SHORT_GEARING);
        }
        Gearing::Long if ctx.is_slow() => {
            acc.add(penalty, 0.0);
            acc.note(notes::LONG_GEARING);
        }
        _ => {}
    }
}

/// Two independent checks; the rough-terrain one has the lower threshold
fn power_ceiling(ctx: &RuleContext<'_>, acc: &mut Assessment) {
    let power = &ctx.rules.power;
    if ctx.ptw > power.ceiling_ptw {
        acc.add(0.0, power.ceiling_risk);
        acc.note(notes::TOO_POWERFUL);
    }
    if ctx.is_rough() && ctx.ptw > power.rough_ptw {
        acc.add(0.0, power.rough_risk);
        acc.note(notes::POWER_ON_ROUGH);
    }
}
