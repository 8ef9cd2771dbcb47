//! Explanatory notes attached to a result, in the wording shown to the player

pub const PTW_ADVANTAGE: &str = "Power-to-weight advantage";
pub const PTW_LACKING: &str = "Car lacks power for this stage";
pub const SUSPENSION_TOO_STIFF: &str = "Suspension too stiff for rough terrain";
pub const SUSPENSION_TOO_SOFT_ROUGH: &str = "Suspension too soft for high-speed rough stage";
pub const SUSPENSION_UNSTABLE: &str = "Suspension unstable at high speed";
pub const RIDE_HEIGHT_TOO_LOW: &str = "Ride height too low";
pub const WRONG_TIRES: &str = "Wrong tire choice";
pub const SHORT_GEARING: &str = "Short gearing slows down on high-speed stage";
pub const LONG_GEARING: &str = "Long gearing hurts acceleration on tight/slow stage";
pub const TOO_POWERFUL: &str = "Car is very powerful and hard to control";
pub const POWER_ON_ROUGH: &str = "High power on rough terrain increases risk";
pub const DNF: &str = "Crash / DNF due to reliability or setup";
