//! Per-attempt tuning choices

use serde::{Deserialize, Serialize};

use crate::core::types::{Gearing, RideHeight, Surface, Suspension, TireType};

/// Any combination is legal, including objectively poor ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setup {
    pub suspension: Suspension,
    pub ride_height: RideHeight,
    pub gearing: Gearing,
    pub tire_type: TireType,
}

impl Setup {
    pub fn new(
        suspension: Suspension,
        ride_height: RideHeight,
        gearing: Gearing,
        tire_type: TireType,
    ) -> Self {
        Self {
            suspension,
            ride_height,
            gearing,
            tire_type,
        }
    }

    /// All-medium setup on tires matching the surface
    pub fn balanced(surface: Surface) -> Self {
        Self::new(Suspension::Medium, RideHeight::Medium, Gearing::Medium, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_matches_surface() {
        for surface in Surface::ALL {
            let setup = Setup::balanced(surface);
            assert_eq!(setup.tire_type, surface);
            assert_eq!(setup.suspension, Suspension::Medium);
            assert_eq!(setup.ride_height, RideHeight::Medium);
            assert_eq!(setup.gearing, Gearing::Medium);
        }
    }
}
