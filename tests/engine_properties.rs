//! Property tests for the simulation engine

use proptest::prelude::*;
use rally_sim::core::types::{Drivetrain, Gearing, RideHeight, Surface, Suspension};
use rally_sim::entity::{Car, Setup, Stage};
use rally_sim::simulation::{FixedJitter, NoJitter, SimulationEngine};

fn surface() -> impl Strategy<Value = Surface> {
    prop_oneof![Just(Surface::Gravel), Just(Surface::Asphalt), Just(Surface::Snow)]
}

fn drivetrain() -> impl Strategy<Value = Drivetrain> {
    prop_oneof![Just(Drivetrain::Fwd), Just(Drivetrain::Rwd), Just(Drivetrain::Awd)]
}

fn suspension() -> impl Strategy<Value = Suspension> {
    prop_oneof![Just(Suspension::Soft), Just(Suspension::Medium), Just(Suspension::Stiff)]
}

fn ride_height() -> impl Strategy<Value = RideHeight> {
    prop_oneof![Just(RideHeight::Low), Just(RideHeight::Medium), Just(RideHeight::High)]
}

fn gearing() -> impl Strategy<Value = Gearing> {
    prop_oneof![Just(Gearing::Short), Just(Gearing::Medium), Just(Gearing::Long)]
}

fn stage() -> impl Strategy<Value = Stage> {
    (0.5f64..30.0, surface(), 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(length_km, surface, roughness, speed)| {
            Stage::new("Generated", length_km, surface, roughness, speed, "").unwrap()
        },
    )
}

fn car() -> impl Strategy<Value = Car> {
    (50.0f64..600.0, 600.0f64..2000.0, drivetrain(), 0.0f64..=1.0).prop_map(
        |(power, weight, drivetrain, reliability)| {
            Car::new("Generated", power, weight, drivetrain, reliability).unwrap()
        },
    )
}

fn setup() -> impl Strategy<Value = Setup> {
    (suspension(), ride_height(), gearing(), surface())
        .prop_map(|(s, r, g, t)| Setup::new(s, r, g, t))
}

fn is_two_decimals(value: f64) -> bool {
    ((value * 100.0).round() / 100.0 - value).abs() < 1e-12
}

proptest! {
    #[test]
    fn risk_is_bounded_and_rounded(stage in stage(), car in car(), setup in setup(), draw in 0.0f64..0.05) {
        let engine = SimulationEngine::default();
        let result = engine.evaluate(&stage, &car, &setup, &mut FixedJitter(draw));
        prop_assert!((0.0..=1.0).contains(&result.risk()));
        prop_assert!(is_two_decimals(result.risk()));
    }

    #[test]
    fn finished_iff_time_present(stage in stage(), car in car(), setup in setup()) {
        let engine = SimulationEngine::default();
        let result = engine.run(&stage, &car, &setup);
        prop_assert_eq!(result.is_finished(), result.time_sec().is_some());
        if let Some(time) = result.time_sec() {
            prop_assert!(time.is_finite());
            prop_assert!(is_two_decimals(time));
        }
    }

    #[test]
    fn no_jitter_is_deterministic(stage in stage(), car in car(), setup in setup()) {
        let engine = SimulationEngine::default();
        let a = engine.evaluate(&stage, &car, &setup, &mut NoJitter);
        let b = engine.evaluate(&stage, &car, &setup, &mut NoJitter);
        prop_assert_eq!(a, b);
        prop_assert_eq!(engine.assess(&stage, &car, &setup), engine.assess(&stage, &car, &setup));
    }

    #[test]
    fn rough_terrain_never_lowers_risk_with_stiff_suspension(
        stage in stage(),
        car in car(),
        setup in setup(),
        smooth in 0.0f64..=0.6,
        rough in 0.601f64..=1.0,
    ) {
        let engine = SimulationEngine::default();
        let setup = Setup { suspension: Suspension::Stiff, ..setup };
        let smooth_stage = Stage { roughness: smooth, ..stage.clone() };
        let rough_stage = Stage { roughness: rough, ..stage };
        let smooth_risk = engine.assess(&smooth_stage, &car, &setup).risk;
        let rough_risk = engine.assess(&rough_stage, &car, &setup).risk;
        prop_assert!(rough_risk >= smooth_risk);
    }

    #[test]
    fn reference_car_always_finishes(stage in stage()) {
        let engine = SimulationEngine::default();
        let optimal = engine.predict_optimal_time(&stage);
        prop_assert!(optimal.is_some());
        prop_assert!(optimal.unwrap() > 0.0);
    }
}
