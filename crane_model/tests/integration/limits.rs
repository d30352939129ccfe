//! Integration test: every axis stays within its stops for every formulation.

use crane_common::prelude::*;
use crane_model::{AxisStops, Model};
use proptest::prelude::*;

/// Frames each drive pattern is held for.
const FRAMES_PER_PATTERN: usize = 30;

fn within(state: &ModelState, config: &ModelConfig) -> bool {
    (config.rail_limit_min..=config.rail_limit_max).contains(&state.rail_offset)
        && (config.cart_limit_min..=config.cart_limit_max).contains(&state.cart_offset)
        && (config.line_limit_min..=config.line_limit_max).contains(&state.lift_line)
}

/// Valid configurations around the laboratory crane.
///
/// The payload never outweighs the cart, as on the real machine.
fn valid_config() -> impl Strategy<Value = ModelConfig> {
    (
        prop::sample::select(ModelType::ALL.to_vec()),
        (0.3f64..1.0, 1.0f64..2.5, 1.0f64..4.0),
        (-0.6f64..-0.1, 0.1f64..0.6, -0.6f64..-0.1, 0.1f64..0.6),
        (0.05f64..0.3, 0.4f64..1.2, 0.0f64..=1.0),
    )
        .prop_map(|(model_type, masses, travel, line)| {
            let (payload, cart, rail) = masses;
            let (rail_min, rail_max, cart_min, cart_max) = travel;
            let (line_min, line_max, start) = line;
            ModelConfig {
                model_type,
                payload_mass: kilograms(payload),
                cart_mass: kilograms(cart),
                rail_mass: kilograms(rail),
                rail_limit_min: rail_min,
                rail_limit_max: rail_max,
                cart_limit_min: cart_min,
                cart_limit_max: cart_max,
                line_limit_min: line_min,
                line_limit_max: line_max,
                initial_line_length: (line_min + start * (line_max - line_min)).min(line_max),
                ..ModelConfig::default()
            }
        })
}

/// Sequences of (rail, cart, wind) drive patterns [N].
fn drive_patterns() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((-120.0f64..120.0, -80.0f64..80.0, -25.0f64..25.0), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn positions_stay_within_limits_under_random_forces(
        config in valid_config(),
        patterns in drive_patterns(),
    ) {
        prop_assert!(config.validate().is_ok());
        let mut model = Model::new(config.clone()).unwrap();
        for (n, &(rail, cart, wind)) in patterns.iter().enumerate() {
            for frame in 0..FRAMES_PER_PATTERN {
                let state = model.update_fixed(0.01, 0.016, newtons(rail), newtons(cart), newtons(wind));
                prop_assert!(state.is_finite(), "pattern {} frame {}: {}", n, frame, state);
                prop_assert!(within(&state, &config), "pattern {} frame {}: {}", n, frame, state);
            }
        }
    }
}

#[test]
fn full_drive_reaches_every_stop() {
    let config = ModelConfig::with_type(ModelType::NonLinearComplete);
    let mut model = Model::new(config.clone()).unwrap();
    for _ in 0..300 {
        model.update_fixed(0.01, 0.01, newtons(150.0), newtons(80.0), newtons(30.0));
    }
    let state = model.state();
    assert_eq!(state.rail_offset, config.rail_limit_max);
    assert_eq!(state.cart_offset, config.cart_limit_max);
    assert_eq!(state.lift_line, config.line_limit_max);
    assert!(
        model
            .stops()
            .contains(AxisStops::RAIL_MAX | AxisStops::CART_MAX | AxisStops::LINE_MAX)
    );
}
