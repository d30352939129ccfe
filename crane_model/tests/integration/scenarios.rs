//! Integration test: reference scenarios of the crane.

use crane_common::prelude::*;
use crane_model::{AxisStops, Model};

const DT: f64 = 0.01;

#[test]
fn linear_rest_without_forces_does_not_drift() {
    let mut model = Model::new(ModelConfig::with_type(ModelType::Linear)).unwrap();
    let rest = model.state();
    let zero = Force::ZERO;
    let state = model.update_fixed(DT, DT, zero, zero, zero);
    assert_eq!(state, rest);
    assert_eq!(state.lift_line, 0.5);
    assert_eq!(state.payload_z, -0.5);
}

#[test]
fn every_formulation_rests_without_forces() {
    for t in ModelType::ALL {
        let mut model = Model::new(ModelConfig::with_type(t)).unwrap();
        let rest = model.state();
        for _ in 0..500 {
            model.update_fixed(DT, 0.016, Force::ZERO, Force::ZERO, Force::ZERO);
        }
        assert_eq!(model.state(), rest, "{t}");
    }
}

#[test]
fn complete_cart_runs_into_stop_and_stays() {
    let mut model = Model::new(ModelConfig::with_type(ModelType::NonLinearComplete)).unwrap();
    let mut prev = model.state().cart_offset;
    let mut clamped_at = None;

    for i in 0..100 {
        let state = model.update_fixed(DT, DT, Force::ZERO, newtons(50.0), Force::ZERO);
        match clamped_at {
            None => {
                assert!(state.cart_offset > prev, "tick {i}: {} <= {prev}", state.cart_offset);
                if state.cart_offset == 0.35 {
                    clamped_at = Some(i);
                }
            }
            Some(_) => assert_eq!(state.cart_offset, 0.35, "tick {i}"),
        }
        prev = state.cart_offset;
    }

    assert!(clamped_at.is_some(), "cart never reached the stop");
    assert!(model.stops().contains(AxisStops::CART_MAX));
}

#[test]
fn payload_swings_against_cart_acceleration() {
    for t in ModelType::ALL {
        let mut model = Model::new(ModelConfig::with_type(t)).unwrap();
        let mut state = model.state();
        for _ in 0..8 {
            state = model.update_fixed(DT, DT, Force::ZERO, newtons(40.0), Force::ZERO);
        }
        assert!(state.alfa < 0.0, "{t}: {}", state.alfa);
        assert!(state.payload_y < state.cart_offset, "{t}");
    }
}

#[test]
fn swing_decays_once_the_cart_stops() {
    let mut model = Model::new(ModelConfig::with_type(ModelType::NonLinearOriginal)).unwrap();
    for _ in 0..30 {
        model.update_fixed(DT, DT, Force::ZERO, newtons(40.0), Force::ZERO);
    }
    let mut early = 0.0_f64;
    let mut late = 0.0_f64;
    for i in 0..4000 {
        let state = model.update_fixed(DT, DT, Force::ZERO, Force::ZERO, Force::ZERO);
        if i < 300 {
            early = early.max(state.alfa.abs());
        } else if i >= 3700 {
            late = late.max(state.alfa.abs());
        }
    }
    assert!(late < early, "late {late} >= early {early}");
}
