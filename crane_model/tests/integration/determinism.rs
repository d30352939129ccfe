//! Integration test: identical inputs produce identical trajectories.

use crane_common::prelude::*;
use crane_model::Model;

/// Frame-sized slices with jitter, as a host render loop produces.
fn frames() -> impl Iterator<Item = (f64, f64, f64, f64)> {
    (0..400).map(|i| {
        let t = i as f64;
        let dt = 0.016 + 0.004 * (t * 0.7).sin();
        (dt, 40.0 * (t * 0.05).sin(), 30.0 * (t * 0.03).cos(), 12.0 * (t * 0.11).sin())
    })
}

fn trajectory(model_type: ModelType) -> Vec<ModelState> {
    let mut model = Model::new(ModelConfig::with_type(model_type)).unwrap();
    frames()
        .map(|(dt, rail, cart, wind)| {
            model.update_fixed(0.01, dt, newtons(rail), newtons(cart), newtons(wind))
        })
        .collect()
}

#[test]
fn runs_are_bit_identical() {
    for t in ModelType::ALL {
        let a = trajectory(t);
        let b = trajectory(t);
        assert_eq!(a, b, "{t}");
        assert!(a.iter().all(ModelState::is_finite), "{t}");
    }
}

#[test]
fn reset_replays_the_same_run() {
    let mut model = Model::new(ModelConfig::with_type(ModelType::NonLinearOriginal)).unwrap();
    let run = |model: &mut Model| -> Vec<ModelState> {
        frames()
            .map(|(dt, rail, cart, wind)| {
                model.update_fixed(0.01, dt, newtons(rail), newtons(cart), newtons(wind))
            })
            .collect()
    };
    let first = run(&mut model);
    model.reset();
    let second = run(&mut model);
    assert_eq!(first, second);
}
