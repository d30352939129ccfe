//! Integration test: single-axis component against its stops.

use crane_common::prelude::*;
use crane_model::Component;

const G: Accel = meters_per_sec_squared(9.81);

#[test]
fn component_at_upper_stop_stays_there() {
    let mut c = Component::new(1.0, 0.0, 1.0);
    c.coeff_static = 0.0;
    c.coeff_kinetic = 0.0;

    assert_eq!(c.clamp_force_by_pos_limits(newtons(10.0)), Force::ZERO);
    for _ in 0..100 {
        c.apply_force(newtons(10.0), G);
        c.update(c.net_acc, 0.01);
    }
    assert_eq!(c.pos, 1.0);
    assert_eq!(c.vel, 0.0);
}

#[test]
fn component_pushed_off_the_stop_moves_away() {
    let mut c = Component::new(1.0, 0.0, 1.0);
    c.apply_force(newtons(-20.0), G);
    c.update(c.net_acc, 0.01);
    assert!(c.pos < 1.0);
    assert!(c.vel < 0.0);
}

#[test]
fn component_slides_to_a_stop_under_friction() {
    let mut c = Component::new(0.5, 0.0, 1.0);
    c.vel = 0.5;
    let mut stopped_at = None;
    for i in 0..1000 {
        c.apply_force(Force::ZERO, G);
        let before = c.vel;
        c.update(c.net_acc, 0.01);
        // Kinetic friction only ever decelerates, and never past zero.
        assert!(c.vel <= before);
        assert!(c.vel >= 0.0, "step {i}: vel {}", c.vel);
        if c.vel == 0.0 && stopped_at.is_none() {
            stopped_at = Some(c.pos);
        }
    }
    // v²/2a = 0.25 / (2·0.7·9.81) ≈ 0.0182 m, and no creep afterwards.
    let stop = stopped_at.unwrap();
    assert!((stop - (0.5 + 0.25 / (2.0 * 0.7 * 9.81))).abs() < 1e-9, "stop {stop}");
    assert_eq!(c.vel, 0.0);
    assert_eq!(c.pos, stop);
}
