//! Linearized crane.
//!
//! Rail, cart and winch are independent second-order systems with Coulomb
//! friction. The payload swing follows the small-angle pendulum driven by the
//! support acceleration:
//!
//! ```text
//! Δα̈ = −(g/R)·Δα − Ÿ/R − c·Δα̇
//! Δβ̈ = −(g/R)·Δβ − Ẍ/R − c·Δβ̇
//! ```

use crane_common::model::ModelConfig;
use crane_common::units::{Force, Mass};

use super::{AxisTerms, BasicRelations, CraneState, StepTerms, advance_angle, advance_axis};
use crate::friction::coulomb_friction;
use crate::limits::AxisStops;

/// Swing damping c [1/s].
pub const SWING_DAMPING: f64 = 0.05;

/// One decoupled axis: terms plus the values its velocity settling needs.
struct Axis {
    terms: AxisTerms,
    drive: Force,
    static_limit: Force,
}

fn axis(config: &ModelConfig, drive: Force, velocity: f64, mass: Mass, held: bool) -> Axis {
    let normal = mass * config.gravity;
    let friction = coulomb_friction(
        drive,
        velocity,
        normal,
        config.static_friction,
        config.kinetic_friction,
    );
    let terms = if held {
        AxisTerms::held(drive / mass)
    } else {
        AxisTerms::new(drive / mass, friction / mass)
    };
    Axis {
        terms,
        drive,
        static_limit: normal * config.static_friction,
    }
}

/// Advance `state` by `dt` with the linearized equations.
pub fn step(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    dt: f64,
) -> StepTerms {
    let g = config.gravity.value();
    let rail_held = relations.is_held(AxisStops::RAIL);
    let cart_held = relations.is_held(AxisStops::CART);
    let line_held = relations.is_held(AxisStops::LINE);

    // Each drive moves everything it carries.
    let rail = axis(
        config,
        relations.f_rail,
        state.x_vel,
        config.rail_mass + config.cart_mass + config.payload_mass,
        rail_held,
    );
    let cart = axis(
        config,
        relations.f_cart,
        state.y_vel,
        config.cart_mass + config.payload_mass,
        cart_held,
    );
    let wind = axis(config, relations.f_wind, state.r_vel, config.payload_mass, line_held);

    let x_acc = rail.terms.net.value();
    let y_acc = cart.terms.net.value();
    let r = state.r;
    let alfa_acc = -(g / r) * state.alfa - y_acc / r - SWING_DAMPING * state.alfa_vel;
    let beta_acc = -(g / r) * state.beta - x_acc / r - SWING_DAMPING * state.beta_vel;

    advance_axis(
        &mut state.x,
        &mut state.x_vel,
        rail.terms.net,
        rail_held,
        rail.drive,
        rail.static_limit,
        dt,
    );
    advance_axis(
        &mut state.y,
        &mut state.y_vel,
        cart.terms.net,
        cart_held,
        cart.drive,
        cart.static_limit,
        dt,
    );
    advance_axis(
        &mut state.r,
        &mut state.r_vel,
        wind.terms.net,
        line_held,
        wind.drive,
        wind.static_limit,
        dt,
    );
    advance_angle(&mut state.alfa, &mut state.alfa_vel, alfa_acc, dt);
    advance_angle(&mut state.beta, &mut state.beta_vel, beta_acc, dt);
    state.x_acc = x_acc;
    state.y_acc = y_acc;

    StepTerms {
        rail: rail.terms,
        cart: cart.terms,
        wind: wind.terms,
        tension: config.payload_mass * config.gravity,
    }
}
