//! Dynamics formulations of the crane.
//!
//! Every formulation is a plain function over an explicit [`CraneState`]
//! record and the per-step [`BasicRelations`], so each can be stepped and
//! tested in isolation. [`step`] dispatches on [`ModelType`].
//!
//! ## Geometry
//!
//! ```text
//! PayloadX = X + R·cos α·sin β
//! PayloadY = Y + R·sin α
//! PayloadZ =   − R·cos α·cos β
//! ```
//!
//! α swings the payload toward the cart axis, β is the angle between −Z and
//! the lift-line projected onto the XZ plane. The payload hangs at rest for
//! α = β = 0.

pub mod linear;
pub mod nonlinear;

use crane_common::model::{ModelConfig, ModelState, ModelType};
use crane_common::units::{Accel, Force, Mass};

use crate::friction::settle_velocity;
use crate::integrate::{integrate_pos, integrate_semi_implicit, integrate_velocity};
use crate::limits::{AxisRange, AxisStops};

/// Mutable physical state of the crane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CraneState {
    /// Rail offset from the frame center [m].
    pub x: f64,
    /// Cart offset from the rail center [m].
    pub y: f64,
    /// Lift-line length [m].
    pub r: f64,
    /// α [rad].
    pub alfa: f64,
    /// β [rad].
    pub beta: f64,

    pub x_vel: f64,
    pub y_vel: f64,
    pub r_vel: f64,
    pub alfa_vel: f64,
    pub beta_vel: f64,

    /// Rail acceleration of the last sub-step, seen by the payload as support motion.
    pub x_acc: f64,
    /// Cart acceleration of the last sub-step.
    pub y_acc: f64,
}

impl CraneState {
    /// Payload hanging still under a centered cart.
    pub fn at_rest(line_length: f64) -> Self {
        Self {
            r: line_length,
            ..Self::default()
        }
    }

    /// Output snapshot with the derived payload coordinates.
    pub fn snapshot(&self) -> ModelState {
        let (sa, ca) = self.alfa.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        ModelState {
            alfa: self.alfa,
            beta: self.beta,
            rail_offset: self.x,
            cart_offset: self.y,
            lift_line: self.r,
            payload_x: self.x + self.r * ca * sb,
            payload_y: self.y + self.r * sa,
            payload_z: -self.r * ca * cb,
        }
    }
}

/// Quantities shared by every formulation, derived once per sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BasicRelations {
    /// Rail force after clamping against the rail stops.
    pub f_rail: Force,
    /// Cart force after clamping against the cart stops.
    pub f_cart: Force,
    /// Winding force after clamping against the line stops.
    pub f_wind: Force,
    /// Stops the drives are pressing into; these axes are held for the step.
    pub held: AxisStops,

    /// μ1 = Mpayload / Mcart
    pub mu1: f64,
    /// μ2 = Mpayload / (Mcart + Mrail)
    pub mu2: f64,
    /// Mass moved by the rail drive: Mcart + Mrail.
    pub rail_cart_mass: Mass,

    /// u1 = Fcart / Mcart
    pub u_cart: Accel,
    /// u2 = Frail / (Mcart + Mrail)
    pub u_rail: Accel,
    /// u3 = Fwind / Mpayload
    pub u_wind: Accel,
}

impl BasicRelations {
    /// Clamp the drive forces against the stops and derive the mass ratios.
    pub fn prepare(
        config: &ModelConfig,
        state: &CraneState,
        f_rail: Force,
        f_cart: Force,
        f_wind: Force,
    ) -> Self {
        let (f_rail, rail_stop) = AxisRange::rail(config).clamp_force(state.x, f_rail);
        let (f_cart, cart_stop) = AxisRange::cart(config).clamp_force(state.y, f_cart);
        let (f_wind, line_stop) = AxisRange::line(config).clamp_force(state.r, f_wind);

        let rail_cart_mass = config.cart_mass + config.rail_mass;
        Self {
            f_rail,
            f_cart,
            f_wind,
            held: rail_stop | cart_stop | line_stop,
            mu1: config.payload_mass / config.cart_mass,
            mu2: config.payload_mass / rail_cart_mass,
            rail_cart_mass,
            u_cart: f_cart / config.cart_mass,
            u_rail: f_rail / rail_cart_mass,
            u_wind: f_wind / config.payload_mass,
        }
    }

    /// True when any stop of `axis` is held this step.
    #[inline]
    pub fn is_held(&self, axis: AxisStops) -> bool {
        self.held.intersects(axis)
    }
}

/// Driving, friction and net acceleration of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisTerms {
    pub drive: Accel,
    pub friction: Accel,
    pub net: Accel,
}

impl AxisTerms {
    pub fn new(drive: Accel, friction: Accel) -> Self {
        Self {
            drive,
            friction,
            net: drive + friction,
        }
    }

    /// Terms of an axis held against a stop.
    pub fn held(drive: Accel) -> Self {
        Self {
            drive,
            friction: -drive,
            net: Accel::ZERO,
        }
    }
}

/// Per-axis terms of the last sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepTerms {
    pub rail: AxisTerms,
    pub cart: AxisTerms,
    pub wind: AxisTerms,
    /// Lift-line tension acting on the carts [N].
    pub tension: Force,
}

// ─── Integration helpers ────────────────────────────────────────────

/// Advance one translational axis by `dt`.
///
/// A held axis keeps its position with zero velocity. Otherwise a velocity
/// reversal that `drive` alone could not cause sticks the axis.
pub(crate) fn advance_axis(
    pos: &mut f64,
    vel: &mut f64,
    net: Accel,
    held: bool,
    drive: Force,
    static_limit: Force,
    dt: f64,
) {
    if held {
        *vel = 0.0;
        return;
    }
    let new_vel = integrate_velocity(*vel, net, dt);
    let settled = settle_velocity(*vel, new_vel, drive, static_limit);
    if settled == new_vel {
        *pos = integrate_pos(*pos, *vel, net, dt);
    } else {
        // Stopped inside the step: travel v²/2a.
        *pos -= *vel * *vel / (2.0 * net.value());
    }
    *vel = settled;
}

/// Advance one swing angle by `dt`.
///
/// Semi-implicit, so an undamped free swing neither grows nor decays and the
/// damping pass alone sets the decay rate.
#[inline]
pub(crate) fn advance_angle(angle: &mut f64, vel: &mut f64, acc: f64, dt: f64) {
    (*angle, *vel) = integrate_semi_implicit(*angle, *vel, Accel::new(acc), dt);
}

/// Advance `state` by `dt` with the formulation selected by `model_type`.
pub fn step(
    model_type: ModelType,
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    dt: f64,
) -> StepTerms {
    match model_type {
        ModelType::Linear => linear::step(config, relations, state, dt),
        ModelType::NonLinearConstLine => nonlinear::const_line(config, relations, state, dt),
        ModelType::NonLinearComplete => nonlinear::complete(config, relations, state, dt),
        ModelType::NonLinearOriginal => nonlinear::original(config, relations, state, dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crane_common::units::newtons;

    #[test]
    fn rest_snapshot_hangs_below_cart() {
        let s = CraneState {
            x: 0.1,
            y: -0.2,
            ..CraneState::at_rest(0.5)
        };
        let out = s.snapshot();
        assert_eq!(out.payload(), [0.1, -0.2, -0.5]);
        assert_eq!(out.lift_line, 0.5);
    }

    #[test]
    fn swung_payload_geometry() {
        let s = CraneState {
            alfa: core::f64::consts::FRAC_PI_2,
            ..CraneState::at_rest(0.5)
        };
        let out = s.snapshot();
        assert!((out.payload_y - 0.5).abs() < 1e-12);
        assert!(out.payload_z.abs() < 1e-12);

        let s = CraneState {
            beta: core::f64::consts::FRAC_PI_2,
            ..CraneState::at_rest(0.5)
        };
        let out = s.snapshot();
        assert!((out.payload_x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn relations_derive_mass_ratios() {
        let config = ModelConfig::default();
        let rel = BasicRelations::prepare(
            &config,
            &CraneState::at_rest(0.5),
            newtons(3.355),
            newtons(1.155),
            newtons(2.0),
        );
        assert!((rel.mu1 - 1.0 / 1.155).abs() < 1e-12);
        assert!((rel.mu2 - 1.0 / 3.355).abs() < 1e-12);
        assert!((rel.u_rail.value() - 1.0).abs() < 1e-12);
        assert!((rel.u_cart.value() - 1.0).abs() < 1e-12);
        assert!((rel.u_wind.value() - 2.0).abs() < 1e-12);
        assert!(rel.held.is_empty());
    }

    #[test]
    fn relations_hold_axis_pressed_into_stop() {
        let config = ModelConfig::default();
        let state = CraneState {
            y: config.cart_limit_max,
            ..CraneState::at_rest(config.line_limit_min)
        };
        let rel = BasicRelations::prepare(&config, &state, newtons(0.0), newtons(50.0), newtons(-5.0));
        assert_eq!(rel.f_cart, Force::ZERO);
        assert_eq!(rel.f_wind, Force::ZERO);
        assert!(rel.is_held(AxisStops::CART));
        assert!(rel.is_held(AxisStops::LINE));
        assert!(!rel.is_held(AxisStops::RAIL));
    }

    #[test]
    fn dispatch_reaches_every_variant() {
        let config = ModelConfig::default();
        for t in ModelType::ALL {
            let mut state = CraneState::at_rest(0.5);
            let rel = BasicRelations::prepare(&config, &state, newtons(50.0), newtons(50.0), newtons(0.0));
            let terms = step(t, &config, &rel, &mut state, 0.01);
            assert!(terms.rail.net.value() > 0.0, "{t}");
            assert!(state.x > 0.0 && state.y > 0.0, "{t}");
        }
    }
}
