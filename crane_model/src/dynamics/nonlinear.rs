//! Coupled nonlinear crane.
//!
//! The payload is a point mass on a line of length R hung from the cart.
//! Swing follows the Lagrangian of a spherical pendulum on a moving support:
//!
//! ```text
//! α̈ = (−g·sα·cβ + Ẍ·sα·sβ − Ÿ·cα)/R − 2Ṙα̇/R − sα·cα·β̇²
//! β̈ = (−g·sβ − Ẍ·cβ)/(R·cα)        − 2Ṙβ̇/R + 2·tanα·α̇β̇
//! ```
//!
//! The winch holds the payload weight, `Fwind > 0` pays line out. The radial
//! drive on the winch is
//!
//! ```text
//! D = Fwind + Mp·(R·(α̇² + cos²α·β̇²) + g·(cα·cβ − 1) − a_s·u)
//! ```
//!
//! where `a_s·u = Ẍ·cα·sβ + Ÿ·sα` is the support acceleration along the line.
//! The resulting line tension `T = Mp·g − Fwind − friction` pulls the cart by
//! `μ1·(T/Mp)·sα` and the rail by `μ2·(T/Mp)·cα·sβ`. Support accelerations of
//! the previous sub-step close the loop between tension and cart motion.

use crane_common::model::ModelConfig;
use crane_common::units::{Force, Mass, meters_per_sec_squared};

use super::{AxisTerms, BasicRelations, CraneState, StepTerms, advance_angle, advance_axis};
use crate::friction::{coulomb_friction, viscous_friction};
use crate::limits::AxisStops;

/// Lower bound of |cos α| in the β equation.
pub const COS_ALFA_MIN: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrictionLaw {
    /// Coulomb with the model's static/kinetic coefficients.
    Coulomb,
    /// Viscous `T·v` with the published per-axis constants.
    Viscous,
}

/// Trigonometry of the current swing.
#[derive(Debug, Clone, Copy)]
struct Swing {
    sa: f64,
    ca: f64,
    sb: f64,
    cb: f64,
}

impl Swing {
    fn of(state: &CraneState) -> Self {
        let (sa, ca) = state.alfa.sin_cos();
        let (sb, cb) = state.beta.sin_cos();
        Self { sa, ca, sb, cb }
    }

    /// cos α kept away from zero.
    fn ca_guarded(&self) -> f64 {
        if self.ca.abs() < COS_ALFA_MIN {
            COS_ALFA_MIN.copysign(self.ca)
        } else {
            self.ca
        }
    }

    /// Squared angular rate of the line.
    fn omega2(&self, state: &CraneState) -> f64 {
        state.alfa_vel * state.alfa_vel + self.ca * self.ca * state.beta_vel * state.beta_vel
    }

    /// Acceleration of the support along the line direction.
    fn support_along_line(&self, x_acc: f64, y_acc: f64) -> f64 {
        x_acc * self.ca * self.sb + y_acc * self.sa
    }
}

/// What an axis moves and presses on.
#[derive(Debug, Clone, Copy)]
struct AxisLoad {
    mass: Mass,
    normal: Force,
    /// Viscous constant used by [`FrictionLaw::Viscous`].
    viscous: f64,
}

/// One translational axis resolved for a sub-step.
struct Axis {
    terms: AxisTerms,
    drive: Force,
    static_limit: Force,
}

impl Axis {
    fn resolve(
        config: &ModelConfig,
        law: FrictionLaw,
        drive: Force,
        velocity: f64,
        load: AxisLoad,
        held: bool,
    ) -> Self {
        let AxisLoad { mass, normal, viscous } = load;
        let friction = match law {
            FrictionLaw::Coulomb => coulomb_friction(
                drive,
                velocity,
                normal,
                config.static_friction,
                config.kinetic_friction,
            ),
            FrictionLaw::Viscous => {
                viscous_friction(drive, velocity, normal, config.static_friction, viscous)
            }
        };
        let terms = if held {
            AxisTerms::held(drive / mass)
        } else {
            AxisTerms::new(drive / mass, friction / mass)
        };
        Self {
            terms,
            drive,
            static_limit: normal * config.static_friction,
        }
    }

    /// Friction force actually applied.
    fn friction(&self, mass: Mass) -> Force {
        mass * self.terms.friction
    }
}

/// Rigid-line tension: what the line carries when R does not change.
fn rigid_tension(config: &ModelConfig, swing: &Swing, state: &CraneState) -> Force {
    let g = config.gravity.value();
    let radial = g * swing.ca * swing.cb + state.r * swing.omega2(state)
        - swing.support_along_line(state.x_acc, state.y_acc);
    slack_free(config.payload_mass * meters_per_sec_squared(radial))
}

/// A line can pull but never push.
#[inline]
fn slack_free(tension: Force) -> Force {
    if tension.value() > 0.0 { tension } else { Force::ZERO }
}

/// Drive the rail and cart with line tension `tension`, then swing the payload.
fn carts_and_swing(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    swing: &Swing,
    tension: Force,
    law: FrictionLaw,
    dt: f64,
) -> (AxisTerms, AxisTerms) {
    let g = config.gravity;
    let pull = tension / config.payload_mass;
    let rail_held = relations.is_held(AxisStops::RAIL);
    let cart_held = relations.is_held(AxisStops::CART);

    let rail_mass = relations.rail_cart_mass;
    let rail_drive = relations.u_rail + relations.mu2 * pull * (swing.ca * swing.sb);
    let rail = Axis::resolve(
        config,
        law,
        rail_mass * rail_drive,
        state.x_vel,
        AxisLoad {
            mass: rail_mass,
            normal: (rail_mass + config.payload_mass) * g,
            viscous: config.rail_friction,
        },
        rail_held,
    );

    let cart_mass = config.cart_mass;
    let cart_drive = relations.u_cart + relations.mu1 * pull * swing.sa;
    let cart = Axis::resolve(
        config,
        law,
        cart_mass * cart_drive,
        state.y_vel,
        AxisLoad {
            mass: cart_mass,
            normal: (cart_mass + config.payload_mass) * g,
            viscous: config.cart_friction,
        },
        cart_held,
    );

    let x_acc = rail.terms.net.value();
    let y_acc = cart.terms.net.value();
    let g = g.value();
    let r = state.r;
    let ca = swing.ca_guarded();
    let alfa_acc = (-g * swing.sa * swing.cb + x_acc * swing.sa * swing.sb - y_acc * swing.ca) / r
        - 2.0 * state.r_vel * state.alfa_vel / r
        - swing.sa * swing.ca * state.beta_vel * state.beta_vel;
    let beta_acc = (-g * swing.sb - x_acc * swing.cb) / (r * ca)
        - 2.0 * state.r_vel * state.beta_vel / r
        + 2.0 * (swing.sa / ca) * state.alfa_vel * state.beta_vel;

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
    advance_angle(&mut state.alfa, &mut state.alfa_vel, alfa_acc, dt);
    advance_angle(&mut state.beta, &mut state.beta_vel, beta_acc, dt);
    state.x_acc = x_acc;
    state.y_acc = y_acc;

    (rail.terms, cart.terms)
}

/// Full three-axis equations with the winch.
fn winding(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    law: FrictionLaw,
    dt: f64,
) -> StepTerms {
    let swing = Swing::of(state);
    let m = config.payload_mass;
    let g = config.gravity.value();
    let line_held = relations.is_held(AxisStops::LINE);

    let radial = state.r * swing.omega2(state) + g * (swing.ca * swing.cb - 1.0)
        - swing.support_along_line(state.x_acc, state.y_acc);
    let drive = relations.f_wind + m * meters_per_sec_squared(radial);
    let wind = Axis::resolve(
        config,
        law,
        drive,
        state.r_vel,
        AxisLoad {
            mass: m,
            normal: m * config.gravity,
            viscous: config.winding_friction,
        },
        line_held,
    );
    let tension = if line_held {
        rigid_tension(config, &swing, state)
    } else {
        slack_free(m * config.gravity - relations.f_wind - wind.friction(m))
    };

    // Swing sees R and Ṙ from the start of the step.
    let (rail, cart) = carts_and_swing(config, relations, state, &swing, tension, law, dt);
    advance_axis(
        &mut state.r,
        &mut state.r_vel,
        wind.terms.net,
        line_held,
        wind.drive,
        wind.static_limit,
        dt,
    );

    StepTerms {
        rail,
        cart,
        wind: wind.terms,
        tension,
    }
}

/// Nonlinear rail and cart with a fixed lift-line; `Fwind` is ignored.
pub fn const_line(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    dt: f64,
) -> StepTerms {
    let swing = Swing::of(state);
    state.r_vel = 0.0;
    let tension = rigid_tension(config, &swing, state);
    let (rail, cart) =
        carts_and_swing(config, relations, state, &swing, tension, FrictionLaw::Coulomb, dt);
    StepTerms {
        rail,
        cart,
        wind: AxisTerms::default(),
        tension,
    }
}

/// Full three-axis model with Coulomb friction.
pub fn complete(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    dt: f64,
) -> StepTerms {
    winding(config, relations, state, FrictionLaw::Coulomb, dt)
}

/// Full three-axis model with the published viscous friction constants.
pub fn original(
    config: &ModelConfig,
    relations: &BasicRelations,
    state: &mut CraneState,
    dt: f64,
) -> StepTerms {
    winding(config, relations, state, FrictionLaw::Viscous, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crane_common::model::ModelType;
    use crane_common::units::newtons;

    use crate::limits::apply_limits;

    type Variant = fn(&ModelConfig, &BasicRelations, &mut CraneState, f64) -> StepTerms;

    const VARIANTS: [(ModelType, Variant); 3] = [
        (ModelType::NonLinearConstLine, const_line),
        (ModelType::NonLinearComplete, complete),
        (ModelType::NonLinearOriginal, original),
    ];

    fn run(variant: Variant, config: &ModelConfig, state: &mut CraneState, forces: [f64; 3], steps: usize) {
        for _ in 0..steps {
            let rel = BasicRelations::prepare(
                config,
                state,
                newtons(forces[0]),
                newtons(forces[1]),
                newtons(forces[2]),
            );
            variant(config, &rel, state, 0.01);
            apply_limits(config, state);
        }
    }

    #[test]
    fn hanging_payload_is_an_equilibrium() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState::at_rest(0.5);
            run(variant, &config, &mut state, [0.0; 3], 200);
            assert_eq!(state, CraneState::at_rest(0.5), "{t}");
        }
    }

    #[test]
    fn rest_tension_carries_payload_weight() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState::at_rest(0.5);
            let rel = BasicRelations::prepare(&config, &state, Force::ZERO, Force::ZERO, Force::ZERO);
            let terms = variant(&config, &rel, &mut state, 0.01);
            assert!((terms.tension.value() - 9.81).abs() < 1e-9, "{t}: {}", terms.tension);
        }
    }

    #[test]
    fn displaced_payload_swings_back() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState {
                alfa: 0.2,
                ..CraneState::at_rest(0.5)
            };
            let rel = BasicRelations::prepare(&config, &state, Force::ZERO, Force::ZERO, Force::ZERO);
            variant(&config, &rel, &mut state, 0.01);
            assert!(state.alfa < 0.2, "{t}");
            assert!(state.alfa_vel < 0.0, "{t}");
        }
    }

    #[test]
    fn small_swing_period_matches_pendulum() {
        // T = 2π·√(R/g) ≈ 1.419 s for R = 0.5; count zero crossings of α.
        let config = ModelConfig::with_type(ModelType::NonLinearConstLine);
        let mut state = CraneState {
            alfa: 0.01,
            ..CraneState::at_rest(0.5)
        };
        let mut crossings = Vec::new();
        let mut prev = state.alfa;
        for i in 1..=300 {
            run(const_line, &config, &mut state, [0.0; 3], 1);
            if prev > 0.0 && state.alfa <= 0.0 {
                crossings.push(i as f64 * 0.01);
            }
            prev = state.alfa;
        }
        assert!(crossings.len() >= 2);
        let period = crossings[1] - crossings[0];
        assert!((period - 1.419).abs() < 0.03, "period {period}");
    }

    #[test]
    fn const_line_ignores_winding_force() {
        let config = ModelConfig::with_type(ModelType::NonLinearConstLine);
        let mut state = CraneState::at_rest(0.5);
        run(const_line, &config, &mut state, [0.0, 0.0, 30.0], 50);
        assert_eq!(state.r, 0.5);
        assert_eq!(state.r_vel, 0.0);
    }

    #[test]
    fn winding_force_pays_out_and_in() {
        for (t, variant) in &VARIANTS[1..] {
            let config = ModelConfig::with_type(*t);
            let mut state = CraneState::at_rest(0.5);
            run(*variant, &config, &mut state, [0.0, 0.0, 20.0], 20);
            assert!(state.r > 0.5, "{t}: {}", state.r);

            let mut state = CraneState::at_rest(0.5);
            run(*variant, &config, &mut state, [0.0, 0.0, -20.0], 20);
            assert!(state.r < 0.5, "{t}: {}", state.r);
        }
    }

    #[test]
    fn winch_stiction_holds_small_force() {
        let config = ModelConfig::with_type(ModelType::NonLinearComplete);
        let mut state = CraneState::at_rest(0.5);
        // 0.8·1.0·9.81 ≈ 7.85 N
        run(complete, &config, &mut state, [0.0, 0.0, 5.0], 10);
        assert_eq!(state.r, 0.5);
    }

    #[test]
    fn cart_motion_swings_alfa_only() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState::at_rest(0.5);
            run(variant, &config, &mut state, [0.0, 40.0, 0.0], 10);
            assert!(state.y > 0.0, "{t}");
            assert!(state.alfa < 0.0, "{t}");
            assert_eq!(state.beta, 0.0, "{t}");
            assert_eq!(state.x, 0.0, "{t}");
        }
    }

    #[test]
    fn rail_motion_swings_beta() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState::at_rest(0.5);
            run(variant, &config, &mut state, [60.0, 0.0, 0.0], 10);
            assert!(state.x > 0.0, "{t}");
            assert!(state.beta < 0.0, "{t}");
            assert_eq!(state.alfa, 0.0, "{t}");
        }
    }

    #[test]
    fn original_friction_is_viscous() {
        let config = ModelConfig::with_type(ModelType::NonLinearOriginal);
        let mut state = CraneState::at_rest(0.5);
        let rel = BasicRelations::prepare(&config, &state, Force::ZERO, newtons(40.0), Force::ZERO);
        original(&config, &rel, &mut state, 0.01);
        let v = state.y_vel;
        assert!(v > 0.0);

        let mut complete_state = CraneState { y_vel: v, ..CraneState::at_rest(0.5) };
        let mut original_state = complete_state;
        let rel = BasicRelations::prepare(&config, &original_state, Force::ZERO, newtons(40.0), Force::ZERO);
        let viscous = original(&config, &rel, &mut original_state, 0.01);
        let coulomb = complete(&config, &rel, &mut complete_state, 0.01);
        let expected = -config.cart_friction * v / config.cart_mass.value();
        assert!((viscous.cart.friction.value() - expected).abs() < 1e-9);
        assert_ne!(viscous.cart.friction, coulomb.cart.friction);
    }

    #[test]
    fn stays_finite_near_horizontal_swing() {
        for (t, variant) in VARIANTS {
            let config = ModelConfig::with_type(t);
            let mut state = CraneState {
                alfa: core::f64::consts::FRAC_PI_2,
                beta_vel: 0.5,
                ..CraneState::at_rest(0.5)
            };
            run(variant, &config, &mut state, [0.0; 3], 50);
            assert!(state.snapshot().is_finite(), "{t}");
        }
    }
}
