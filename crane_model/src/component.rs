//! Single-axis force component.
//!
//! A 1-D body with its own position, velocity, acceleration and net force.
//! Friction follows the shared laws in [`crate::friction`], position limits
//! model a rigid mechanical stop, and optional caps bound velocity and
//! acceleration.

use crane_common::config::ConfigError;
use crane_common::consts::{KINETIC_FRICTION_DRY_STEEL, STATIC_FRICTION_DRY_STEEL};
use crane_common::units::{Accel, Force, Mass, kilograms, sign};
use tracing::trace;

use crate::friction::{
    FrictionRegime, coulomb_friction, regime, settle_velocity, viscous_friction,
};
use crate::integrate::{integrate_pos, integrate_velocity};

/// Single force component with its own position, velocity, acceleration and net force.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub mass: Mass,
    pub pos: f64,
    /// Lower position stop. Equal bounds disable the position limit.
    pub limit_min: f64,
    /// Upper position stop.
    pub limit_max: f64,
    /// Velocity cap, 0 = disabled.
    pub vel_max: f64,
    /// Acceleration cap, 0 = disabled.
    pub acc_max: f64,
    pub vel: f64,
    /// Acceleration applied during the last `update`.
    pub acc: Accel,

    /// Applied force after clamping against the position stops.
    pub applied: Force,
    /// Static friction (non-zero only while at rest).
    pub s_friction: Force,
    /// Kinetic friction (non-zero only while sliding).
    pub k_friction: Force,
    /// Net force: applied + friction.
    pub f_net: Force,
    /// Net driving acceleration: `f_net / mass`.
    pub net_acc: Accel,
    /// Direction of kinetic friction, opposite to the velocity.
    pub friction_dir: f64,
    /// Largest force static friction can hold at the last `apply_force*`.
    pub static_limit: Force,

    /// When set, `update` records the acceleration but never moves the axis.
    pub is_const: bool,

    pub coeff_static: f64,
    pub coeff_kinetic: f64,
}

impl Default for Component {
    fn default() -> Self {
        Self {
            mass: kilograms(1.0),
            pos: 0.0,
            limit_min: 0.0,
            limit_max: 0.0,
            vel_max: 0.0,
            acc_max: 0.0,
            vel: 0.0,
            acc: Accel::ZERO,
            applied: Force::ZERO,
            s_friction: Force::ZERO,
            k_friction: Force::ZERO,
            f_net: Force::ZERO,
            net_acc: Accel::ZERO,
            friction_dir: 1.0,
            static_limit: Force::ZERO,
            is_const: false,
            coeff_static: STATIC_FRICTION_DRY_STEEL,
            coeff_kinetic: KINETIC_FRICTION_DRY_STEEL,
        }
    }
}

impl Component {
    /// Component at `pos` with position stops `[limit_min, limit_max]`.
    pub fn new(pos: f64, limit_min: f64, limit_max: f64) -> Self {
        Self {
            pos,
            limit_min,
            limit_max,
            ..Self::default()
        }
    }

    pub fn set_limits(&mut self, min: f64, max: f64) {
        self.limit_min = min;
        self.limit_max = max;
    }

    /// Check that the component can be simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.value() > 0.0) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "component mass must be > 0 (got {})",
                self.mass
            )));
        }
        if self.limit_min > self.limit_max {
            return Err(ConfigError::InvalidConfiguration(format!(
                "component limits inverted: {} > {}",
                self.limit_min, self.limit_max
            )));
        }
        if self.vel_max < 0.0 || self.acc_max < 0.0 {
            return Err(ConfigError::InvalidConfiguration(
                "component caps must be >= 0".to_string(),
            ));
        }
        if self.coeff_static < 0.0 || self.coeff_kinetic < 0.0 {
            return Err(ConfigError::InvalidConfiguration(
                "friction coefficients must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Reset dynamic variables. Mass, limits, caps and coefficients are kept.
    pub fn reset(&mut self) {
        self.pos = 0.0;
        self.vel = 0.0;
        self.acc = Accel::ZERO;
        self.applied = Force::ZERO;
        self.s_friction = Force::ZERO;
        self.k_friction = Force::ZERO;
        self.f_net = Force::ZERO;
        self.net_acc = Accel::ZERO;
        self.friction_dir = 1.0;
        self.static_limit = Force::ZERO;
    }

    #[inline]
    fn has_limits(&self) -> bool {
        self.limit_min < self.limit_max
    }

    /// Update pos and vel using Velocity-Verlet integration.
    pub fn update(&mut self, new_acc: Accel, dt: f64) {
        self.acc = if self.acc_max > 0.0 {
            new_acc.clamp(Accel::new(-self.acc_max), Accel::new(self.acc_max))
        } else {
            new_acc
        };

        if self.is_const {
            return;
        }

        let mut new_vel = integrate_velocity(self.vel, self.acc, dt);
        let mut new_pos = integrate_pos(self.pos, self.vel, self.acc, dt);

        // Kinetic friction may stop the axis but never turn it around.
        if self.k_friction.value() != 0.0 {
            let settled = settle_velocity(self.vel, new_vel, self.applied, self.static_limit);
            if settled != new_vel {
                new_pos = self.pos - self.vel * self.vel / (2.0 * self.acc.value());
                new_vel = settled;
            }
        }

        if self.vel_max > 0.0 {
            new_vel = new_vel.clamp(-self.vel_max, self.vel_max);
        }

        if self.has_limits() {
            if new_pos <= self.limit_min {
                new_pos = self.limit_min;
                new_vel = new_vel.max(0.0);
            } else if new_pos >= self.limit_max {
                new_pos = self.limit_max;
                new_vel = new_vel.min(0.0);
            }
        }

        self.pos = new_pos;
        self.vel = new_vel;

        trace!(
            "component: pos={:.4}, vel={:.4}, acc={:.4}",
            self.pos,
            self.vel,
            self.acc.value()
        );
    }

    /// Apply a driving force with the component's own Coulomb coefficients.
    ///
    /// `g` is the gravitational acceleration pressing the component onto its
    /// guide; the normal force is `mass·g`.
    pub fn apply_force(&mut self, applied: Force, g: Accel) {
        self.applied = self.clamp_force_by_pos_limits(applied);
        let normal = self.mass * g;
        self.static_limit = normal.abs() * self.coeff_static;
        let friction = coulomb_friction(
            self.applied,
            self.vel,
            normal,
            self.coeff_static,
            self.coeff_kinetic,
        );
        self.settle_forces(friction);
    }

    /// Apply a driving force with externally supplied friction constants.
    ///
    /// `t` is the viscous kinetic friction constant [N·s/m], `ts` the static
    /// coefficient against the normal force `mass·g`.
    pub fn apply_force_nonlinear(&mut self, applied: Force, g: Accel, t: f64, ts: f64) {
        self.applied = self.clamp_force_by_pos_limits(applied);
        let normal = self.mass * g;
        self.static_limit = normal.abs() * ts;
        let friction = viscous_friction(self.applied, self.vel, normal, ts, t);
        self.settle_forces(friction);
    }

    fn settle_forces(&mut self, friction: Force) {
        match regime(self.vel) {
            FrictionRegime::Static => {
                self.s_friction = friction;
                self.k_friction = Force::ZERO;
            }
            FrictionRegime::Kinetic => {
                self.s_friction = Force::ZERO;
                self.k_friction = friction;
                self.friction_dir = -sign(self.vel);
            }
        }
        self.f_net = self.applied + friction;
        self.net_acc = self.f_net / self.mass;
    }

    /// Zero a force that would push the component further into a stop it already touches.
    pub fn clamp_force_by_pos_limits(&self, force: Force) -> Force {
        if !self.has_limits() {
            return force;
        }
        let pushes_below = self.pos <= self.limit_min && force.value() < 0.0;
        let pushes_above = self.pos >= self.limit_max && force.value() > 0.0;
        if pushes_below || pushes_above {
            Force::ZERO
        } else {
            force
        }
    }
}
