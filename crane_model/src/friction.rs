//! Friction laws shared by [`Component`](crate::component::Component) and
//! the crane model variants.
//!
//! Both laws split on velocity:
//!
//! - Static regime (`|v| < VELOCITY_EPSILON`): friction opposes the applied
//!   force with magnitude `min(|applied|, static_coeff·|normal|)`. It may cancel
//!   the applied force (sticking) but never reverse it.
//! - Kinetic regime: friction acts against the velocity, independent of the
//!   applied force.
//!     - Coulomb: `−sign(v)·kinetic_coeff·|normal|`
//!     - Viscous: `−damping·v` (the `T·ẋ` term of the published crane model)
//!
//! All functions return the friction force itself (signed), so the net force
//! is `applied + friction`.

use crane_common::consts::VELOCITY_EPSILON;
use crane_common::units::{Force, sign};

/// Which side of the stiction threshold an axis is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionRegime {
    /// At rest, friction may hold the axis.
    Static,
    /// Sliding, friction opposes velocity.
    Kinetic,
}

/// Classify `velocity` [m/s].
#[inline]
pub fn regime(velocity: f64) -> FrictionRegime {
    if velocity.abs() < VELOCITY_EPSILON {
        FrictionRegime::Static
    } else {
        FrictionRegime::Kinetic
    }
}

/// Static friction against `applied`, bounded by `limit` (a magnitude).
#[inline]
pub fn static_friction(applied: Force, limit: Force) -> Force {
    -(applied.abs().min(limit.abs())) * applied.sign()
}

/// Coulomb friction with stiction.
#[inline]
pub fn coulomb_friction(
    applied: Force,
    velocity: f64,
    normal: Force,
    static_coeff: f64,
    kinetic_coeff: f64,
) -> Force {
    match regime(velocity) {
        FrictionRegime::Static => static_friction(applied, normal.abs() * static_coeff),
        FrictionRegime::Kinetic => normal.abs() * (-kinetic_coeff * sign(velocity)),
    }
}

/// Viscous friction with stiction.
#[inline]
pub fn viscous_friction(
    applied: Force,
    velocity: f64,
    normal: Force,
    static_coeff: f64,
    damping: f64,
) -> Force {
    match regime(velocity) {
        FrictionRegime::Static => static_friction(applied, normal.abs() * static_coeff),
        FrictionRegime::Kinetic => Force::new(-damping * velocity),
    }
}

/// Velocity after a step, with kinetic friction unable to push through zero.
///
/// When the step would flip the sign of a moving axis and the driving force
/// alone is within the static limit, the axis sticks at zero velocity instead
/// of chattering around it.
#[inline]
pub fn settle_velocity(old_velocity: f64, new_velocity: f64, drive: Force, static_limit: Force) -> f64 {
    let reversed = sign(old_velocity) * sign(new_velocity) < 0.0;
    if reversed && drive.abs() <= static_limit.abs() {
        0.0
    } else {
        new_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crane_common::units::newtons;

    const MU_S: f64 = 0.8;
    const MU_K: f64 = 0.7;

    #[test]
    fn stiction_cancels_small_force() {
        let f = coulomb_friction(newtons(3.0), 0.0, newtons(10.0), MU_S, MU_K);
        assert_eq!(f, newtons(-3.0));
    }

    #[test]
    fn stiction_never_reverses_applied_force() {
        for applied in [-50.0, -8.0, -0.1, 0.0, 0.1, 7.9, 8.0, 50.0] {
            let f = coulomb_friction(newtons(applied), 0.0, newtons(10.0), MU_S, MU_K);
            assert!(f.abs().value() <= applied.abs() + 1e-12);
            let net = newtons(applied) + f;
            assert!(net.value() * applied >= 0.0, "net reversed for {applied}");
        }
    }

    #[test]
    fn static_friction_bounded_by_coefficient() {
        let f = coulomb_friction(newtons(50.0), 0.0, newtons(-10.0), MU_S, MU_K);
        assert!((f.value() + 8.0).abs() < 1e-12);
    }

    #[test]
    fn kinetic_friction_opposes_velocity_only() {
        let forward = coulomb_friction(newtons(-100.0), 0.5, newtons(10.0), MU_S, MU_K);
        assert!((forward.value() + 7.0).abs() < 1e-12);
        let backward = coulomb_friction(newtons(100.0), -0.5, newtons(10.0), MU_S, MU_K);
        assert!((backward.value() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn viscous_friction_scales_with_velocity() {
        let f = viscous_friction(newtons(0.0), 0.2, newtons(10.0), MU_S, 82.0);
        assert!((f.value() + 16.4).abs() < 1e-12);
        let held = viscous_friction(newtons(5.0), 0.0, newtons(10.0), MU_S, 82.0);
        assert_eq!(held, newtons(-5.0));
    }

    #[test]
    fn zero_normal_means_no_friction() {
        let f = coulomb_friction(newtons(5.0), 0.0, newtons(0.0), MU_S, MU_K);
        assert_eq!(f.value(), 0.0);
        let f = coulomb_friction(newtons(5.0), 1.0, newtons(0.0), MU_S, MU_K);
        assert_eq!(f.value(), 0.0);
    }

    #[test]
    fn regime_threshold() {
        assert_eq!(regime(0.0), FrictionRegime::Static);
        assert_eq!(regime(VELOCITY_EPSILON * 0.5), FrictionRegime::Static);
        assert_eq!(regime(-0.01), FrictionRegime::Kinetic);
    }

    #[test]
    fn settle_sticks_on_friction_reversal() {
        assert_eq!(settle_velocity(0.01, -0.02, newtons(1.0), newtons(8.0)), 0.0);
        // Strong drive may reverse the axis.
        assert_eq!(settle_velocity(0.01, -0.02, newtons(-20.0), newtons(8.0)), -0.02);
        // No reversal, unchanged.
        assert_eq!(settle_velocity(0.01, 0.005, newtons(0.0), newtons(8.0)), 0.005);
    }
}
