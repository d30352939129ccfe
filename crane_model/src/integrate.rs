//! Numeric integrators.
//!
//! Pure functions shared by the single-axis component and the crane model.

use crane_common::units::Accel;

/// Explicit Euler velocity step: `v = v0 + a·Δt`.
#[inline]
pub fn integrate_velocity(v0: f64, a: Accel, dt: f64) -> f64 {
    v0 + a.value() * dt
}

/// Velocity-Verlet position step.
///
/// ```text
/// v_new = v + a·Δt
/// x     = x0 + (v + v_new)·Δt/2
/// ```
#[inline]
pub fn integrate_pos(x0: f64, v: f64, a: Accel, dt: f64) -> f64 {
    let new_v = integrate_velocity(v, a, dt);
    x0 + (v + new_v) * dt * 0.5
}

/// Semi-implicit Euler step for an oscillating coordinate.
///
/// ```text
/// v_new = v + a·Δt
/// x     = x0 + v_new·Δt
/// ```
///
/// Returns `(x, v_new)`. A free undamped oscillator keeps a bounded energy.
#[inline]
pub fn integrate_semi_implicit(x0: f64, v: f64, a: Accel, dt: f64) -> (f64, f64) {
    let new_v = integrate_velocity(v, a, dt);
    (x0 + new_v * dt, new_v)
}

/// Average velocity between two samples: `(x2 - x1) / Δt`.
#[inline]
pub fn average_velocity(x1: f64, x2: f64, dt: f64) -> f64 {
    (x2 - x1) / dt
}
