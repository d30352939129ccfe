//! Mechanical stops of the rail, cart and lift-line axes.
//!
//! The frame is rigid: an axis clamped at a stop loses its velocity, and a
//! drive force pushing further into the stop is cancelled before it reaches
//! the dynamics. Which stops were engaged during the last sub-step is kept as
//! an [`AxisStops`] bitflag set.

use bitflags::bitflags;
use crane_common::model::ModelConfig;
use crane_common::units::Force;

use crate::dynamics::CraneState;

bitflags! {
    /// Stops engaged during the last sub-step.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisStops: u8 {
        const RAIL_MIN = 0x01;
        const RAIL_MAX = 0x02;
        const CART_MIN = 0x04;
        const CART_MAX = 0x08;
        const LINE_MIN = 0x10;
        const LINE_MAX = 0x20;
    }
}

impl AxisStops {
    /// Both rail stops.
    pub const RAIL: Self = Self::from_bits_truncate(Self::RAIL_MIN.bits() | Self::RAIL_MAX.bits());
    /// Both cart stops.
    pub const CART: Self = Self::from_bits_truncate(Self::CART_MIN.bits() | Self::CART_MAX.bits());
    /// Both lift-line stops.
    pub const LINE: Self = Self::from_bits_truncate(Self::LINE_MIN.bits() | Self::LINE_MAX.bits());
}

impl Default for AxisStops {
    fn default() -> Self {
        Self::empty()
    }
}

/// Position range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// Flag raised when the lower stop is engaged.
    pub min_stop: AxisStops,
    /// Flag raised when the upper stop is engaged.
    pub max_stop: AxisStops,
}

impl AxisRange {
    pub fn rail(config: &ModelConfig) -> Self {
        Self {
            min: config.rail_limit_min,
            max: config.rail_limit_max,
            min_stop: AxisStops::RAIL_MIN,
            max_stop: AxisStops::RAIL_MAX,
        }
    }

    pub fn cart(config: &ModelConfig) -> Self {
        Self {
            min: config.cart_limit_min,
            max: config.cart_limit_max,
            min_stop: AxisStops::CART_MIN,
            max_stop: AxisStops::CART_MAX,
        }
    }

    pub fn line(config: &ModelConfig) -> Self {
        Self {
            min: config.line_limit_min,
            max: config.line_limit_max,
            min_stop: AxisStops::LINE_MIN,
            max_stop: AxisStops::LINE_MAX,
        }
    }

    /// Zero `force` when it pushes further into an engaged stop.
    ///
    /// Returns the (possibly zeroed) force and the stop it was pressed into.
    pub fn clamp_force(&self, pos: f64, force: Force) -> (Force, AxisStops) {
        if pos <= self.min && force.value() < 0.0 {
            (Force::ZERO, self.min_stop)
        } else if pos >= self.max && force.value() > 0.0 {
            (Force::ZERO, self.max_stop)
        } else {
            (force, AxisStops::empty())
        }
    }

    /// Clamp `pos` into range; the velocity is zeroed when clamped.
    pub fn clamp_position(&self, pos: &mut f64, vel: &mut f64) -> AxisStops {
        if *pos <= self.min {
            *pos = self.min;
            *vel = 0.0;
            self.min_stop
        } else if *pos >= self.max {
            *pos = self.max;
            *vel = 0.0;
            self.max_stop
        } else {
            AxisStops::empty()
        }
    }
}

/// Clamp X, Y and R into their configured ranges.
///
/// Returns the set of stops engaged. Velocities of clamped axes are zeroed
/// so a stop never injects energy.
pub fn apply_limits(config: &ModelConfig, state: &mut CraneState) -> AxisStops {
    AxisRange::rail(config).clamp_position(&mut state.x, &mut state.x_vel)
        | AxisRange::cart(config).clamp_position(&mut state.y, &mut state.y_vel)
        | AxisRange::line(config).clamp_position(&mut state.r, &mut state.r_vel)
}
