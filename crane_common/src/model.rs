//! Crane model configuration and output types.
//!
//! - `ModelType` - selects one of the four dynamics formulations
//! - `DampingConfig` - numerical damping applied after every sub-step
//! - `ModelConfig` - all parameters fixed for the duration of a run
//! - `ModelState` - snapshot handed to the host application

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use crate::config::{ConfigError, require_non_negative, require_ordered, require_positive};
use crate::consts;
use crate::units::{Accel, Mass, kilograms, meters_per_sec_squared};

// ─── Model Type ─────────────────────────────────────────────────────

/// Dynamics formulation used by the model.
///
/// Fixed configuration: the model never switches formulation mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Decoupled axes with small-angle swing. The most basic and foolproof model.
    #[default]
    Linear,
    /// Coupled rail/cart with a constant lift-line length. `Fwind` is ignored.
    NonLinearConstLine,
    /// Fully coupled model driven by all three forces.
    NonLinearComplete,
    /// Fully coupled model with the viscous friction law of the published crane model.
    NonLinearOriginal,
}

impl ModelType {
    /// All variants, in declaration order.
    pub const ALL: [ModelType; 4] = [
        Self::Linear,
        Self::NonLinearConstLine,
        Self::NonLinearComplete,
        Self::NonLinearOriginal,
    ];

    /// Configuration name of the variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::NonLinearConstLine => "non_linear_const_line",
            Self::NonLinearComplete => "non_linear_complete",
            Self::NonLinearOriginal => "non_linear_original",
        }
    }

    /// True when the lift-line length is a dynamic degree of freedom.
    pub const fn winds_line(self) -> bool {
        !matches!(self, Self::NonLinearConstLine)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigError::ParseError(format!("unknown model type '{s}'")))
    }
}

// ─── Damping ────────────────────────────────────────────────────────

fn default_angular_damping() -> f64 {
    0.1
}

fn default_snap_epsilon() -> f64 {
    1e-9
}

fn default_max_swing_rate() -> f64 {
    50.0
}

/// Numerical damping applied after every sub-step.
///
/// Not part of the physical model: suppresses slow floating-point drift
/// over long runs. Velocities are scaled by `(1 - coeff * dt)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DampingConfig {
    /// Swing angle velocity damping [1/s].
    #[serde(default = "default_angular_damping")]
    pub angular: f64,
    /// Rail/cart/line velocity damping [1/s].
    #[serde(default)]
    pub linear: f64,
    /// Magnitudes below this snap to exactly zero.
    #[serde(default = "default_snap_epsilon")]
    pub snap_epsilon: f64,
    /// Swing angle velocities are clamped to ±this [rad/s].
    #[serde(default = "default_max_swing_rate")]
    pub max_swing_rate: f64,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            angular: default_angular_damping(),
            linear: 0.0,
            snap_epsilon: default_snap_epsilon(),
            max_swing_rate: default_max_swing_rate(),
        }
    }
}

// ─── Model Config ───────────────────────────────────────────────────

/// Parameters of the crane model.
///
/// Every field has a default matching the laboratory crane, so an empty
/// `[model]` table is a valid configuration.
///
/// # TOML Example
///
/// ```toml
/// [model]
/// model_type = "non_linear_complete"
/// payload_mass = 1.0
/// cart_limit_max = 0.35
///
/// [model.damping]
/// angular = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Dynamics formulation.
    pub model_type: ModelType,
    /// Mc mass of the payload.
    pub payload_mass: Mass,
    /// Mw mass of the cart.
    pub cart_mass: Mass,
    /// Ms mass of the moving rail.
    pub rail_mass: Mass,
    /// Gravitational acceleration.
    pub gravity: Accel,

    /// Tx rail friction constant [N·s/m].
    pub rail_friction: f64,
    /// Ty cart friction constant [N·s/m].
    pub cart_friction: f64,
    /// Tr lift-line winding friction constant [N·s/m].
    pub winding_friction: f64,
    /// Static friction coefficient of the rail and cart guides.
    pub static_friction: f64,
    /// Kinetic friction coefficient of the rail and cart guides.
    pub kinetic_friction: f64,

    pub rail_limit_min: f64,
    pub rail_limit_max: f64,
    pub cart_limit_min: f64,
    pub cart_limit_max: f64,
    pub line_limit_min: f64,
    pub line_limit_max: f64,

    /// Lift-line length at rest and after `reset`.
    pub initial_line_length: f64,
    /// Cap on sub-steps per `update_fixed` call.
    pub max_substeps: u32,
    pub damping: DampingConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: ModelType::default(),
            payload_mass: kilograms(consts::PAYLOAD_MASS),
            cart_mass: kilograms(consts::CART_MASS),
            rail_mass: kilograms(consts::RAIL_MASS),
            gravity: meters_per_sec_squared(consts::GRAVITY),
            rail_friction: consts::RAIL_FRICTION,
            cart_friction: consts::CART_FRICTION,
            winding_friction: consts::WINDING_FRICTION,
            static_friction: consts::STATIC_FRICTION_DRY_STEEL,
            kinetic_friction: consts::KINETIC_FRICTION_DRY_STEEL,
            rail_limit_min: consts::RAIL_LIMIT_MIN,
            rail_limit_max: consts::RAIL_LIMIT_MAX,
            cart_limit_min: consts::CART_LIMIT_MIN,
            cart_limit_max: consts::CART_LIMIT_MAX,
            line_limit_min: consts::LINE_LIMIT_MIN,
            line_limit_max: consts::LINE_LIMIT_MAX,
            initial_line_length: consts::INITIAL_LINE_LENGTH,
            max_substeps: consts::MAX_SUBSTEPS,
            damping: DampingConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Default configuration with a different dynamics formulation.
    pub fn with_type(model_type: ModelType) -> Self {
        Self {
            model_type,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. Masses and gravity > 0
    /// 2. Friction constants and coefficients >= 0
    /// 3. Every limit pair ordered, line minimum > 0
    /// 4. Initial line length within the line limits
    /// 5. `max_substeps` > 0, damping coefficients >= 0, swing rate cap > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("payload_mass", self.payload_mass.value())?;
        require_positive("cart_mass", self.cart_mass.value())?;
        require_positive("rail_mass", self.rail_mass.value())?;
        require_positive("gravity", self.gravity.value())?;

        require_non_negative("rail_friction", self.rail_friction)?;
        require_non_negative("cart_friction", self.cart_friction)?;
        require_non_negative("winding_friction", self.winding_friction)?;
        require_non_negative("static_friction", self.static_friction)?;
        require_non_negative("kinetic_friction", self.kinetic_friction)?;

        require_ordered("rail", self.rail_limit_min, self.rail_limit_max)?;
        require_ordered("cart", self.cart_limit_min, self.cart_limit_max)?;
        require_ordered("line", self.line_limit_min, self.line_limit_max)?;
        require_positive("line_limit_min", self.line_limit_min)?;

        if !(self.line_limit_min..=self.line_limit_max).contains(&self.initial_line_length) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "initial_line_length {} outside [{}, {}]",
                self.initial_line_length, self.line_limit_min, self.line_limit_max
            )));
        }

        if self.max_substeps == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "max_substeps must be greater than 0".to_string(),
            ));
        }

        require_non_negative("damping.angular", self.damping.angular)?;
        require_non_negative("damping.linear", self.damping.linear)?;
        require_non_negative("damping.snap_epsilon", self.damping.snap_epsilon)?;
        require_positive("damping.max_swing_rate", self.damping.max_swing_rate)?;
        Ok(())
    }
}

// ─── Model State ────────────────────────────────────────────────────

/// Output state of the model.
///
/// Plain-old-data contract with the host application: field set, order and
/// units are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct ModelState {
    /// α swing angle toward the cart axis [rad].
    pub alfa: f64,
    /// β angle between −Z and the lift-line projected onto the XZ plane [rad].
    pub beta: f64,
    /// Xw distance of the rail with the cart from the frame center [m].
    pub rail_offset: f64,
    /// Yw distance of the cart from the rail center [m].
    pub cart_offset: f64,
    /// R lift-line length [m].
    pub lift_line: f64,
    /// Payload coordinates [m].
    pub payload_x: f64,
    pub payload_y: f64,
    pub payload_z: f64,
}

const_assert_eq!(core::mem::size_of::<ModelState>(), 64);

impl ModelState {
    /// Payload position as `[x, y, z]`.
    #[inline]
    pub const fn payload(&self) -> [f64; 3] {
        [self.payload_x, self.payload_y, self.payload_z]
    }

    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.alfa,
            self.beta,
            self.rail_offset,
            self.cart_offset,
            self.lift_line,
            self.payload_x,
            self.payload_y,
            self.payload_z,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={:+.3}° b={:+.3}° rail={:+.3} cart={:+.3} line={:.3} payload=({:+.3}, {:+.3}, {:+.3})",
            self.alfa.to_degrees(),
            self.beta.to_degrees(),
            self.rail_offset,
            self.cart_offset,
            self.lift_line,
            self.payload_x,
            self.payload_y,
            self.payload_z,
        )
    }
}
