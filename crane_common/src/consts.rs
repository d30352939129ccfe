//! Default physical parameters of the laboratory 3D crane.
//!
//! Single source of truth for every default used by `ModelConfig`.

/// Standard gravity [m/s²].
pub const GRAVITY: f64 = 9.81;

/// Payload mass Mc [kg].
pub const PAYLOAD_MASS: f64 = 1.000;
/// Cart mass Mw [kg].
pub const CART_MASS: f64 = 1.155;
/// Moving rail mass Ms [kg].
pub const RAIL_MASS: f64 = 2.200;

/// Rail friction constant Tx [N·s/m].
pub const RAIL_FRICTION: f64 = 100.0;
/// Cart friction constant Ty [N·s/m].
pub const CART_FRICTION: f64 = 82.0;
/// Lift-line winding friction constant Tr [N·s/m].
pub const WINDING_FRICTION: f64 = 75.0;

/// Static friction coefficient, dry steel on steel.
pub const STATIC_FRICTION_DRY_STEEL: f64 = 0.8;
/// Kinetic friction coefficient, dry steel on steel.
pub const KINETIC_FRICTION_DRY_STEEL: f64 = 0.7;

/// Rail travel limits [m].
pub const RAIL_LIMIT_MIN: f64 = -0.30;
pub const RAIL_LIMIT_MAX: f64 = 0.30;

/// Cart travel limits [m].
pub const CART_LIMIT_MIN: f64 = -0.35;
pub const CART_LIMIT_MAX: f64 = 0.35;

/// Lift-line length limits [m].
pub const LINE_LIMIT_MIN: f64 = 0.05;
pub const LINE_LIMIT_MAX: f64 = 0.90;

/// Lift-line length at rest [m].
pub const INITIAL_LINE_LENGTH: f64 = 0.5;

/// Default fixed simulation step [s].
pub const FIXED_TIME_STEP: f64 = 0.01;

/// Upper bound of sub-steps executed by one `update_fixed` call.
pub const MAX_SUBSTEPS: u32 = 1000;

/// Below this speed an axis is considered at rest (static friction regime) [m/s].
pub const VELOCITY_EPSILON: f64 = 1e-6;
