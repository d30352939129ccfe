//! Prelude module for common re-exports.
//!
//! ```rust
//! use crane_common::prelude::*;
//! ```

// ─── Units ──────────────────────────────────────────────────────────
pub use crate::units::{
    Accel, Force, Mass, Unit, kilograms, meters_per_sec_squared, newtons, sign,
};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Model ──────────────────────────────────────────────────────────
pub use crate::model::{DampingConfig, ModelConfig, ModelState, ModelType};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{FIXED_TIME_STEP, MAX_SUBSTEPS};
