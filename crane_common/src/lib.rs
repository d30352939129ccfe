//! Crane Common Library
//!
//! Shared types for the 3D crane workspace: typed physical units, default
//! crane parameters, configuration loading and the model's input/output
//! contract.
//!
//! # Module Structure
//!
//! - [`units`] - Phantom-tagged `Force`, `Mass`, `Accel`
//! - [`consts`] - Default physical parameters
//! - [`config`] - Configuration loading traits and errors
//! - [`model`] - `ModelType`, `ModelConfig`, `ModelState`
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use crane_common::prelude::*;
//!
//! let config = ModelConfig::with_type(ModelType::NonLinearComplete);
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod consts;
pub mod model;
pub mod prelude;
pub mod units;
