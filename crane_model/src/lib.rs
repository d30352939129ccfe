//! # Crane Model Library
//!
//! Fixed-step physics of a 3-axis overhead crane: a rail moving along the
//! frame, a cart travelling along the rail and a payload swinging on a
//! winched lift-line.
//!
//! ## Module Structure
//!
//! - [`integrate`] - Euler velocity and Velocity-Verlet position steps
//! - [`friction`] - Coulomb and viscous friction with stiction
//! - [`component`] - Independent single-axis body
//! - [`limits`] - Mechanical stops and the [`AxisStops`] flags
//! - [`dynamics`] - The four formulations over an explicit [`CraneState`]
//! - [`model`] - [`Model`], the fixed-step driver
//!
//! ## Usage
//!
//! ```rust
//! use crane_common::prelude::*;
//! use crane_model::Model;
//!
//! let mut model = Model::new(ModelConfig::with_type(ModelType::NonLinearComplete))?;
//! let state = model.update_fixed(0.01, 0.016, newtons(0.0), newtons(20.0), newtons(0.0));
//! assert!(state.cart_offset > 0.0);
//! # Ok::<(), ConfigError>(())
//! ```

pub mod component;
pub mod dynamics;
pub mod friction;
pub mod integrate;
pub mod limits;
pub mod model;

pub use component::Component;
pub use dynamics::CraneState;
pub use limits::AxisStops;
pub use model::Model;
