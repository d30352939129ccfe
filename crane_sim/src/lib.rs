//! # Crane Simulation Runner
//!
//! Drives a [`crane_model::Model`] through a scripted scenario without a host
//! application: piecewise-constant drive forces, frame-sized time slices and
//! a stream of state samples.
//!
//! ## Module Structure
//!
//! - [`scenario`] - Scenario file format and validation
//! - [`runner`] - Frame loop producing [`runner::Sample`]s
//! - [`error`] - [`SimError`]

pub mod error;
pub mod runner;
pub mod scenario;

pub use error::SimError;
pub use runner::{Sample, Summary, run_scenario};
pub use scenario::ScenarioConfig;
