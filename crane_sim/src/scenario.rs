//! Scenario files.
//!
//! A scenario is the model configuration plus a list of force segments held
//! for a given duration each.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! log_level = "info"
//!
//! [run]
//! fixed_time = 0.01
//! frame_time = 0.016
//! output_every = 10
//!
//! [model]
//! model_type = "non_linear_complete"
//!
//! [[segments]]
//! duration = 1.0
//! cart = 50.0
//!
//! [[segments]]
//! duration = 2.0
//! ```

use crane_common::config::{ConfigError, SharedConfig, require_positive};
use crane_common::consts::FIXED_TIME_STEP;
use crane_common::model::ModelConfig;
use crane_common::units::{Force, newtons};
use serde::{Deserialize, Serialize};

// ─── Run ────────────────────────────────────────────────────────────

fn default_fixed_time() -> f64 {
    FIXED_TIME_STEP
}

fn default_frame_time() -> f64 {
    1.0 / 60.0
}

fn default_output_every() -> u32 {
    10
}

/// Timing of the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Physics sub-step [s].
    #[serde(default = "default_fixed_time")]
    pub fixed_time: f64,
    /// Time handed to the model per frame [s].
    #[serde(default = "default_frame_time")]
    pub frame_time: f64,
    /// Emit a sample every N frames.
    #[serde(default = "default_output_every")]
    pub output_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fixed_time: default_fixed_time(),
            frame_time: default_frame_time(),
            output_every: default_output_every(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("run.fixed_time", self.fixed_time)?;
        require_positive("run.frame_time", self.frame_time)?;
        if self.output_every == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "run.output_every must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Segments ───────────────────────────────────────────────────────

/// Drive forces held constant for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Segment {
    pub duration: f64,
    #[serde(default)]
    pub rail: Force,
    #[serde(default)]
    pub cart: Force,
    /// Positive pays the line out.
    #[serde(default)]
    pub wind: Force,
}

impl Segment {
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        require_positive(&format!("segments[{index}].duration"), self.duration)?;
        if !(self.rail.is_finite() && self.cart.is_finite() && self.wind.is_finite()) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "segments[{index}] forces must be finite"
            )));
        }
        Ok(())
    }
}

// ─── Scenario ───────────────────────────────────────────────────────

/// Complete scenario file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl ScenarioConfig {
    /// Built-in scenario used when no file is given: cart pushed into its
    /// stop, then released to let the payload swing out.
    pub fn demo() -> Self {
        Self {
            segments: vec![
                Segment {
                    duration: 1.0,
                    rail: Force::ZERO,
                    cart: newtons(50.0),
                    wind: Force::ZERO,
                },
                Segment {
                    duration: 1.0,
                    rail: newtons(-60.0),
                    cart: Force::ZERO,
                    wind: newtons(15.0),
                },
                Segment {
                    duration: 3.0,
                    rail: Force::ZERO,
                    cart: Force::ZERO,
                    wind: Force::ZERO,
                },
            ],
            ..Self::default()
        }
    }

    /// Simulated time covered by all segments [s].
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Validate every section.
    ///
    /// # Validation Rules
    /// 1. `[shared]` and `[model]` pass their own validation
    /// 2. Step and frame times > 0, `output_every` > 0
    /// 3. Every segment has a positive duration and finite forces
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.run.validate()?;
        self.model.validate()?;
        for (i, segment) in self.segments.iter().enumerate() {
            segment.validate(i)?;
        }
        Ok(())
    }
}
