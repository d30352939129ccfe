//! The crane model.
//!
//! [`Model`] owns the crane state and advances it in fixed sub-steps:
//!
//! 1. `prepare_basic_relations` - clamp the drive forces at the stops and
//!    derive the mass ratios
//! 2. dispatch to the formulation selected by [`ModelType`]
//! 3. `apply_limits` - keep X, Y and R inside their ranges
//! 4. `dampen_all_values` - numerical damping pass
//!
//! Time handed to [`Model::update_fixed`] is accumulated; whole sub-steps are
//! consumed, the remainder waits for the next call.

use core::fmt::Write as _;

use crane_common::config::ConfigError;
use crane_common::model::{ModelConfig, ModelState, ModelType};
use crane_common::units::Force;
use tracing::{debug, trace, warn};

use crate::dynamics::{self, BasicRelations, CraneState, StepTerms};
use crate::limits::{self, AxisStops};

/// Three-axis overhead crane.
#[derive(Debug, Clone)]
pub struct Model {
    config: ModelConfig,
    state: CraneState,
    relations: BasicRelations,
    terms: StepTerms,
    /// Stops engaged during the last sub-step.
    stops: AxisStops,
    /// Time not yet consumed by a sub-step [s].
    accumulator: f64,
    /// Sub-steps executed since construction or reset.
    substeps: u64,
    /// Time discarded by the sub-step cap [s].
    dropped_time: f64,
}

impl Default for Model {
    fn default() -> Self {
        Self::from_valid(ModelConfig::default())
    }
}

impl Model {
    /// Create a model at rest.
    ///
    /// # Errors
    /// `ConfigError::InvalidConfiguration` when `config` fails validation.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            model_type = %config.model_type,
            line = config.initial_line_length,
            "Crane model created"
        );
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ModelConfig) -> Self {
        Self {
            state: CraneState::at_rest(config.initial_line_length),
            config,
            relations: BasicRelations::default(),
            terms: StepTerms::default(),
            stops: AxisStops::empty(),
            accumulator: 0.0,
            substeps: 0,
            dropped_time: 0.0,
        }
    }

    // ─── Stepping ───────────────────────────────────────────────────

    /// Accumulate `delta_time` and run every whole sub-step of `fixed_time`.
    ///
    /// At most `max_substeps` run per call; older whole steps beyond the cap
    /// are discarded and counted in [`dropped_time`](Self::dropped_time).
    /// A non-positive `fixed_time` runs nothing.
    pub fn update_fixed(
        &mut self,
        fixed_time: f64,
        delta_time: f64,
        f_rail: Force,
        f_cart: Force,
        f_wind: Force,
    ) -> ModelState {
        if !(fixed_time > 0.0 && fixed_time.is_finite()) {
            return self.state();
        }
        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulator += delta_time;
        }

        let mut pending = (self.accumulator / fixed_time).floor();
        let cap = f64::from(self.config.max_substeps);
        if pending > cap {
            let excess = pending - cap;
            self.accumulator -= excess * fixed_time;
            self.dropped_time += excess * fixed_time;
            warn!(
                discarded = excess,
                max_substeps = self.config.max_substeps,
                "Sub-step cap reached, discarding elapsed time"
            );
            pending = cap;
        }

        for _ in 0..pending as u32 {
            self.step(fixed_time, f_rail, f_cart, f_wind);
            self.accumulator -= fixed_time;
        }
        self.state()
    }

    /// Run a single step of `delta_time` without the accumulator.
    ///
    /// Only stable when the caller keeps `delta_time` constant and small.
    pub fn update(
        &mut self,
        delta_time: f64,
        f_rail: Force,
        f_cart: Force,
        f_wind: Force,
    ) -> ModelState {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.step(delta_time, f_rail, f_cart, f_wind);
        }
        self.state()
    }

    fn step(&mut self, dt: f64, f_rail: Force, f_cart: Force, f_wind: Force) {
        self.prepare_basic_relations(f_rail, f_cart, f_wind);
        self.terms = dynamics::step(
            self.config.model_type,
            &self.config,
            &self.relations,
            &mut self.state,
            dt,
        );
        self.apply_limits();
        self.dampen_all_values(dt);
        self.substeps += 1;

        trace!(
            step = self.substeps,
            x = self.state.x,
            y = self.state.y,
            r = self.state.r,
            alfa = self.state.alfa,
            beta = self.state.beta,
            "Sub-step"
        );
    }

    fn prepare_basic_relations(&mut self, f_rail: Force, f_cart: Force, f_wind: Force) {
        // A fixed line does not take winding force.
        let f_wind = if self.config.model_type.winds_line() {
            f_wind
        } else {
            Force::ZERO
        };
        self.relations = BasicRelations::prepare(&self.config, &self.state, f_rail, f_cart, f_wind);
    }

    fn apply_limits(&mut self) {
        self.stops = self.relations.held | limits::apply_limits(&self.config, &mut self.state);
    }

    fn dampen_all_values(&mut self, dt: f64) {
        let damping = &self.config.damping;
        let angular = (1.0 - damping.angular * dt).max(0.0);
        let linear = (1.0 - damping.linear * dt).max(0.0);
        let eps = damping.snap_epsilon;
        let snap = |v: f64| if v.abs() < eps { 0.0 } else { v };
        let rate = damping.max_swing_rate;

        let s = &mut self.state;
        s.alfa_vel = snap((s.alfa_vel * angular).clamp(-rate, rate));
        s.beta_vel = snap((s.beta_vel * angular).clamp(-rate, rate));
        s.x_vel = snap(s.x_vel * linear);
        s.y_vel = snap(s.y_vel * linear);
        s.r_vel = snap(s.r_vel * linear);
        if s.alfa_vel == 0.0 {
            s.alfa = snap(s.alfa);
        }
        if s.beta_vel == 0.0 {
            s.beta = snap(s.beta);
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────

    /// Current state, without advancing the simulation.
    #[inline]
    pub fn state(&self) -> ModelState {
        self.state.snapshot()
    }

    /// Back to rest at the initial line length; counters and accumulator cleared.
    pub fn reset(&mut self) {
        debug!(model_type = %self.config.model_type, "Crane model reset");
        *self = Self::from_valid(self.config.clone());
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Dynamics formulation in use.
    pub fn model_type(&self) -> ModelType {
        self.config.model_type
    }

    /// Stops engaged during the last sub-step.
    pub fn stops(&self) -> AxisStops {
        self.stops
    }

    /// Sub-steps executed since construction or the last reset.
    pub fn substeps(&self) -> u64 {
        self.substeps
    }

    /// Total time discarded by the sub-step cap [s].
    pub fn dropped_time(&self) -> f64 {
        self.dropped_time
    }

    /// Per-axis terms of the last sub-step.
    pub fn terms(&self) -> &StepTerms {
        &self.terms
    }

    /// Full internal state, velocities included.
    pub fn crane_state(&self) -> &CraneState {
        &self.state
    }

    /// Multi-line dump of the internal state for diagnostics.
    pub fn debug_text(&self) -> String {
        let s = &self.state;
        let t = &self.terms;
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "type: {}", self.config.model_type);
        let _ = writeln!(out, "state: {}", s.snapshot());
        let _ = writeln!(
            out,
            "vel: x={:+.4} y={:+.4} r={:+.4} a={:+.4} b={:+.4}",
            s.x_vel, s.y_vel, s.r_vel, s.alfa_vel, s.beta_vel
        );
        for (name, axis) in [("rail", &t.rail), ("cart", &t.cart), ("wind", &t.wind)] {
            let _ = writeln!(
                out,
                "{name}: drive={} friction={} net={}",
                axis.drive, axis.friction, axis.net
            );
        }
        let _ = writeln!(out, "tension: {}", t.tension);
        let _ = write!(
            out,
            "stops: {:?} substeps: {} dropped: {:.3}s",
            self.stops, self.substeps, self.dropped_time
        );
        out
    }
}
