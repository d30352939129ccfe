//! Frame loop.
//!
//! Each segment is cut into frames of `run.frame_time` (the last one
//! shortened to land exactly on the segment end) and handed to
//! [`Model::update_fixed`]. Every `output_every` frames, and after the last
//! frame, a [`Sample`] goes to the sink.

use crane_common::model::ModelState;
use crane_model::Model;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SimError;
use crate::scenario::ScenarioConfig;

/// Frames shorter than this are dropped when cutting segments.
const TIME_EPSILON: f64 = 1e-12;

/// One output record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Simulated time at the end of the frame [s].
    pub time: f64,
    /// Index of the segment the frame belongs to.
    pub segment: usize,
    /// Raw [`AxisStops`](crane_model::AxisStops) bits.
    pub stops: u8,
    #[serde(flatten)]
    pub state: ModelState,
}

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub frames: u64,
    pub substeps: u64,
    pub samples: u64,
    /// Time discarded by the sub-step cap [s].
    pub dropped_time: f64,
    pub final_state: ModelState,
}

/// Run `scenario` to completion, handing samples to `sink`.
///
/// # Errors
/// Configuration errors before the first frame; any error returned by `sink`.
pub fn run_scenario<F>(scenario: &ScenarioConfig, mut sink: F) -> Result<Summary, SimError>
where
    F: FnMut(&Sample) -> Result<(), SimError>,
{
    scenario.validate()?;
    let mut model = Model::new(scenario.model.clone())?;
    let run = &scenario.run;

    info!(
        model_type = %scenario.model.model_type,
        segments = scenario.segments.len(),
        duration = scenario.duration(),
        "Scenario started"
    );

    let mut time = 0.0;
    let mut frames = 0u64;
    let mut samples = 0u64;
    let mut last: Option<Sample> = None;

    for (index, segment) in scenario.segments.iter().enumerate() {
        debug!(
            segment = index,
            rail = %segment.rail,
            cart = %segment.cart,
            wind = %segment.wind,
            "Segment"
        );
        let mut elapsed = 0.0;
        while segment.duration - elapsed > TIME_EPSILON {
            let dt = run.frame_time.min(segment.duration - elapsed);
            let state =
                model.update_fixed(run.fixed_time, dt, segment.rail, segment.cart, segment.wind);
            elapsed += dt;
            time += dt;
            frames += 1;

            let sample = Sample {
                time,
                segment: index,
                stops: model.stops().bits(),
                state,
            };
            if frames % u64::from(run.output_every) == 0 {
                sink(&sample)?;
                samples += 1;
                last = None;
            } else {
                last = Some(sample);
            }
        }
    }

    // Always end on the final state.
    if let Some(sample) = last {
        sink(&sample)?;
        samples += 1;
    }

    let summary = Summary {
        frames,
        substeps: model.substeps(),
        samples,
        dropped_time: model.dropped_time(),
        final_state: model.state(),
    };
    info!(
        frames = summary.frames,
        substeps = summary.substeps,
        "Scenario finished: {}",
        summary.final_state
    );
    debug!("{}", model.debug_text());
    Ok(summary)
}
