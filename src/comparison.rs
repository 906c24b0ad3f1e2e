//! Side-by-side ideal vs. drag flight for one launch.

use log::debug;

use crate::constants::{DEFAULT_IDEAL_SAMPLES, DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S};
use crate::drag::DragSimulator;
use crate::error::Result;
use crate::ideal::solve_ideal;
use crate::params::{LaunchParameters, ObjectProperties};
use crate::trajectory::{Trajectory, TrajectorySummary};
use crate::trajectory_sampling::{resample, ResampledPair};

/// Solver settings for a comparison run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    pub ideal_samples: usize,
    pub time_step: f64,
    pub max_steps: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ideal_samples: DEFAULT_IDEAL_SAMPLES,
            time_step: DEFAULT_TIME_STEP_S,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Both flights of one launch. Deltas are drag minus ideal.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub ideal: Trajectory,
    pub drag: Trajectory,
}

impl Comparison {
    pub fn ideal_summary(&self) -> TrajectorySummary {
        self.ideal.summary()
    }

    pub fn drag_summary(&self) -> TrajectorySummary {
        self.drag.summary()
    }

    pub fn range_delta(&self) -> f64 {
        self.drag.range() - self.ideal.range()
    }

    pub fn height_delta(&self) -> f64 {
        self.drag.max_height() - self.ideal.max_height()
    }

    pub fn flight_time_delta(&self) -> f64 {
        self.drag.duration() - self.ideal.duration()
    }

    /// Playback grid with the ideal flight first and the drag flight second.
    pub fn resample(&self, frames: usize) -> Result<ResampledPair> {
        resample(&self.ideal, &self.drag, frames)
    }
}

/// Solve both models for the same launch.
///
/// The two solves share nothing, so they run as independent rayon tasks.
pub fn compare(
    launch: &LaunchParameters,
    object: &ObjectProperties,
    options: &CompareOptions,
) -> Result<Comparison> {
    let mut simulator = DragSimulator::new(*launch, *object);
    simulator.set_time_step(options.time_step);
    simulator.set_max_steps(options.max_steps);

    let (ideal, drag) = rayon::join(
        || solve_ideal(launch, options.ideal_samples),
        || simulator.simulate(),
    );
    let comparison = Comparison {
        ideal: ideal?,
        drag: drag?,
    };

    debug!(
        "compare: range delta {:.3} m, height delta {:.3} m",
        comparison.range_delta(),
        comparison.height_delta()
    );

    Ok(comparison)
}
