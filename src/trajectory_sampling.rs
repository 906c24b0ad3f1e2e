//! Resampling of two trajectories onto one shared playback clock.
//!
//! The solvers produce trajectories of different lengths and durations. A
//! renderer animating both needs them on a single uniform time grid; this
//! module builds that grid and interpolates each trajectory onto it.

use log::trace;
use nalgebra::Vector2;

use crate::error::{ProjectileError, Result};
use crate::trajectory::Trajectory;

/// Two trajectories sampled on the same uniform time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledPair {
    times: Vec<f64>,
    first: Vec<Vector2<f64>>,
    second: Vec<Vector2<f64>>,
}

impl ResampledPair {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Positions of the first input trajectory, one per grid time.
    pub fn first(&self) -> &[Vector2<f64>] {
        &self.first
    }

    /// Positions of the second input trajectory, one per grid time.
    pub fn second(&self) -> &[Vector2<f64>] {
        &self.second
    }

    /// Length of the shared clock in seconds.
    pub fn duration(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Playback frames in time order. Each call starts a fresh pass.
    pub fn frames(&self) -> Frames<'_> {
        Frames { pair: self, index: 0 }
    }
}

/// One tick of the shared clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub time: f64,
    pub first: Vector2<f64>,
    pub second: Vector2<f64>,
}

/// Iterator over the frames of a [`ResampledPair`]
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    pair: &'a ResampledPair,
    index: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let i = self.index;
        let time = *self.pair.times.get(i)?;
        self.index += 1;
        Some(Frame {
            index: i,
            time,
            first: self.pair.first[i],
            second: self.pair.second[i],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pair.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Frames<'a> {}

/// `count` evenly spaced instants from 0 to `end` inclusive. The last one is exactly `end`.
pub fn uniform_grid(end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = count - 1;
            (0..count)
                .map(|i| if i == last { end } else { i as f64 * end / last as f64 })
                .collect()
        }
    }
}

/// Linear interpolation over sorted `x_vals`, clamped to the end values outside the range.
fn interpolate(x_vals: &[f64], y_vals: &[f64], x: f64) -> f64 {
    if x_vals.is_empty() || x_vals.len() != y_vals.len() {
        return 0.0;
    }

    if x <= x_vals[0] {
        return y_vals[0];
    }

    let n = x_vals.len();
    if x >= x_vals[n - 1] {
        return y_vals[n - 1];
    }

    // First index with x_vals[idx] > x. A NaN on either side leaves it at 0.
    let idx = x_vals.partition_point(|&v| v <= x);
    if idx == 0 {
        return y_vals[0];
    }
    if idx >= n {
        return y_vals[n - 1];
    }
    let (x0, x1) = (x_vals[idx - 1], x_vals[idx]);
    let (y0, y1) = (y_vals[idx - 1], y_vals[idx]);

    if x == x0 {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

struct Columns {
    t: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Columns {
    fn of(trajectory: &Trajectory) -> Result<Self> {
        if trajectory.is_empty() {
            return Err(ProjectileError::EmptyTrajectory);
        }
        Ok(Self {
            t: trajectory.times(),
            x: trajectory.xs(),
            y: trajectory.ys(),
        })
    }

    fn at(&self, t: f64) -> Vector2<f64> {
        Vector2::new(interpolate(&self.t, &self.x, t), interpolate(&self.t, &self.y, t))
    }
}

/// Position of `trajectory` at time `t`.
///
/// Before launch this is the launch point; after the last sample the
/// projectile stays at rest where it landed.
pub fn position_at(trajectory: &Trajectory, t: f64) -> Result<Vector2<f64>> {
    Ok(Columns::of(trajectory)?.at(t))
}

/// Put two trajectories on one uniform clock of `frames` ticks spanning the
/// longer of the two flights.
///
/// x(t) and y(t) are interpolated independently and linearly, so recorded
/// samples are reproduced exactly and nothing overshoots. The shorter flight
/// holds its final position once it has ended.
pub fn resample(first: &Trajectory, second: &Trajectory, frames: usize) -> Result<ResampledPair> {
    if frames == 0 {
        return Err(ProjectileError::invalid(
            "frames",
            0.0,
            "at least one frame is required",
        ));
    }
    let a = Columns::of(first)?;
    let b = Columns::of(second)?;

    let end = first.duration().max(second.duration());
    let times = uniform_grid(end, frames);

    trace!(
        "resample: {} + {} samples onto {} frames over {:.3} s",
        first.len(),
        second.len(),
        frames,
        end
    );

    Ok(ResampledPair {
        first: times.iter().map(|&t| a.at(t)).collect(),
        second: times.iter().map(|&t| b.at(t)).collect(),
        times,
    })
}
