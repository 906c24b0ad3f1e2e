use nalgebra::Vector2;

use crate::error::{ProjectileError, Result};

/// Single trajectory sample. `position` is (downrange, height), `velocity` likewise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl TrajectoryPoint {
    pub fn new(time: f64, position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        Self { time, position, velocity }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Headline numbers of a flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySummary {
    pub time_of_flight: f64,
    pub max_range: f64,
    pub max_height: f64,
    pub impact_speed: f64,
    pub points: usize,
}

/// Time-ordered samples of one flight, starting at the launch point.
///
/// Built once by a solver and read-only afterwards. Times are strictly
/// increasing and the first sample is at t = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Wrap externally recorded samples. Sample times must be finite, start
    /// at 0 and be strictly increasing.
    pub fn new(points: Vec<TrajectoryPoint>) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| !p.time.is_finite()) {
            return Err(ProjectileError::invalid(
                "time",
                p.time,
                "sample times must be finite",
            ));
        }
        if let Some(p) = points.first().filter(|p| p.time != 0.0) {
            return Err(ProjectileError::invalid(
                "time",
                p.time,
                "the first sample must be at t = 0",
            ));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].time >= w[1].time) {
            return Err(ProjectileError::invalid(
                "time",
                w[1].time,
                "sample times must be strictly increasing",
            ));
        }
        Ok(Self { points })
    }

    pub(crate) fn from_points(points: Vec<TrajectoryPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time < w[1].time));
        Self { points }
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Time of the final sample, 0 for an empty trajectory.
    pub fn duration(&self) -> f64 {
        self.last().map_or(0.0, |p| p.time)
    }

    /// Downrange distance of the final sample.
    pub fn range(&self) -> f64 {
        self.last().map_or(0.0, |p| p.x())
    }

    /// Sample with the greatest height (first one on ties).
    pub fn apex(&self) -> Option<&TrajectoryPoint> {
        self.points
            .iter()
            .fold(None, |best: Option<&TrajectoryPoint>, p| match best {
                Some(b) if b.y() >= p.y() => Some(b),
                _ => Some(p),
            })
    }

    pub fn max_height(&self) -> f64 {
        self.apex().map_or(0.0, |p| p.y())
    }

    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x()).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y()).collect()
    }

    pub fn summary(&self) -> TrajectorySummary {
        TrajectorySummary {
            time_of_flight: self.duration(),
            max_range: self.range(),
            max_height: self.max_height(),
            impact_speed: self.last().map_or(0.0, |p| p.speed()),
            points: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
