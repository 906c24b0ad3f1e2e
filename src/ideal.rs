//! Closed-form drag-free trajectory.
//!
//! Horizontal motion is uniform and vertical motion is uniformly
//! decelerated, so every sample is evaluated directly from the launch
//! state with no integration.

use log::debug;
use nalgebra::Vector2;

use crate::error::{ProjectileError, Result};
use crate::params::LaunchParameters;
use crate::trajectory::{Trajectory, TrajectoryPoint};

/// Time until the projectile returns to height 0.
///
/// Positive root of `h0 + vy·t − ½g·t² = 0`. The discriminant `vy² + 2g·h0`
/// is never negative for validated input.
pub fn flight_time(launch: &LaunchParameters) -> Result<f64> {
    launch.validate()?;
    Ok(flight_time_unchecked(launch))
}

/// Peak height `h0 + vy²/(2g)`.
pub fn apex_height(launch: &LaunchParameters) -> Result<f64> {
    launch.validate()?;
    let (_, vy) = launch.velocity_components();
    Ok(launch.height + vy * vy / (2.0 * launch.gravity))
}

fn flight_time_unchecked(launch: &LaunchParameters) -> f64 {
    let (_, vy) = launch.velocity_components();
    let g = launch.gravity;
    let disc = vy * vy + 2.0 * g * launch.height;
    (vy + disc.sqrt()) / g
}

fn point_at(launch: &LaunchParameters, vx: f64, vy: f64, t: f64) -> TrajectoryPoint {
    let g = launch.gravity;
    TrajectoryPoint::new(
        t,
        Vector2::new(vx * t, launch.height + vy * t - 0.5 * g * t * t),
        Vector2::new(vx, vy - g * t),
    )
}

/// Sample the drag-free trajectory at `samples` evenly spaced instants from
/// launch to ground crossing. The last sample sits exactly on the analytic
/// flight time.
///
/// A launch that is already on the ground with no upward velocity (0° from
/// height 0) has zero flight time and yields the launch point alone.
pub fn solve_ideal(launch: &LaunchParameters, samples: usize) -> Result<Trajectory> {
    launch.validate()?;
    if samples < 2 {
        return Err(ProjectileError::invalid(
            "samples",
            samples as f64,
            "at least two samples are required",
        ));
    }

    let (vx, vy) = launch.velocity_components();
    let t_flight = flight_time_unchecked(launch);

    // A subnormal flight time cannot be split into distinct sample times
    if t_flight < f64::MIN_POSITIVE {
        debug!("ideal: zero flight time for {:?}", launch);
        return Ok(Trajectory::from_points(vec![point_at(launch, vx, vy, 0.0)]));
    }

    let last = samples - 1;
    let points: Vec<TrajectoryPoint> = (0..samples)
        .map(|k| {
            let t = if k == last {
                t_flight
            } else {
                k as f64 * t_flight / last as f64
            };
            point_at(launch, vx, vy, t)
        })
        .collect();

    debug!(
        "ideal: {} samples, flight time {:.4} s, range {:.3} m",
        points.len(),
        t_flight,
        vx * t_flight
    );

    Ok(Trajectory::from_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_IDEAL_SAMPLES;

    #[test]
    fn test_reference_launch() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        let trajectory = solve_ideal(&launch, DEFAULT_IDEAL_SAMPLES).unwrap();

        assert_eq!(trajectory.len(), DEFAULT_IDEAL_SAMPLES);
        assert!((trajectory.duration() - 7.208020).abs() < 1e-5);
        assert!((trajectory.range() - 254.841998).abs() < 1e-4);
        // Sampled apex is within one sample spacing of the analytic one
        assert!((trajectory.max_height() - 63.710499).abs() < 0.01);
        assert!((apex_height(&launch).unwrap() - 63.710499).abs() < 1e-5);
    }

    #[test]
    fn test_endpoints() {
        let launch = LaunchParameters::new(30.0, 30.0, 12.0);
        let trajectory = solve_ideal(&launch, 50).unwrap();

        let first = trajectory.first().unwrap();
        assert_eq!(first.time, 0.0);
        assert_eq!(first.x(), 0.0);
        assert_eq!(first.y(), 12.0);

        let last = trajectory.last().unwrap();
        assert!(last.y().abs() < 1e-9);
        assert_eq!(last.time, flight_time(&launch).unwrap());
    }

    #[test]
    fn test_horizontal_velocity_is_constant() {
        let launch = LaunchParameters::new(42.0, 63.0, 5.0);
        let trajectory = solve_ideal(&launch, 120).unwrap();
        let (vx, _) = launch.velocity_components();

        for w in trajectory.points().windows(2) {
            let rate = (w[1].x() - w[0].x()) / (w[1].time - w[0].time);
            assert!((rate - vx).abs() < 1e-9);
        }
    }

    #[test]
    fn test_flat_launch_from_ground() {
        let launch = LaunchParameters::new(20.0, 0.0, 0.0);
        let trajectory = solve_ideal(&launch, DEFAULT_IDEAL_SAMPLES).unwrap();
        assert_eq!(trajectory.len(), 1);
        assert!(trajectory.points().iter().all(|p| p.y() <= 0.0));
        assert_eq!(trajectory.duration(), 0.0);
    }

    #[test]
    fn test_vanishing_angle_collapses_to_launch_point() {
        let launch = LaunchParameters::new(50.0, 1e-320, 0.0);
        assert!(flight_time(&launch).unwrap() < f64::MIN_POSITIVE);

        let trajectory = solve_ideal(&launch, DEFAULT_IDEAL_SAMPLES).unwrap();
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.first().unwrap().time, 0.0);
    }

    #[test]
    fn test_flat_launch_from_height() {
        // t = sqrt(2h/g)
        let launch = LaunchParameters::new(10.0, 0.0, 19.62);
        assert!((flight_time(&launch).unwrap() - 2.0).abs() < 1e-12);
        let trajectory = solve_ideal(&launch, 3).unwrap();
        assert!((trajectory.range() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let launch = LaunchParameters::new(10.0, 45.0, 0.0);
        assert!(matches!(
            solve_ideal(&launch, 1),
            Err(ProjectileError::InvalidParameter { name: "samples", .. })
        ));
        assert!(solve_ideal(&LaunchParameters::new(10.0, 95.0, 0.0), 10).is_err());
        assert!(flight_time(&LaunchParameters::new(-1.0, 45.0, 0.0)).is_err());
    }

    #[test]
    fn test_deterministic() {
        let launch = LaunchParameters::new(33.3, 71.0, 2.5).with_gravity(3.71);
        assert_eq!(solve_ideal(&launch, 77).unwrap(), solve_ideal(&launch, 77).unwrap());
    }
}
