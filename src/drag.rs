//! Quadratic-drag trajectory by fixed-step semi-implicit Euler integration.

use log::{debug, warn};
use nalgebra::Vector2;

use crate::constants::{DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S, MIN_VELOCITY_THRESHOLD};
use crate::error::{ProjectileError, Result};
use crate::params::{require_positive, LaunchParameters, ObjectProperties};
use crate::trajectory::{Trajectory, TrajectoryPoint};

/// Acceleration from gravity plus a drag force `½·ρ·v²·Cd·A` opposing the velocity.
///
/// The `1/|v|` of the direction vector is folded into the coefficient, so the
/// drag term is `k·v` with `k = ½·ρ·|v|·Cd·A`.
pub fn drag_acceleration(
    velocity: &Vector2<f64>,
    object: &ObjectProperties,
    area: f64,
    gravity: f64,
) -> Vector2<f64> {
    let speed = velocity.norm();
    let gravity_accel = Vector2::new(0.0, -gravity);
    if speed < MIN_VELOCITY_THRESHOLD {
        return gravity_accel;
    }
    let k = 0.5 * object.air_density * speed * object.drag_coefficient * area;
    gravity_accel - velocity * (k / object.mass)
}

/// Drag trajectory solver
pub struct DragSimulator {
    launch: LaunchParameters,
    object: ObjectProperties,
    time_step: f64,
    max_steps: usize,
}

impl DragSimulator {
    pub fn new(launch: LaunchParameters, object: ObjectProperties) -> Self {
        Self {
            launch,
            object,
            time_step: DEFAULT_TIME_STEP_S,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn set_time_step(&mut self, step: f64) {
        self.time_step = step;
    }

    pub fn set_max_steps(&mut self, steps: usize) {
        self.max_steps = steps;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    fn validate(&self) -> Result<()> {
        self.launch.validate()?;
        self.object.validate()?;
        require_positive("time_step", self.time_step)
    }

    /// Integrate until the projectile would drop below the ground.
    ///
    /// The step that takes the height negative is discarded, so every
    /// returned sample has y ≥ 0 and the final one is the last step above
    /// ground rather than the exact impact point.
    pub fn simulate(&self) -> Result<Trajectory> {
        self.validate()?;

        let dt = self.time_step;
        let g = self.launch.gravity;
        let area = self.object.cross_sectional_area();
        let (vx, vy) = self.launch.velocity_components();

        let mut position = Vector2::new(0.0, self.launch.height);
        let mut velocity = Vector2::new(vx, vy);
        let mut points = vec![TrajectoryPoint::new(0.0, position, velocity)];

        let mut steps = 0usize;
        loop {
            if steps >= self.max_steps {
                warn!(
                    "drag: step cap of {} reached at t = {:.2} s, height {:.3} m",
                    self.max_steps,
                    steps as f64 * dt,
                    position.y
                );
                return Err(ProjectileError::NumericDivergence {
                    steps,
                    time: steps as f64 * dt,
                });
            }

            let acceleration = drag_acceleration(&velocity, &self.object, area, g);
            velocity += acceleration * dt;
            position += velocity * dt;
            steps += 1;
            let time = steps as f64 * dt;

            if !(position.x.is_finite() && position.y.is_finite() && velocity.norm().is_finite()) {
                warn!("drag: non-finite state after {} steps", steps);
                return Err(ProjectileError::NumericDivergence { steps, time });
            }

            if position.y < 0.0 {
                break;
            }

            points.push(TrajectoryPoint::new(time, position, velocity));
        }

        debug!(
            "drag: {} samples over {} steps, flight time {:.2} s, range {:.3} m",
            points.len(),
            steps,
            points.last().map_or(0.0, |p| p.time),
            points.last().map_or(0.0, |p| p.x())
        );

        Ok(Trajectory::from_points(points))
    }
}

/// Drag trajectory with the default 0.01 s step and step cap.
pub fn simulate_drag(launch: &LaunchParameters, object: &ObjectProperties) -> Result<Trajectory> {
    DragSimulator::new(*launch, *object).simulate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ideal::solve_ideal;

    fn cannonball() -> ObjectProperties {
        ObjectProperties::new(50.0, 0.15, 0.47)
    }

    fn ping_pong() -> ObjectProperties {
        ObjectProperties::new(0.0027, 0.02, 0.5)
    }

    #[test]
    fn test_drag_acceleration_opposes_velocity() {
        let object = ObjectProperties::new(1.0, 0.1, 0.47);
        let area = object.cross_sectional_area();
        let velocity = Vector2::new(30.0, -40.0);
        let a = drag_acceleration(&velocity, &object, area, 9.81);

        let k = 0.5 * 1.225 * 50.0 * 0.47 * area;
        assert!((a.x - (-k * 30.0)).abs() < 1e-12);
        assert!((a.y - (-9.81 + k * 40.0)).abs() < 1e-12);
    }

    #[test]
    fn test_drag_acceleration_at_rest_is_gravity() {
        let object = ObjectProperties::new(1.0, 0.1, 0.47);
        let a = drag_acceleration(&Vector2::zeros(), &object, object.cross_sectional_area(), 9.81);
        assert_eq!(a, Vector2::new(0.0, -9.81));
    }

    #[test]
    fn test_starts_at_launch_point() {
        let launch = LaunchParameters::new(50.0, 30.0, 10.0);
        let trajectory = simulate_drag(&launch, &cannonball()).unwrap();
        let first = trajectory.first().unwrap();
        assert_eq!(first.time, 0.0);
        assert_eq!(first.x(), 0.0);
        assert_eq!(first.y(), 10.0);
    }

    #[test]
    fn test_all_samples_above_ground_with_fixed_step() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        let trajectory = simulate_drag(&launch, &cannonball()).unwrap();

        assert!(trajectory.points().iter().all(|p| p.y() >= 0.0));
        for (i, p) in trajectory.points().iter().enumerate() {
            assert!((p.time - i as f64 * DEFAULT_TIME_STEP_S).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ping_pong_ball_falls_well_short() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        let ideal = solve_ideal(&launch, 300).unwrap();
        let drag = simulate_drag(&launch, &ping_pong()).unwrap();

        assert!(drag.range() < ideal.range());
        assert!(drag.duration() < ideal.duration());
        assert!(drag.range() < 20.0);
    }

    #[test]
    fn test_cannonball_is_near_ideal() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        let ideal = solve_ideal(&launch, 300).unwrap();
        let drag = simulate_drag(&launch, &cannonball()).unwrap();

        assert!(drag.range() < ideal.range());
        assert!(drag.range() > 0.9 * ideal.range());
        assert!(drag.max_height() <= ideal.max_height());
    }

    #[test]
    fn test_flat_launch_from_ground_keeps_only_launch_point() {
        let launch = LaunchParameters::new(50.0, 0.0, 0.0);
        let trajectory = simulate_drag(&launch, &cannonball()).unwrap();
        assert_eq!(trajectory.len(), 1);
    }

    #[test]
    fn test_step_cap_reports_divergence() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        let mut simulator = DragSimulator::new(launch, cannonball());
        simulator.set_max_steps(10);

        match simulator.simulate() {
            Err(ProjectileError::NumericDivergence { steps, time }) => {
                assert_eq!(steps, 10);
                assert!((time - 0.1).abs() < 1e-12);
            }
            other => panic!("expected NumericDivergence, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        let launch = LaunchParameters::new(50.0, 45.0, 0.0);
        assert!(simulate_drag(&launch, &ObjectProperties::new(-1.0, 0.1, 0.47)).is_err());
        assert!(simulate_drag(&LaunchParameters::new(50.0, 45.0, -2.0), &cannonball()).is_err());

        let mut simulator = DragSimulator::new(launch, cannonball());
        simulator.set_time_step(0.0);
        assert!(matches!(
            simulator.simulate(),
            Err(ProjectileError::InvalidParameter { name: "time_step", .. })
        ));
    }

    #[test]
    fn test_smaller_step_converges() {
        let launch = LaunchParameters::new(40.0, 60.0, 0.0);
        let coarse = simulate_drag(&launch, &cannonball()).unwrap();
        let mut fine = DragSimulator::new(launch, cannonball());
        fine.set_time_step(0.001);
        let fine = fine.simulate().unwrap();

        assert!((coarse.range() - fine.range()).abs() / fine.range() < 0.02);
    }

    #[test]
    fn test_deterministic() {
        let launch = LaunchParameters::new(27.0, 38.0, 1.5);
        let object = ObjectProperties::new(0.43, 0.11, 0.25);
        assert_eq!(
            simulate_drag(&launch, &object).unwrap(),
            simulate_drag(&launch, &object).unwrap()
        );
    }
}
