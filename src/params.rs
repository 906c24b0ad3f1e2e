//! Launch and object parameters, with the validation both solvers run before computing.

use serde::{Deserialize, Serialize};

use crate::constants::{G_ACCEL_MPS2, MAX_LAUNCH_ANGLE_DEG, STANDARD_AIR_DENSITY};
use crate::error::{ProjectileError, Result};

/// How the projectile leaves the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    pub speed: f64,     // m/s
    pub angle_deg: f64, // degrees above horizontal
    pub height: f64,    // m
    pub gravity: f64,   // m/s²
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            speed: 50.0,
            angle_deg: 45.0,
            height: 0.0,
            gravity: G_ACCEL_MPS2,
        }
    }
}

impl LaunchParameters {
    /// Launch with standard gravity.
    pub fn new(speed: f64, angle_deg: f64, height: f64) -> Self {
        Self {
            speed,
            angle_deg,
            height,
            gravity: G_ACCEL_MPS2,
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Initial (horizontal, vertical) velocity components in m/s.
    pub fn velocity_components(&self) -> (f64, f64) {
        let theta = self.angle_deg.to_radians();
        (self.speed * theta.cos(), self.speed * theta.sin())
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("speed", self.speed)?;
        require_finite("angle_deg", self.angle_deg)?;
        if !(0.0..=MAX_LAUNCH_ANGLE_DEG).contains(&self.angle_deg) {
            return Err(ProjectileError::invalid(
                "angle_deg",
                self.angle_deg,
                "must be within [0, 90] degrees",
            ));
        }
        require_finite("height", self.height)?;
        if self.height < 0.0 {
            return Err(ProjectileError::invalid(
                "height",
                self.height,
                "must not be negative",
            ));
        }
        require_positive("gravity", self.gravity)
    }
}

/// Physical properties of the projectile, used only by the drag model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperties {
    pub mass: f64,   // kg
    pub radius: f64, // m
    pub drag_coefficient: f64,
    #[serde(default = "default_air_density")]
    pub air_density: f64, // kg/m³
}

fn default_air_density() -> f64 {
    STANDARD_AIR_DENSITY
}

impl ObjectProperties {
    /// Object in air of standard sea-level density.
    pub fn new(mass: f64, radius: f64, drag_coefficient: f64) -> Self {
        Self {
            mass,
            radius,
            drag_coefficient,
            air_density: STANDARD_AIR_DENSITY,
        }
    }

    pub fn with_air_density(mut self, air_density: f64) -> Self {
        self.air_density = air_density;
        self
    }

    /// Frontal area of the sphere, π·r².
    pub fn cross_sectional_area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("mass", self.mass)?;
        require_positive("radius", self.radius)?;
        require_positive("drag_coefficient", self.drag_coefficient)?;
        require_positive("air_density", self.air_density)
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectileError::invalid(name, value, "must be a finite number"))
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ProjectileError::invalid(name, value, "must be greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_name(result: Result<()>) -> &'static str {
        match result {
            Err(ProjectileError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_default_launch_is_valid() {
        assert!(LaunchParameters::default().validate().is_ok());
    }

    #[test]
    fn test_launch_rejects_out_of_domain_values() {
        assert_eq!(invalid_name(LaunchParameters::new(0.0, 45.0, 0.0).validate()), "speed");
        assert_eq!(invalid_name(LaunchParameters::new(-5.0, 45.0, 0.0).validate()), "speed");
        assert_eq!(invalid_name(LaunchParameters::new(10.0, -0.1, 0.0).validate()), "angle_deg");
        assert_eq!(invalid_name(LaunchParameters::new(10.0, 90.5, 0.0).validate()), "angle_deg");
        assert_eq!(invalid_name(LaunchParameters::new(10.0, 45.0, -1.0).validate()), "height");
        assert_eq!(
            invalid_name(LaunchParameters::new(10.0, 45.0, 0.0).with_gravity(0.0).validate()),
            "gravity"
        );
        assert_eq!(invalid_name(LaunchParameters::new(f64::NAN, 45.0, 0.0).validate()), "speed");
        assert_eq!(
            invalid_name(LaunchParameters::new(10.0, 45.0, f64::INFINITY).validate()),
            "height"
        );
    }

    #[test]
    fn test_launch_accepts_angle_bounds() {
        assert!(LaunchParameters::new(10.0, 0.0, 0.0).validate().is_ok());
        assert!(LaunchParameters::new(10.0, 90.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_velocity_components() {
        let (vx, vy) = LaunchParameters::new(50.0, 45.0, 0.0).velocity_components();
        assert!((vx - 35.355339).abs() < 1e-5);
        assert!((vy - 35.355339).abs() < 1e-5);

        let (vx, vy) = LaunchParameters::new(20.0, 0.0, 0.0).velocity_components();
        assert_eq!(vx, 20.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_object_rejects_non_positive_values() {
        assert_eq!(invalid_name(ObjectProperties::new(0.0, 0.1, 0.47).validate()), "mass");
        assert_eq!(invalid_name(ObjectProperties::new(1.0, -0.1, 0.47).validate()), "radius");
        assert_eq!(
            invalid_name(ObjectProperties::new(1.0, 0.1, 0.0).validate()),
            "drag_coefficient"
        );
        assert_eq!(
            invalid_name(ObjectProperties::new(1.0, 0.1, 0.47).with_air_density(0.0).validate()),
            "air_density"
        );
    }

    #[test]
    fn test_cross_sectional_area() {
        let object = ObjectProperties::new(50.0, 0.15, 0.47);
        assert!((object.cross_sectional_area() - 0.0706858).abs() < 1e-6);
    }

    #[test]
    fn test_air_density_defaults_when_deserialized() {
        let object: ObjectProperties =
            serde_json::from_str(r#"{"mass": 0.43, "radius": 0.11, "drag_coefficient": 0.25}"#)
                .unwrap();
        assert_eq!(object.air_density, STANDARD_AIR_DENSITY);
    }
}
