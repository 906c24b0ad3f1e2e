//! Error types shared by the solvers, the resampler and the configuration loader.

use thiserror::Error;

/// Failure of a trajectory computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectileError {
    /// An input was outside its physical domain. Raised before any computation.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The drag integrator ran past its step cap or produced a non-finite state.
    #[error("integration diverged after {steps} steps (t = {time:.2} s) without reaching the ground")]
    NumericDivergence { steps: usize, time: f64 },

    /// The resampler was handed a trajectory with no samples.
    #[error("trajectory has no samples")]
    EmptyTrajectory,

    #[error("unknown object preset: {0}")]
    UnknownPreset(String),
}

impl ProjectileError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ProjectileError::InvalidParameter { name, value, reason }
    }
}

/// Failure while loading a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("unsupported config format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("config validation error: {0}")]
    Invalid(#[from] ProjectileError),
}

pub type Result<T> = std::result::Result<T, ProjectileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = ProjectileError::invalid("speed", -1.0, "must be greater than zero");
        let msg = err.to_string();
        assert!(msg.contains("speed"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_config_error_wraps_projectile_error() {
        let err: ConfigError = ProjectileError::EmptyTrajectory.into();
        assert!(matches!(err, ConfigError::Invalid(ProjectileError::EmptyTrajectory)));
    }
}
