//! # Projectile Engine
//!
//! Ideal (drag-free) and quadratic-drag projectile trajectories, plus
//! resampling of both onto one clock for synchronized playback.

// Re-export the main types and functions
pub use comparison::{compare, CompareOptions, Comparison};
pub use config::{ObjectSpec, SimulationConfig};
pub use drag::{simulate_drag, DragSimulator};
pub use error::{ConfigError, ProjectileError, Result};
pub use ideal::{apex_height, flight_time, solve_ideal};
pub use params::{LaunchParameters, ObjectProperties};
pub use presets::ObjectPreset;
pub use trajectory::{Trajectory, TrajectoryPoint, TrajectorySummary};
pub use trajectory_sampling::{position_at, resample, Frame, Frames, ResampledPair};

// Module declarations
pub mod constants;
mod comparison;
mod config;
mod drag;
mod error;
mod ideal;
mod params;
mod presets;
mod trajectory;
mod trajectory_sampling;
