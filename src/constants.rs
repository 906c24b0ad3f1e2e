/// Physical constants and numerical limits used by the trajectory solvers

/// Default gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Standard air density at sea level (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Fixed integration step of the drag simulator, in seconds
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;

/// Number of evenly spaced samples produced by the ideal solver
pub const DEFAULT_IDEAL_SAMPLES: usize = 300;

/// Number of frames on the shared playback grid
pub const DEFAULT_PLAYBACK_FRAMES: usize = 200;

/// Upper bound on drag integration steps.
///
/// At the default step this is 10 000 s of simulated flight, far beyond
/// anything a valid launch produces. Hitting it means the parameters describe
/// effectively unbounded flight.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Largest accepted launch angle in degrees
pub const MAX_LAUNCH_ANGLE_DEG: f64 = 90.0;

// Numerical stability constants
/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Speeds below this are treated as rest when resolving the drag direction
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-12;
