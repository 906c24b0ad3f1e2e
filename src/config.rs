//! Simulation configuration
//!
//! Everything a comparison run needs, as one explicit value. Loadable from
//! TOML or JSON; every field falls back to its default when omitted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::comparison::CompareOptions;
use crate::constants::{
    DEFAULT_IDEAL_SAMPLES, DEFAULT_MAX_STEPS, DEFAULT_PLAYBACK_FRAMES, DEFAULT_TIME_STEP_S,
    STANDARD_AIR_DENSITY,
};
use crate::error::{ConfigError, ProjectileError};
use crate::params::{require_positive, LaunchParameters, ObjectProperties};
use crate::presets::ObjectPreset;

/// Either a named preset or explicit object properties, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "ObjectTable")]
pub enum ObjectSpec {
    Preset { preset: ObjectPreset },
    Properties(ObjectProperties),
}

/// The `[object]` table as written, before deciding which form it takes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectTable {
    preset: Option<ObjectPreset>,
    mass: Option<f64>,
    radius: Option<f64>,
    drag_coefficient: Option<f64>,
    air_density: Option<f64>,
}

impl TryFrom<ObjectTable> for ObjectSpec {
    type Error = String;

    fn try_from(table: ObjectTable) -> Result<Self, Self::Error> {
        let ObjectTable {
            preset,
            mass,
            radius,
            drag_coefficient,
            air_density,
        } = table;
        let explicit = mass.is_some()
            || radius.is_some()
            || drag_coefficient.is_some()
            || air_density.is_some();

        match (preset, mass, radius, drag_coefficient) {
            (Some(_), ..) if explicit => Err(
                "`preset` cannot be combined with explicit object properties".to_string(),
            ),
            (Some(preset), ..) => Ok(ObjectSpec::Preset { preset }),
            (None, Some(mass), Some(radius), Some(drag_coefficient)) => {
                let properties = ObjectProperties::new(mass, radius, drag_coefficient)
                    .with_air_density(air_density.unwrap_or(STANDARD_AIR_DENSITY));
                Ok(ObjectSpec::Properties(properties))
            }
            _ => Err(
                "object needs either `preset` or all of `mass`, `radius` and `drag_coefficient`"
                    .to_string(),
            ),
        }
    }
}

impl ObjectSpec {
    pub fn properties(&self) -> ObjectProperties {
        match self {
            ObjectSpec::Preset { preset } => preset.properties(),
            ObjectSpec::Properties(properties) => *properties,
        }
    }
}

impl Default for ObjectSpec {
    fn default() -> Self {
        ObjectSpec::Preset {
            preset: ObjectPreset::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub launch: LaunchParameters,
    pub object: ObjectSpec,
    /// Samples of the ideal trajectory
    pub ideal_samples: usize,
    /// Drag integration step (s)
    pub time_step: f64,
    pub max_steps: usize,
    /// Ticks on the shared playback clock
    pub frames: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            launch: LaunchParameters::default(),
            object: ObjectSpec::default(),
            ideal_samples: DEFAULT_IDEAL_SAMPLES,
            time_step: DEFAULT_TIME_STEP_S,
            max_steps: DEFAULT_MAX_STEPS,
            frames: DEFAULT_PLAYBACK_FRAMES,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a `.toml` or `.json` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProjectileError> {
        self.launch.validate()?;
        self.object.properties().validate()?;
        if self.ideal_samples < 2 {
            return Err(ProjectileError::invalid(
                "ideal_samples",
                self.ideal_samples as f64,
                "at least two samples are required",
            ));
        }
        if self.frames == 0 {
            return Err(ProjectileError::invalid(
                "frames",
                0.0,
                "at least one frame is required",
            ));
        }
        require_positive("time_step", self.time_step)
    }

    pub fn object_properties(&self) -> ObjectProperties {
        self.object.properties()
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            ideal_samples: self.ideal_samples,
            time_step: self.time_step,
            max_steps: self.max_steps,
        }
    }
}
