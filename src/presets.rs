//! Named object property sets for quick comparisons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjectileError;
use crate::params::ObjectProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectPreset {
    /// Generic 1 kg ball, the starting point for hand-tuned values
    #[default]
    Custom,
    PingPongBall,
    Cannonball,
    SoccerBall,
}

impl ObjectPreset {
    pub const ALL: [ObjectPreset; 4] = [
        ObjectPreset::Custom,
        ObjectPreset::PingPongBall,
        ObjectPreset::Cannonball,
        ObjectPreset::SoccerBall,
    ];

    pub fn properties(self) -> ObjectProperties {
        match self {
            ObjectPreset::Custom => ObjectProperties::new(1.0, 0.1, 0.47),
            ObjectPreset::PingPongBall => ObjectProperties::new(0.0027, 0.02, 0.5),
            ObjectPreset::Cannonball => ObjectProperties::new(50.0, 0.15, 0.47),
            ObjectPreset::SoccerBall => ObjectProperties::new(0.43, 0.11, 0.25),
        }
    }

    /// Canonical name, as accepted by `FromStr` and the config file.
    pub fn name(self) -> &'static str {
        match self {
            ObjectPreset::Custom => "custom",
            ObjectPreset::PingPongBall => "ping-pong-ball",
            ObjectPreset::Cannonball => "cannonball",
            ObjectPreset::SoccerBall => "soccer-ball",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectPreset::Custom => "Custom",
            ObjectPreset::PingPongBall => "Ping-pong ball",
            ObjectPreset::Cannonball => "Cannonball",
            ObjectPreset::SoccerBall => "Soccer ball",
        }
    }
}

impl fmt::Display for ObjectPreset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ObjectPreset {
    type Err = ProjectileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "custom" => Ok(ObjectPreset::Custom),
            "ping-pong-ball" | "ping-pong" | "pingpong" => Ok(ObjectPreset::PingPongBall),
            "cannonball" | "cannon-ball" | "cannon" => Ok(ObjectPreset::Cannonball),
            "soccer-ball" | "soccer" | "football" => Ok(ObjectPreset::SoccerBall),
            _ => Err(ProjectileError::UnknownPreset(s.to_string())),
        }
    }
}
