pub mod airframe;
pub mod environment;
mod errors;
pub mod physics;
pub mod rules;
pub mod simulation;

pub use airframe::{AirframeConfig, Loadout, RouteConfig, MAX_LOADOUT_WEIGHT};
pub use environment::EnvironmentConfig;
pub use errors::ConfigError;
pub use physics::PhysicsConfig;
pub use rules::{RuleConfig, RuleWeights};
pub use simulation::{NoiseMode, SimulationConfig};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The complete configuration surface of the simulator.
///
/// Every section falls back to its defaults, so a YAML file only needs the
/// values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotConfig {
    pub airframe: AirframeConfig,
    pub route: RouteConfig,
    pub physics: PhysicsConfig,
    pub environment: EnvironmentConfig,
    pub rules: RuleConfig,
    pub simulation: SimulationConfig,
}

impl CopilotConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: CopilotConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.airframe.validate()?;
        self.physics.validate()?;
        self.environment.validate()?;
        self.rules.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    pub fn with_noise(mut self, noise: NoiseMode) -> Self {
        self.simulation.noise = noise;
        self
    }
}
