use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// How the random draws of the tick stages are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Draw from the seeded RNG streams.
    #[default]
    Stochastic,
    /// Replace every draw with the midpoint of its range.
    Midpoint,
}

/// Loop pacing, termination and presentation settings.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wall-clock interval between ticks (s).
    pub tick_interval_secs: f64,
    /// Empty-advisory ticks required to end the flight as stable.
    pub stable_tick_limit: u32,
    /// Advisories shown by the display.
    pub display_count: usize,
    pub seed: Option<u64>,
    pub noise: NoiseMode,
    /// Classifier latency above which a warning is logged (ms).
    pub classifier_budget_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 0.5,
            stable_tick_limit: 10,
            display_count: 3,
            seed: None,
            noise: NoiseMode::Stochastic,
            classifier_budget_ms: 50,
        }
    }
}

impl SimulationConfig {
    /// Fails for negative, non-finite or out-of-range intervals.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.tick_interval_secs).map_err(|_| {
            ConfigError::invalid("simulation.tick_interval_secs", self.tick_interval_secs)
        })
    }

    pub fn classifier_budget(&self) -> Duration {
        Duration::from_millis(self.classifier_budget_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tick_interval()?;
        Ok(())
    }
}
