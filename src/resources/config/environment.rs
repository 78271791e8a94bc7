use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Magnitudes of the per-tick environmental perturbations.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Uniform airspeed jitter half-width (kt).
    pub airspeed_jitter: f64,
    /// Uniform engine RPM jitter half-width (rpm).
    pub rpm_jitter: f64,
    /// Upper bound of the wind drawn while the weather is not clear (kt).
    pub max_wind_speed: f64,
    /// Chance per tick that the weather regime is resampled.
    pub weather_change_probability: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            airspeed_jitter: 3.0,
            rpm_jitter: 50.0,
            max_wind_speed: 30.0,
            weather_change_probability: 0.15,
        }
    }
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.weather_change_probability) {
            return Err(ConfigError::invalid(
                "environment.weather_change_probability",
                self.weather_change_probability,
            ));
        }
        for (name, value) in [
            ("environment.airspeed_jitter", self.airspeed_jitter),
            ("environment.rpm_jitter", self.rpm_jitter),
            ("environment.max_wind_speed", self.max_wind_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(name, value));
            }
        }
        Ok(())
    }
}
