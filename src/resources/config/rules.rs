use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Priority weights of the advisory rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub low_altitude: f64,
    pub low_fuel: f64,
    pub speed_risk: f64,
    pub weather: f64,
    pub stability: f64,
    pub engine: f64,
    pub weight: f64,
    pub cg: f64,
    pub distance: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            low_altitude: 0.9,
            low_fuel: 0.8,
            speed_risk: 0.7,
            weather: 0.6,
            stability: 0.5,
            engine: 0.4,
            weight: 0.3,
            cg: 0.2,
            distance: 0.1,
        }
    }
}

/// Rule weights together with the thresholds the rules compare against.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub weights: RuleWeights,
    /// Classifier score above which the critical advisory is raised.
    pub critical_score: f64,
    /// Priority of the classifier advisory.
    pub critical_priority: f64,
    pub fuel_critical: f64,
    pub fuel_low: f64,
    pub fuel_low_scale: f64,
    /// Margin above stall speed that counts as near-stall (kt).
    pub stall_margin: f64,
    /// Margin below max speed that counts as high speed (kt).
    pub overspeed_margin: f64,
    pub overspeed_scale: f64,
    pub storm_scale: f64,
    /// Fraction of the max climb rate above which vertical speed is flagged.
    pub stability_fraction: f64,
    pub high_rpm: f64,
    /// Distance remaining below which the approach advisory fires (km).
    pub approach_distance: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            weights: RuleWeights::default(),
            critical_score: 0.8,
            critical_priority: 1.0,
            fuel_critical: 5.0,
            fuel_low: 10.0,
            fuel_low_scale: 0.7,
            stall_margin: 10.0,
            overspeed_margin: 20.0,
            overspeed_scale: 0.8,
            storm_scale: 1.2,
            stability_fraction: 0.7,
            high_rpm: 2600.0,
            approach_distance: 50.0,
        }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.critical_score) {
            return Err(ConfigError::invalid(
                "rules.critical_score",
                self.critical_score,
            ));
        }
        if self.fuel_critical > self.fuel_low {
            return Err(ConfigError::invalid(
                "rules.fuel_critical",
                format!("{} > fuel_low {}", self.fuel_critical, self.fuel_low),
            ));
        }
        Ok(())
    }
}
