use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Upper bound accepted for both the pilot and the cargo weight (lbs).
pub const MAX_LOADOUT_WEIGHT: f64 = 500.0;

/// Fixed airframe constants of the simulated single-engine aircraft.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirframeConfig {
    /// Empty weight (lbs).
    pub base_weight: f64,
    /// Maximum gross weight (lbs).
    pub max_gross_weight: f64,
    /// Service ceiling (ft).
    pub max_altitude: f64,
    /// Usable fuel capacity (gal).
    pub max_fuel: f64,
    /// Engine redline (rpm).
    pub redline_rpm: f64,
    /// Minimum safe altitude (ft).
    pub min_safe_altitude: f64,
    /// Legal CG range (inches aft of datum).
    pub cg_limits: (f64, f64),
    /// Pilot station arm (inches aft of datum).
    pub pilot_arm: f64,
    /// Cargo station arm (inches aft of datum).
    pub cargo_arm: f64,
    /// Arm of the empty weight. Zero leaves the empty airframe out of the moment sum.
    pub base_arm: f64,
    /// Maximum cruise speed (kt).
    pub max_speed: f64,
    /// Stall speed at the reference weight (kt).
    pub reference_stall_speed: f64,
    /// Weight at which `reference_stall_speed` applies (lbs).
    pub stall_reference_weight: f64,
    /// Climb rate at empty weight (ft/min).
    pub base_climb_rate: f64,
}

impl Default for AirframeConfig {
    fn default() -> Self {
        Self {
            base_weight: 1670.0,
            max_gross_weight: 2550.0,
            max_altitude: 14000.0,
            max_fuel: 56.0,
            redline_rpm: 2700.0,
            min_safe_altitude: 1000.0,
            cg_limits: (35.0, 47.3),
            pilot_arm: 37.0,
            cargo_arm: 80.0,
            base_arm: 0.0,
            max_speed: 124.0,
            reference_stall_speed: 48.0,
            stall_reference_weight: 2450.0,
            base_climb_rate: 721.0,
        }
    }
}

impl AirframeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("airframe.base_weight", self.base_weight),
            ("airframe.max_gross_weight", self.max_gross_weight),
            ("airframe.max_altitude", self.max_altitude),
            ("airframe.max_fuel", self.max_fuel),
            ("airframe.redline_rpm", self.redline_rpm),
            ("airframe.min_safe_altitude", self.min_safe_altitude),
            ("airframe.pilot_arm", self.pilot_arm),
            ("airframe.cargo_arm", self.cargo_arm),
            ("airframe.base_arm", self.base_arm),
            ("airframe.max_speed", self.max_speed),
            ("airframe.reference_stall_speed", self.reference_stall_speed),
            ("airframe.base_climb_rate", self.base_climb_rate),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, value));
            }
        }
        if self.base_weight <= 0.0 {
            return Err(ConfigError::invalid("airframe.base_weight", self.base_weight));
        }
        if !self.stall_reference_weight.is_finite() || self.stall_reference_weight <= 0.0 {
            return Err(ConfigError::invalid(
                "airframe.stall_reference_weight",
                self.stall_reference_weight,
            ));
        }
        let (forward, aft) = self.cg_limits;
        if !(forward.is_finite() && aft.is_finite() && forward <= aft) {
            return Err(ConfigError::invalid(
                "airframe.cg_limits",
                format!("{:?}", self.cg_limits),
            ));
        }
        if self.max_fuel < 0.0 || self.max_altitude < 0.0 {
            return Err(ConfigError::invalid(
                "airframe.max_fuel/max_altitude",
                format!("{}/{}", self.max_fuel, self.max_altitude),
            ));
        }
        Ok(())
    }
}

/// Initial conditions of the single leg being flown.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub name: String,
    pub distance_km: f64,
    pub initial_altitude: f64,
    pub initial_airspeed: f64,
    pub initial_heading: f64,
    pub initial_rpm: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            name: "Tokyo".to_string(),
            distance_km: 1147.0,
            initial_altitude: 5000.0,
            initial_airspeed: 124.0,
            initial_heading: 90.0,
            initial_rpm: 2400.0,
        }
    }
}

/// Pilot and cargo weight entered at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub pilot_weight: f64,
    pub cargo_weight: f64,
}

impl Loadout {
    /// Validates the pilot weight against (0, 500] and the cargo weight against [0, 500].
    pub fn new(pilot_weight: f64, cargo_weight: f64) -> Result<Self, ConfigError> {
        let pilot_ok = pilot_weight > 0.0 && pilot_weight <= MAX_LOADOUT_WEIGHT;
        let cargo_ok = (0.0..=MAX_LOADOUT_WEIGHT).contains(&cargo_weight);
        if !(pilot_ok && cargo_ok) {
            return Err(ConfigError::InvalidLoadout(format!(
                "Weights must be between 0 and {} lbs (pilot {}, cargo {})",
                MAX_LOADOUT_WEIGHT, pilot_weight, cargo_weight
            )));
        }
        Ok(Self {
            pilot_weight,
            cargo_weight,
        })
    }
}
