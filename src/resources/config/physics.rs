use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Constants of the pseudo-physics state update.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// kg/m^3
    pub air_density: f64,
    /// ft^2
    pub wing_area: f64,
    pub lift_coefficient: f64,
    /// Scales the mixed-unit lift product into lbs.
    pub lift_conversion: f64,
    /// gal/h
    pub fuel_burn_rate: f64,
    /// Physics step in hours (~30 s).
    pub tick_hours: f64,
    pub knots_to_fts: f64,
    pub knots_to_kmh: f64,
    /// RPM at which the engine neither adds nor removes climb.
    pub reference_rpm: f64,
    /// Climb contribution of a 100% RPM excess (ft/min).
    pub rpm_climb_gain: f64,
    /// Climb contribution of a 100% lift excess (ft/min).
    pub lift_climb_gain: f64,
    /// Drag/inefficiency subtracted from the vertical speed each tick (ft/min).
    pub drag_bias_range: (f64, f64),
    /// Fraction of the wind speed applied to airspeed as a gust.
    pub gust_factor_range: (f64, f64),
    /// Fraction of the gust applied to the heading (deg per kt).
    pub heading_gust_gain: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            air_density: 1.225,
            wing_area: 174.0,
            lift_coefficient: 1.2,
            lift_conversion: 0.0689476,
            fuel_burn_rate: 8.4,
            tick_hours: 0.00833,
            knots_to_fts: 1.68781,
            knots_to_kmh: 1.852,
            reference_rpm: 2400.0,
            rpm_climb_gain: 500.0,
            lift_climb_gain: 1000.0,
            drag_bias_range: (50.0, 100.0),
            gust_factor_range: (-0.1, 0.1),
            heading_gust_gain: 0.5,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference_rpm.is_finite() || self.reference_rpm <= 0.0 {
            return Err(ConfigError::invalid(
                "physics.reference_rpm",
                self.reference_rpm,
            ));
        }
        if !self.tick_hours.is_finite() || self.tick_hours <= 0.0 {
            return Err(ConfigError::invalid("physics.tick_hours", self.tick_hours));
        }
        for (name, (low, high)) in [
            ("physics.drag_bias_range", self.drag_bias_range),
            ("physics.gust_factor_range", self.gust_factor_range),
        ] {
            if !(low.is_finite() && high.is_finite() && low <= high) {
                return Err(ConfigError::invalid(name, format!("{:?}", (low, high))));
            }
        }
        Ok(())
    }
}
