use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::resources::{AirframeConfig, Loadout};

/// Performance envelope of the aircraft for one loadout.
///
/// Built once at startup and never mutated afterwards.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    /// Empty weight (lbs).
    pub base_weight: f64,
    /// Empty weight plus pilot and cargo (lbs).
    pub total_weight: f64,
    pub max_gross_weight: f64,
    /// ft
    pub max_altitude: f64,
    /// gal
    pub max_fuel: f64,
    pub redline_rpm: f64,
    /// ft
    pub min_safe_altitude: f64,
    /// Inches aft of datum.
    pub cg_position: f64,
    pub cg_limits: (f64, f64),
    /// `total_weight / base_weight`, scales climb and fuel burn.
    pub weight_factor: f64,
    /// kt
    pub stall_speed: f64,
    /// kt
    pub max_speed: f64,
    /// ft/min
    pub max_climb_rate: f64,
}

impl AircraftProfile {
    /// Derives the envelope from an already validated loadout.
    pub fn new(loadout: &Loadout, airframe: &AirframeConfig) -> Self {
        let Loadout {
            pilot_weight,
            cargo_weight,
        } = *loadout;

        let total_weight = airframe.base_weight + pilot_weight + cargo_weight;
        let cg_position = (pilot_weight * airframe.pilot_arm
            + cargo_weight * airframe.cargo_arm
            + airframe.base_weight * airframe.base_arm)
            / total_weight;
        let weight_factor = total_weight / airframe.base_weight;
        let stall_speed = airframe.reference_stall_speed
            * (total_weight / airframe.stall_reference_weight).sqrt();
        let max_climb_rate = airframe.base_climb_rate / weight_factor;

        let profile = Self {
            base_weight: airframe.base_weight,
            total_weight,
            max_gross_weight: airframe.max_gross_weight,
            max_altitude: airframe.max_altitude,
            max_fuel: airframe.max_fuel,
            redline_rpm: airframe.redline_rpm,
            min_safe_altitude: airframe.min_safe_altitude,
            cg_position,
            cg_limits: airframe.cg_limits,
            weight_factor,
            stall_speed,
            max_speed: airframe.max_speed,
            max_climb_rate,
        };

        info!(
            "Aircraft profile: total weight {:.0} lbs, CG {:.1} in, stall {:.1} kt, max climb {:.0} ft/min",
            profile.total_weight, profile.cg_position, profile.stall_speed, profile.max_climb_rate
        );
        if profile.has_inverted_speed_envelope() {
            warn!(
                "Stall speed {:.1} kt exceeds max speed {:.1} kt; airspeed will be pinned to max speed",
                profile.stall_speed, profile.max_speed
            );
        }

        profile
    }

    /// True when the loadout pushes the stall speed above the max cruise speed.
    pub fn has_inverted_speed_envelope(&self) -> bool {
        self.stall_speed > self.max_speed
    }

    pub fn cg_within_limits(&self, cg_position: f64) -> bool {
        (self.cg_limits.0..=self.cg_limits.1).contains(&cg_position)
    }
}

impl Default for AircraftProfile {
    fn default() -> Self {
        let loadout = Loadout {
            pilot_weight: 170.0,
            cargo_weight: 0.0,
        };
        Self::new(&loadout, &AirframeConfig::default())
    }
}
