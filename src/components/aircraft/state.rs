use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::AircraftProfile;
use crate::resources::{FeatureVector, RouteConfig};

/// Weather regime the aircraft is flying through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WeatherSeverity {
    #[default]
    Clear,
    Turbulent,
    Storm,
}

impl WeatherSeverity {
    pub const ALL: [WeatherSeverity; 3] = [
        WeatherSeverity::Clear,
        WeatherSeverity::Turbulent,
        WeatherSeverity::Storm,
    ];

    /// Numeric encoding used in the classifier feature vector.
    pub fn code(self) -> u8 {
        match self {
            WeatherSeverity::Clear => 0,
            WeatherSeverity::Turbulent => 1,
            WeatherSeverity::Storm => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherSeverity::Clear => "Clear",
            WeatherSeverity::Turbulent => "Turbulent",
            WeatherSeverity::Storm => "Storm",
        }
    }

    pub fn is_clear(self) -> bool {
        self == WeatherSeverity::Clear
    }
}

impl fmt::Display for WeatherSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The live flight state, advanced once per tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// ft
    pub altitude: f64,
    /// kt
    pub airspeed: f64,
    /// gal
    pub fuel: f64,
    /// deg, [0, 360)
    pub heading: f64,
    /// ft/min
    pub vertical_speed: f64,
    pub weather_severity: WeatherSeverity,
    pub engine_rpm: f64,
    /// kt
    pub wind_speed: f64,
    /// lbs, carried from the profile.
    pub total_weight: f64,
    /// Inches aft of datum, carried from the profile.
    pub cg_position: f64,
    /// km to destination.
    pub distance_remaining: f64,
}

impl FlightState {
    /// Initial state at the start of the route: full tanks, clear weather, level flight.
    pub fn from_profile(profile: &AircraftProfile, route: &RouteConfig) -> Self {
        Self {
            altitude: route.initial_altitude,
            airspeed: route.initial_airspeed,
            fuel: profile.max_fuel,
            heading: route.initial_heading,
            vertical_speed: 0.0,
            weather_severity: WeatherSeverity::Clear,
            engine_rpm: route.initial_rpm,
            wind_speed: 0.0,
            total_weight: profile.total_weight,
            cg_position: profile.cg_position,
            distance_remaining: route.distance_km,
        }
    }

    /// Classifier input in raw units:
    /// altitude, airspeed, fuel, vertical speed, weather code, rpm, wind,
    /// total weight, CG, distance remaining.
    pub fn features(&self) -> FeatureVector {
        FeatureVector::from_column_slice(&[
            self.altitude,
            self.airspeed,
            self.fuel,
            self.vertical_speed,
            f64::from(self.weather_severity.code()),
            self.engine_rpm,
            self.wind_speed,
            self.total_weight,
            self.cg_position,
            self.distance_remaining,
        ])
    }
}
