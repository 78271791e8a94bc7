use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{AircraftProfile, FlightState, WeatherSeverity};
use crate::resources::RuleConfig;

pub const CRITICAL_MESSAGE: &str = "CRITICAL: Immediate action required!";

/// Where an advisory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorySource {
    Classifier,
    Rule(AdvisoryRule),
}

/// A prioritised recommendation. Priority is a rule weight, not a probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub priority: f64,
    pub message: String,
    pub source: AdvisorySource,
}

impl Advisory {
    pub fn new(priority: f64, message: impl Into<String>, source: AdvisorySource) -> Self {
        Self {
            priority,
            message: message.into(),
            source,
        }
    }

    pub fn critical(rules: &RuleConfig) -> Self {
        Self::new(
            rules.critical_priority,
            CRITICAL_MESSAGE,
            AdvisorySource::Classifier,
        )
    }
}

/// The rule checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryRule {
    LowAltitude,
    Fuel,
    Speed,
    Weather,
    Stability,
    Engine,
    Weight,
    CenterOfGravity,
    Distance,
}

impl AdvisoryRule {
    pub const ALL: [AdvisoryRule; 9] = [
        AdvisoryRule::LowAltitude,
        AdvisoryRule::Fuel,
        AdvisoryRule::Speed,
        AdvisoryRule::Weather,
        AdvisoryRule::Stability,
        AdvisoryRule::Engine,
        AdvisoryRule::Weight,
        AdvisoryRule::CenterOfGravity,
        AdvisoryRule::Distance,
    ];

    /// Evaluates the rule, returning at most one advisory.
    ///
    /// Fuel and speed are two-tier checks: the more severe tier wins and the
    /// milder one is skipped.
    pub fn check(
        self,
        state: &FlightState,
        profile: &AircraftProfile,
        rules: &RuleConfig,
    ) -> Option<Advisory> {
        let weights = &rules.weights;
        let fired = |priority: f64, message: &str| {
            Some(Advisory::new(priority, message, AdvisorySource::Rule(self)))
        };

        match self {
            AdvisoryRule::LowAltitude => {
                if state.altitude < profile.min_safe_altitude {
                    return fired(weights.low_altitude, "LOW ALT: Climb immediately!");
                }
            }
            AdvisoryRule::Fuel => {
                if state.fuel < rules.fuel_critical {
                    return fired(weights.low_fuel, "FUEL CRITICAL: Divert to nearest airport!");
                } else if state.fuel < rules.fuel_low {
                    return fired(
                        weights.low_fuel * rules.fuel_low_scale,
                        "Fuel low: Plan landing soon.",
                    );
                }
            }
            AdvisoryRule::Speed => {
                if state.airspeed < profile.stall_speed + rules.stall_margin {
                    return fired(weights.speed_risk, "NEAR STALL: Increase power!");
                } else if state.airspeed > profile.max_speed - rules.overspeed_margin {
                    return fired(
                        weights.speed_risk * rules.overspeed_scale,
                        "High speed: Reduce throttle!",
                    );
                }
            }
            AdvisoryRule::Weather => match state.weather_severity {
                WeatherSeverity::Clear => {}
                WeatherSeverity::Turbulent => {
                    return fired(weights.weather, "TURBULENCE: Maintain stable flight.");
                }
                WeatherSeverity::Storm => {
                    return fired(
                        weights.weather * rules.storm_scale,
                        "STORM: Consider changing route.",
                    );
                }
            },
            AdvisoryRule::Stability => {
                if state.vertical_speed.abs() > profile.max_climb_rate * rules.stability_fraction {
                    return fired(weights.stability, "High VS: Adjust pitch or power.");
                }
            }
            AdvisoryRule::Engine => {
                if state.engine_rpm > rules.high_rpm {
                    return fired(weights.engine, "High RPM: Reduce throttle to avoid damage.");
                }
            }
            AdvisoryRule::Weight => {
                if state.total_weight > profile.max_gross_weight {
                    return fired(
                        weights.weight,
                        "OVER MAX WEIGHT: Performance severely impacted.",
                    );
                }
            }
            AdvisoryRule::CenterOfGravity => {
                if !profile.cg_within_limits(state.cg_position) {
                    return fired(weights.cg, "CG OUT OF LIMITS: Unsafe load distribution!");
                }
            }
            AdvisoryRule::Distance => {
                if state.distance_remaining < rules.approach_distance {
                    return fired(weights.distance, "APPROACHING destination: Prepare landing.");
                }
            }
        }

        None
    }
}

/// Ranked advisories produced by the latest tick, highest priority first.
#[derive(Component, Debug, Clone, Default, PartialEq, Deref, Serialize, Deserialize)]
pub struct Advisories(pub Vec<Advisory>);

/// Latest classifier score for the aircraft.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, Serialize, Deserialize)]
pub struct Criticality(pub f64);
