//! Text rendering of flight snapshots for the terminal display.

use std::fmt;

use crate::components::{FlightStatus, TerminationReason};
use crate::resources::FlightSnapshot;

/// Rendered status panel and recommendation list for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status: String,
    pub recommendations: String,
}

impl StatusReport {
    /// Renders `snapshot`, listing at most `display_count` advisories.
    pub fn new(snapshot: &FlightSnapshot, destination: &str, display_count: usize) -> Self {
        let state = &snapshot.state;
        let status = format!(
            "ALT: {:.0} ft | SPD: {:.1} kt\n\
             FUEL: {:.1} gal | VS: {:.0} fpm\n\
             RPM: {:.0} | WIND: {:.1} kt\n\
             WEATHER: {}\n\
             WEIGHT: {:.0} lbs | CG: {:.1} in\n\
             REMAINING: {:.0} km to {}",
            state.altitude,
            state.airspeed,
            state.fuel,
            state.vertical_speed,
            state.engine_rpm,
            state.wind_speed,
            state.weather_severity.label(),
            state.total_weight,
            state.cg_position,
            state.distance_remaining,
            destination,
        );

        let recommendations = match snapshot.status {
            FlightStatus::Terminated(reason) => banner(reason).to_string(),
            FlightStatus::Running => {
                let mut text = String::from("AI Recommendations:\n");
                if snapshot.advisories.is_empty() {
                    text.push_str("Conditions nominal.");
                } else {
                    for advisory in snapshot.advisories.iter().take(display_count) {
                        text.push_str(&format!(
                            "[{:.2}] {}\n",
                            advisory.priority, advisory.message
                        ));
                    }
                }
                text
            }
        };

        Self {
            status,
            recommendations,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status)?;
        write!(f, "{}", self.recommendations.trim_end())
    }
}

/// Final message shown in place of the recommendations.
pub fn banner(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::NoFuel => "NO FUEL: Emergency landing required!",
        TerminationReason::Arrived => "ARRIVED AT DESTINATION: Prepare to land.",
        TerminationReason::Stable => "STABLE FLIGHT ACHIEVED.",
        TerminationReason::ClassifierFailure => "CLASSIFIER FAILURE: Advisories unavailable.",
        TerminationReason::Cancelled => "SIMULATION CANCELLED.",
    }
}
