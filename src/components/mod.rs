pub mod advisory;
pub mod aircraft;
pub mod termination;

pub use advisory::{
    Advisories, Advisory, AdvisoryRule, AdvisorySource, Criticality, CRITICAL_MESSAGE,
};
pub use aircraft::{AircraftProfile, FlightState, WeatherSeverity};
pub use termination::{FlightStatus, TerminationReason};
