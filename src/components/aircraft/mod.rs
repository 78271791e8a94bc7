mod profile;
mod state;

pub use profile::AircraftProfile;
pub use state::{FlightState, WeatherSeverity};
