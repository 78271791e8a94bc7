use copilot::{
    components::{AircraftProfile, FlightState},
    systems::MIN_ENGINE_RPM,
};

/// Assert that every bounded quantity lies inside the aircraft's envelope
#[track_caller]
pub fn assert_state_within_envelope(state: &FlightState, profile: &AircraftProfile) {
    assert!(
        state.airspeed >= profile.stall_speed && state.airspeed <= profile.max_speed,
        "Airspeed {} outside [{}, {}]",
        state.airspeed,
        profile.stall_speed,
        profile.max_speed
    );
    assert!(
        state.fuel >= 0.0 && state.fuel <= profile.max_fuel,
        "Fuel {} outside [0, {}]",
        state.fuel,
        profile.max_fuel
    );
    assert!(
        state.altitude >= 0.0 && state.altitude <= profile.max_altitude,
        "Altitude {} outside [0, {}]",
        state.altitude,
        profile.max_altitude
    );
    assert!(
        state.engine_rpm >= MIN_ENGINE_RPM && state.engine_rpm <= profile.redline_rpm,
        "RPM {} outside [{}, {}]",
        state.engine_rpm,
        MIN_ENGINE_RPM,
        profile.redline_rpm
    );
    assert!(
        state.vertical_speed.abs() <= profile.max_climb_rate,
        "Vertical speed {} exceeds {}",
        state.vertical_speed,
        profile.max_climb_rate
    );
    assert!(
        state.distance_remaining >= 0.0,
        "Distance remaining is negative"
    );
    assert!(
        (0.0..360.0).contains(&state.heading),
        "Heading {} outside [0, 360)",
        state.heading
    );
    assert!(state.wind_speed >= 0.0, "Negative wind {}", state.wind_speed);
}

/// Assert that fuel never increased between two consecutive ticks
#[track_caller]
pub fn assert_fuel_not_increasing(previous: &FlightState, current: &FlightState) {
    assert!(
        current.fuel <= previous.fuel,
        "Fuel increased from {} to {}",
        previous.fuel,
        current.fuel
    );
}
