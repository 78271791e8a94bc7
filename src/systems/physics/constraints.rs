use bevy::prelude::*;

use crate::components::{AircraftProfile, FlightState};

/// Lowest engine speed the clamp allows.
pub const MIN_ENGINE_RPM: f64 = 1000.0;

// Lower bound first, then upper, so an inverted range resolves to `upper`
fn bound(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// Pulls every bounded quantity back into the aircraft's envelope.
///
/// Idempotent: clamping an already clamped state changes nothing.
pub fn clamp(state: &mut FlightState, profile: &AircraftProfile) {
    state.airspeed = bound(state.airspeed, profile.stall_speed, profile.max_speed);
    state.fuel = bound(state.fuel, 0.0, profile.max_fuel);
    state.altitude = bound(state.altitude, 0.0, profile.max_altitude);
    state.engine_rpm = bound(state.engine_rpm, MIN_ENGINE_RPM, profile.redline_rpm);
    state.vertical_speed = bound(
        state.vertical_speed,
        -profile.max_climb_rate,
        profile.max_climb_rate,
    );
    state.distance_remaining = state.distance_remaining.max(0.0);
}

pub fn constraint_system(mut query: Query<(&AircraftProfile, &mut FlightState)>) {
    for (profile, mut state) in query.iter_mut() {
        clamp(&mut state, profile);
    }
}
