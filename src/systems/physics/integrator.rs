use bevy::prelude::*;
use rand::Rng;

use crate::{
    components::{AircraftProfile, FlightState},
    resources::{NoiseMode, PhysicsConfig, SimulationConfig},
    utils::SimRng,
};

/// Random terms drawn once per tick by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorNoise {
    /// Drag loss subtracted from the climb rate (ft/min).
    pub drag_bias: f64,
    /// Fraction of the wind that becomes a gust.
    pub gust_factor: f64,
}

impl IntegratorNoise {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, physics: &PhysicsConfig) -> Self {
        let (drag_lo, drag_hi) = physics.drag_bias_range;
        let (gust_lo, gust_hi) = physics.gust_factor_range;
        Self {
            drag_bias: rng.gen_range(drag_lo..=drag_hi),
            gust_factor: rng.gen_range(gust_lo..=gust_hi),
        }
    }

    pub fn midpoint(physics: &PhysicsConfig) -> Self {
        let (drag_lo, drag_hi) = physics.drag_bias_range;
        let (gust_lo, gust_hi) = physics.gust_factor_range;
        Self {
            drag_bias: (drag_lo + drag_hi) / 2.0,
            gust_factor: (gust_lo + gust_hi) / 2.0,
        }
    }
}

/// Lift generated at the given airspeed, in pounds.
pub fn lift(airspeed: f64, physics: &PhysicsConfig) -> f64 {
    let speed_fts = airspeed * physics.knots_to_fts;
    0.5 * physics.air_density
        * speed_fts.powi(2)
        * physics.wing_area
        * physics.lift_coefficient
        * physics.lift_conversion
}

/// Advances the state by one physics step of `physics.tick_hours`.
///
/// Values may leave the envelope here; the constraint stage brings them back.
pub fn advance(
    state: &mut FlightState,
    profile: &AircraftProfile,
    physics: &PhysicsConfig,
    noise: &IntegratorNoise,
) {
    let excess_lift = lift(state.airspeed, physics) - state.total_weight;
    let rpm_factor = (state.engine_rpm - physics.reference_rpm) / physics.reference_rpm;

    state.vertical_speed = (excess_lift / state.total_weight * physics.lift_climb_gain
        + rpm_factor * physics.rpm_climb_gain
        - noise.drag_bias)
        * profile.weight_factor;
    state.altitude += state.vertical_speed / 60.0;

    let wind_effect = state.wind_speed * noise.gust_factor;
    state.airspeed += wind_effect;
    state.heading = (state.heading + wind_effect * physics.heading_gust_gain).rem_euclid(360.0);

    state.fuel -= physics.fuel_burn_rate * physics.tick_hours * profile.weight_factor;
    state.distance_remaining -= state.airspeed * physics.knots_to_kmh * physics.tick_hours;
}

pub fn integrator_system(
    mut query: Query<(&AircraftProfile, &mut FlightState)>,
    physics: Res<PhysicsConfig>,
    simulation: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
) {
    for (profile, mut state) in query.iter_mut() {
        let noise = match simulation.noise {
            NoiseMode::Stochastic => IntegratorNoise::sample(&mut rng.integrator, &physics),
            NoiseMode::Midpoint => IntegratorNoise::midpoint(&physics),
        };
        advance(&mut state, profile, &physics, &noise);
    }
}
