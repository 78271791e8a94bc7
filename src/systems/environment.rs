use bevy::prelude::*;
use rand::Rng;

use crate::{
    components::{FlightState, WeatherSeverity},
    resources::{EnvironmentConfig, NoiseMode, SimulationConfig},
    utils::SimRng,
};

/// One tick's environmental disturbance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    /// kt
    pub airspeed_jitter: f64,
    /// rpm
    pub rpm_jitter: f64,
    /// Wind applied when the weather is not clear (kt).
    pub wind_speed: f64,
    /// New weather regime, when this tick resamples it.
    pub weather_change: Option<WeatherSeverity>,
}

impl Perturbation {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, config: &EnvironmentConfig) -> Self {
        let airspeed_jitter = rng.gen_range(-config.airspeed_jitter..=config.airspeed_jitter);
        let rpm_jitter = rng.gen_range(-config.rpm_jitter..=config.rpm_jitter);
        let wind_speed = rng.gen_range(0.0..=config.max_wind_speed);
        let weather_change = rng
            .gen_bool(config.weather_change_probability)
            .then(|| WeatherSeverity::ALL[rng.gen_range(0..WeatherSeverity::ALL.len())]);

        Self {
            airspeed_jitter,
            rpm_jitter,
            wind_speed,
            weather_change,
        }
    }

    /// Every draw replaced by the midpoint of its range; the weather never changes.
    pub fn midpoint(config: &EnvironmentConfig) -> Self {
        Self {
            airspeed_jitter: 0.0,
            rpm_jitter: 0.0,
            wind_speed: config.max_wind_speed / 2.0,
            weather_change: None,
        }
    }
}

/// Applies the disturbance. Bounds are left to the constraint stage.
///
/// Wind follows the weather in force at the start of the tick; a resampled
/// regime only affects the wind from the next tick on.
pub fn perturb(state: &mut FlightState, perturbation: &Perturbation) {
    state.airspeed += perturbation.airspeed_jitter;
    state.engine_rpm += perturbation.rpm_jitter;

    state.wind_speed = if state.weather_severity.is_clear() {
        0.0
    } else {
        perturbation.wind_speed
    };

    if let Some(weather) = perturbation.weather_change {
        if weather != state.weather_severity {
            debug!(
                "Weather changed from {} to {}",
                state.weather_severity, weather
            );
        }
        state.weather_severity = weather;
    }
}

pub fn environment_system(
    mut query: Query<&mut FlightState>,
    config: Res<EnvironmentConfig>,
    simulation: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
) {
    for mut state in query.iter_mut() {
        let perturbation = match simulation.noise {
            NoiseMode::Stochastic => Perturbation::sample(&mut rng.environment, &config),
            NoiseMode::Midpoint => Perturbation::midpoint(&config),
        };
        perturb(&mut state, &perturbation);
    }
}
