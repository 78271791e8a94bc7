use approx::assert_relative_eq;
use copilot::components::{AdvisoryRule, AdvisorySource, FlightStatus, WeatherSeverity};
use pretty_assertions::assert_eq;

use crate::common::{
    assert_fuel_not_increasing, assert_state_within_envelope, create_midpoint_config, first_tick,
    TestAppBuilder,
};

#[test]
fn test_single_midpoint_tick() {
    let mut app = TestAppBuilder::new()
        .with_config(create_midpoint_config())
        .with_loadout(170.0, 50.0)
        .build();
    let expected = first_tick(170.0, 50.0);

    app.run_steps(1);
    let state = app.state();

    assert_relative_eq!(
        state.altitude,
        5000.0 + expected.raw_vertical_speed / 60.0,
        epsilon = 1e-6
    );
    // The raw climb rate is far beyond the envelope, so the clamp pins it
    assert_relative_eq!(state.vertical_speed, expected.max_climb_rate, epsilon = 1e-9);
    assert_relative_eq!(state.airspeed, 124.0);
    assert_relative_eq!(state.heading, 90.0);
    assert_relative_eq!(state.engine_rpm, 2400.0);
    assert_relative_eq!(
        state.fuel,
        56.0 - 8.4 * 0.00833 * expected.weight_factor,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        state.distance_remaining,
        1147.0 - 124.0 * 1.852 * 0.00833,
        epsilon = 1e-9
    );
    assert_eq!(state.weather_severity, WeatherSeverity::Clear);
    assert_eq!(state.wind_speed, 0.0);

    let log = app.log().clone();
    assert_eq!(log.ticks, 1);
    assert_eq!(log.stable_ticks, 0);
    assert_eq!(log.status, FlightStatus::Running);
}

#[test]
fn test_single_midpoint_tick_advisories() {
    let mut app = TestAppBuilder::new()
        .with_config(create_midpoint_config())
        .with_loadout(170.0, 50.0)
        .build();

    app.run_steps(1);
    let advisories = app.advisories();

    let sources: Vec<_> = advisories.iter().map(|a| a.source).collect();
    assert_eq!(
        sources,
        vec![
            AdvisorySource::Rule(AdvisoryRule::Speed),
            AdvisorySource::Rule(AdvisoryRule::Stability),
            AdvisorySource::Rule(AdvisoryRule::CenterOfGravity),
        ]
    );
    assert_eq!(advisories[0].message, "High speed: Reduce throttle!");
    assert_relative_eq!(advisories[0].priority, 0.56, epsilon = 1e-12);
    assert_relative_eq!(advisories[1].priority, 0.5);
    assert_relative_eq!(advisories[2].priority, 0.2);
}

#[test]
fn test_envelope_and_fuel_hold_every_tick() {
    for seed in [1, 17, 2024] {
        let mut app = TestAppBuilder::new()
            .with_seed(seed)
            .with_loadout(210.0, 320.0)
            .build();
        app.run_steps(1);
        let profile = app.profile();
        let mut previous = app.state();

        while app.log().is_running() {
            app.run_steps(1);
            let state = app.state();
            assert_state_within_envelope(&state, &profile);
            assert_fuel_not_increasing(&previous, &state);
            previous = state;
            assert!(app.log().ticks < 5000, "flight never terminated");
        }
    }
}

#[test]
fn test_same_seed_same_flight() {
    let run = |seed: u64| {
        let mut app = TestAppBuilder::new().with_seed(seed).build();
        app.run_steps(100);
        (app.state(), app.advisories())
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99).0, run(100).0);
}

#[test]
fn test_profile_matches_loadout() {
    let mut app = TestAppBuilder::new().with_loadout(200.0, 100.0).build();
    app.run_steps(1);

    let profile = app.profile();
    assert_relative_eq!(profile.total_weight, 1970.0);
    assert_relative_eq!(profile.weight_factor, 1970.0 / 1670.0, epsilon = 1e-12);

    let state = app.state();
    assert_eq!(state.total_weight, profile.total_weight);
    assert_eq!(state.cg_position, profile.cg_position);
}
