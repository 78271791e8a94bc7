use bevy::app::AppExit;
use copilot::{
    components::{FlightState, FlightStatus, TerminationReason, CRITICAL_MESSAGE},
    resources::{Classifier, FixedScoreClassifier},
};
use pretty_assertions::assert_eq;

use crate::common::{create_midpoint_config, create_quiet_config, TestAppBuilder};

#[test]
fn test_quiet_flight_terminates_stable() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .build();

    app.run_steps(1);
    assert!(app.advisories().is_empty());

    let steps = app.run_to_termination(100) + 1;

    assert_eq!(steps, 10);
    let log = app.log().clone();
    assert_eq!(log.ticks, 10);
    assert_eq!(log.stable_ticks, 10);
    assert_eq!(log.status, FlightStatus::Terminated(TerminationReason::Stable));
    assert!(matches!(app.exit_requested(), Some(AppExit::Success)));
}

#[test]
fn test_stable_count_survives_advisory_ticks() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .build();

    app.run_steps(5);
    assert_eq!(app.log().stable_ticks, 5);

    let legal_cg = app.state().cg_position;
    app.query_single_mut::<FlightState>().unwrap().cg_position = 60.0;
    app.run_steps(2);
    assert_eq!(app.log().stable_ticks, 5);
    assert!(!app.advisories().is_empty());

    app.query_single_mut::<FlightState>().unwrap().cg_position = legal_cg;
    app.run_steps(4);
    assert_eq!(app.log().stable_ticks, 9);
    assert!(app.log().is_running());

    app.run_steps(1);
    assert_eq!(app.log().ticks, 12);
    assert_eq!(
        app.log().status,
        FlightStatus::Terminated(TerminationReason::Stable)
    );
}

#[test]
fn test_empty_tank_terminates_no_fuel() {
    let mut config = create_midpoint_config();
    config.airframe.max_fuel = 0.05;
    let mut app = TestAppBuilder::new().with_config(config).build();

    app.run_steps(1);

    let state = app.state();
    assert_eq!(state.fuel, 0.0);
    assert_eq!(
        app.log().status,
        FlightStatus::Terminated(TerminationReason::NoFuel)
    );
    assert!(app
        .advisories()
        .iter()
        .any(|a| a.message == "FUEL CRITICAL: Divert to nearest airport!"));
}

#[test]
fn test_no_fuel_wins_over_arrival() {
    let mut config = create_midpoint_config();
    config.airframe.max_fuel = 0.05;
    config.route.distance_km = 1.0;
    let mut app = TestAppBuilder::new().with_config(config).build();

    app.run_steps(1);

    assert_eq!(app.state().distance_remaining, 0.0);
    assert_eq!(
        app.log().status,
        FlightStatus::Terminated(TerminationReason::NoFuel)
    );
}

#[test]
fn test_short_route_arrives() {
    let mut config = create_quiet_config();
    config.route.distance_km = 10.0;
    let mut app = TestAppBuilder::new().with_config(config).build();

    // 90 kt covers about 1.39 km per tick
    let steps = app.run_to_termination(100);

    assert_eq!(steps, 8);
    assert_eq!(app.state().distance_remaining, 0.0);
    assert_eq!(
        app.log().status,
        FlightStatus::Terminated(TerminationReason::Arrived)
    );
}

#[test]
fn test_terminated_flight_is_frozen() {
    let mut config = create_midpoint_config();
    config.route.distance_km = 1.0;
    let mut app = TestAppBuilder::new().with_config(config).build();

    app.run_steps(1);
    let state = app.state();
    let log = app.log().clone();

    app.run_steps(5);

    assert_eq!(app.state(), state);
    assert_eq!(app.log(), &log);
}

#[test]
fn test_classifier_failure_ends_flight() {
    let mut app = TestAppBuilder::new()
        .with_config(create_midpoint_config())
        .with_classifier(Classifier::new(FixedScoreClassifier(1.5)))
        .build();

    app.run_steps(1);

    let log = app.log().clone();
    assert_eq!(
        log.status,
        FlightStatus::Terminated(TerminationReason::ClassifierFailure)
    );
    assert_eq!(log.ticks, 1);
    assert_eq!(log.stable_ticks, 0);
    assert!(app.advisories().is_empty());
    assert!(app.exit_requested().is_some());

    app.run_steps(3);
    assert_eq!(app.log().ticks, 1);
}

#[test]
fn test_critical_score_leads_advisories() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .with_classifier(Classifier::new(FixedScoreClassifier(0.95)))
        .build();

    app.run_steps(1);

    let advisories = app.advisories();
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].message, CRITICAL_MESSAGE);
    assert_eq!(advisories[0].priority, 1.0);
    assert_eq!(app.criticality(), 0.95);
}

#[test]
fn test_cleared_running_flag_cancels() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .build();

    app.run_steps(3);
    let state = app.state();
    app.running.stop();
    app.run_steps(1);

    let log = app.log().clone();
    assert_eq!(log.ticks, 3);
    assert_eq!(
        log.status,
        FlightStatus::Terminated(TerminationReason::Cancelled)
    );
    assert_eq!(app.state(), state);
}
