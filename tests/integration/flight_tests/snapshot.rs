use copilot::{
    components::{FlightStatus, TerminationReason},
    display::StatusReport,
};
use pretty_assertions::assert_eq;

use crate::common::{create_quiet_config, TestAppBuilder};

#[test]
fn test_display_receives_latest_tick() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .with_display()
        .build();

    app.run_steps(3);

    let display = app.display.clone().unwrap();
    let snapshot = display.latest().unwrap();
    assert_eq!(snapshot.tick, 3);
    assert_eq!(snapshot.status, FlightStatus::Running);
    assert_eq!(snapshot.state, app.state());
    assert!(snapshot.advisories.is_empty());
    assert!(display.latest().is_none());
}

#[test]
fn test_final_snapshot_carries_reason() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .with_display()
        .build();

    app.run_to_termination(100);
    let display = app.display.clone().unwrap();
    let snapshot = display.latest().unwrap();

    assert_eq!(snapshot.tick, 10);
    assert_eq!(
        snapshot.status,
        FlightStatus::Terminated(TerminationReason::Stable)
    );

    let report = StatusReport::new(&snapshot, "Tokyo", 3);
    assert_eq!(report.recommendations, "STABLE FLIGHT ACHIEVED.");

    // Nothing is published once the flight has ended
    app.run_steps(3);
    assert!(display.latest().is_none());
}

#[test]
fn test_detached_display_does_not_stop_flight() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .with_display()
        .build();
    app.display = None;

    let steps = app.run_to_termination(100);

    assert_eq!(steps, 10);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut app = TestAppBuilder::new()
        .with_config(create_quiet_config())
        .with_display()
        .build();

    app.run_steps(1);
    let snapshot = app.display.as_ref().unwrap().latest().unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["tick"], 1);
    assert_eq!(json["status"], "Running");
    assert_eq!(json["state"]["weather_severity"], "Clear");
}
