use bevy::{app::AppExit, prelude::*};

use crate::{
    components::{Advisories, Criticality, FlightState},
    resources::{FlightLog, FlightSnapshot, SnapshotPublisher},
};

/// Copies the aircraft into a snapshot for the display.
pub fn snapshot(
    log: &FlightLog,
    state: &FlightState,
    advisories: &Advisories,
    criticality: &Criticality,
) -> FlightSnapshot {
    FlightSnapshot {
        tick: log.ticks,
        state: *state,
        advisories: advisories.0.clone(),
        criticality: criticality.0,
        status: log.status,
    }
}

pub fn publish_system(
    query: Query<(&FlightState, &Advisories, &Criticality)>,
    log: Res<FlightLog>,
    publisher: Option<Res<SnapshotPublisher>>,
) {
    let Some(publisher) = publisher else {
        return;
    };

    for (state, advisories, criticality) in query.iter() {
        if !publisher.publish(snapshot(&log, state, advisories, criticality)) {
            debug!("Display detached, snapshot for tick {} dropped", log.ticks);
        }
    }
}

/// Requests app exit once the flight has terminated.
pub fn exit_on_termination(log: Res<FlightLog>, mut exit: EventWriter<AppExit>) {
    if !log.is_running() {
        exit.send(AppExit::Success);
    }
}
