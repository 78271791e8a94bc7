use bevy::prelude::*;

use crate::{
    components::{Advisories, FlightState, TerminationReason},
    resources::{FlightLog, RunningFlag, SimulationConfig},
};

/// First matching end condition for the state after a tick.
pub fn check_termination(
    state: &FlightState,
    stable_ticks: u32,
    stable_tick_limit: u32,
) -> Option<TerminationReason> {
    if state.fuel <= 0.0 {
        Some(TerminationReason::NoFuel)
    } else if state.distance_remaining <= 0.0 {
        Some(TerminationReason::Arrived)
    } else if stable_ticks >= stable_tick_limit {
        Some(TerminationReason::Stable)
    } else {
        None
    }
}

/// Opens a tick, or cancels the flight when the running flag was cleared.
pub fn tick_gate_system(running: Res<RunningFlag>, mut log: ResMut<FlightLog>) {
    if running.is_running() {
        log.ticks += 1;
    } else {
        log.terminate(TerminationReason::Cancelled);
    }
}

pub fn termination_system(
    query: Query<(&FlightState, &Advisories)>,
    simulation: Res<SimulationConfig>,
    mut log: ResMut<FlightLog>,
) {
    for (state, advisories) in query.iter() {
        if advisories.is_empty() {
            log.stable_ticks += 1;
        }
        if let Some(reason) =
            check_termination(state, log.stable_ticks, simulation.stable_tick_limit)
        {
            log.terminate(reason);
        }
    }
}
