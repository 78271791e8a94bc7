use bevy::prelude::*;

use crate::components::{FlightStatus, TerminationReason};

/// Loop bookkeeping that persists across ticks.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FlightLog {
    /// Completed ticks.
    pub ticks: u64,
    /// Ticks that produced no advisory. Never reset.
    pub stable_ticks: u32,
    pub status: FlightStatus,
}

impl FlightLog {
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Moves to `Terminated`; the first reason recorded wins.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.status.is_running() {
            info!("Flight terminated after {} ticks: {}", self.ticks, reason);
            self.status = FlightStatus::Terminated(reason);
        }
    }
}
