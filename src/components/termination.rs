use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a flight stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    NoFuel,
    Arrived,
    Stable,
    ClassifierFailure,
    Cancelled,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::NoFuel => "no fuel",
            TerminationReason::Arrived => "arrived",
            TerminationReason::Stable => "stable",
            TerminationReason::ClassifierFailure => "classifier failure",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop state machine: running until the first termination predicate matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlightStatus {
    #[default]
    Running,
    Terminated(TerminationReason),
}

impl FlightStatus {
    pub fn is_running(self) -> bool {
        self == FlightStatus::Running
    }

    pub fn reason(self) -> Option<TerminationReason> {
        match self {
            FlightStatus::Running => None,
            FlightStatus::Terminated(reason) => Some(reason),
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightStatus::Running => f.write_str("running"),
            FlightStatus::Terminated(reason) => reason.fmt(f),
        }
    }
}
