use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

use crate::components::{Advisory, FlightState, FlightStatus};

/// Immutable copy of one tick handed to the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub tick: u64,
    pub state: FlightState,
    /// Full ranked list; the display decides how many to show.
    pub advisories: Vec<Advisory>,
    pub criticality: f64,
    pub status: FlightStatus,
}

/// Creates the single-slot channel between the simulation and the display.
pub fn snapshot_channel() -> (SnapshotPublisher, SnapshotReceiver) {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    let attached = Arc::new(());
    (
        SnapshotPublisher {
            sender,
            overflow: receiver.clone(),
            display: Arc::downgrade(&attached),
        },
        SnapshotReceiver {
            receiver,
            _attached: attached,
        },
    )
}

/// Producer end. Publishing never blocks: a snapshot the display has not
/// picked up yet is replaced by the newer one.
#[derive(Resource, Clone)]
pub struct SnapshotPublisher {
    sender: Sender<FlightSnapshot>,
    overflow: Receiver<FlightSnapshot>,
    // The overflow receiver keeps the channel connected, so detachment is tracked separately
    display: Weak<()>,
}

impl SnapshotPublisher {
    /// Returns false once the display end has been dropped.
    pub fn publish(&self, snapshot: FlightSnapshot) -> bool {
        if self.display.strong_count() == 0 {
            return false;
        }
        match self.sender.try_send(snapshot) {
            Ok(()) => true,
            Err(TrySendError::Full(snapshot)) => {
                // Drop the stale snapshot, keep only the latest
                let _ = self.overflow.try_recv();
                if let Err(TrySendError::Full(_)) = self.sender.try_send(snapshot) {
                    debug!("Display refilled the slot concurrently, skipping snapshot");
                }
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer end used by the display.
#[derive(Clone)]
pub struct SnapshotReceiver {
    receiver: Receiver<FlightSnapshot>,
    _attached: Arc<()>,
}

impl SnapshotReceiver {
    /// Blocks until a snapshot arrives; `None` once the simulation has shut down.
    pub fn recv(&self) -> Option<FlightSnapshot> {
        self.receiver.recv().ok()
    }

    /// Most recent snapshot, if one is waiting.
    pub fn latest(&self) -> Option<FlightSnapshot> {
        self.receiver.try_iter().last()
    }
}

/// Cooperative stop signal shared between the caller and the loop.
///
/// Clearing it ends the flight at the next tick boundary.
#[derive(Resource, Clone, Debug)]
pub struct RunningFlag(Arc<AtomicBool>);

impl RunningFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for RunningFlag {
    fn default() -> Self {
        Self::new()
    }
}
