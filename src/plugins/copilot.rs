use bevy::prelude::*;

use crate::components::{Advisories, AircraftProfile, Criticality, FlightState};
use crate::resources::{
    AirframeConfig, Classifier, CopilotConfig, FlightLog, Loadout, RouteConfig, RunningFlag,
    SnapshotPublisher,
};
use crate::systems::{
    advisory_system, constraint_system, environment_system, exit_on_termination,
    integrator_system, publish_system, termination_system, tick_gate_system,
};
use crate::utils::RngManager;

/// Stages of one simulation tick, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TickSet {
    Gate,
    Perturb,
    Integrate,
    Clamp,
    Evaluate,
    Terminate,
    Publish,
}

impl TickSet {
    /// Stages skipped once the flight has terminated.
    const GUARDED: [TickSet; 6] = [
        TickSet::Gate,
        TickSet::Perturb,
        TickSet::Integrate,
        TickSet::Clamp,
        TickSet::Evaluate,
        TickSet::Terminate,
    ];
}

fn flight_running(log: Res<FlightLog>) -> bool {
    log.is_running()
}

/// Runs one flight: every `app.update()` advances the aircraft by one tick
/// until a termination condition is met.
pub struct CopilotPlugin {
    config: CopilotConfig,
    loadout: Loadout,
    classifier: Classifier,
    publisher: Option<SnapshotPublisher>,
    running: RunningFlag,
}

impl CopilotPlugin {
    pub fn new(config: CopilotConfig, loadout: Loadout, classifier: Classifier) -> Self {
        Self {
            config,
            loadout,
            classifier,
            publisher: None,
            running: RunningFlag::new(),
        }
    }

    pub fn with_publisher(mut self, publisher: SnapshotPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Shares a stop flag with the caller.
    pub fn with_running_flag(mut self, running: RunningFlag) -> Self {
        self.running = running;
        self
    }

    fn spawn_aircraft(
        mut commands: Commands,
        loadout: &Loadout,
        airframe: &AirframeConfig,
        route: &RouteConfig,
    ) {
        let profile = AircraftProfile::new(loadout, airframe);
        let state = FlightState::from_profile(&profile, route);
        info!(
            "Departing on the {} route: {:.0} km at {:.0} ft",
            route.name, state.distance_remaining, state.altitude
        );

        commands.spawn((
            profile,
            state,
            Advisories::default(),
            Criticality::default(),
            Name::new("Aircraft"),
        ));
    }
}

impl Plugin for CopilotPlugin {
    fn build(&self, app: &mut App) {
        let CopilotConfig {
            airframe,
            route,
            physics,
            environment,
            rules,
            simulation,
        } = self.config.clone();

        let rng = RngManager::from_optional_seed(simulation.seed);
        info!(
            "Simulation noise {:?}, seed {}, tick interval {}s",
            simulation.noise,
            rng.master_seed(),
            simulation.tick_interval_secs
        );

        app.insert_resource(rng.streams())
            .insert_resource(FlightLog::default())
            .insert_resource(self.classifier.clone())
            .insert_resource(self.running.clone())
            .insert_resource(physics)
            .insert_resource(environment)
            .insert_resource(rules)
            .insert_resource(simulation)
            .insert_resource(airframe.clone())
            .insert_resource(route.clone());

        if let Some(publisher) = &self.publisher {
            app.insert_resource(publisher.clone());
        }

        let loadout = self.loadout;
        app.add_systems(Startup, move |commands: Commands| {
            Self::spawn_aircraft(commands, &loadout, &airframe, &route)
        });

        app.configure_sets(
            Update,
            (
                TickSet::Gate,
                TickSet::Perturb,
                TickSet::Integrate,
                TickSet::Clamp,
                TickSet::Evaluate,
                TickSet::Terminate,
                TickSet::Publish,
            )
                .chain(),
        );
        for set in TickSet::GUARDED {
            app.configure_sets(Update, set.run_if(flight_running));
        }

        app.add_systems(
            Update,
            (
                tick_gate_system.in_set(TickSet::Gate),
                environment_system.in_set(TickSet::Perturb),
                integrator_system.in_set(TickSet::Integrate),
                constraint_system.in_set(TickSet::Clamp),
                advisory_system.in_set(TickSet::Evaluate),
                termination_system.in_set(TickSet::Terminate),
                (publish_system, exit_on_termination)
                    .chain()
                    .in_set(TickSet::Publish)
                    .run_if(resource_changed::<FlightLog>),
            ),
        );
    }
}
