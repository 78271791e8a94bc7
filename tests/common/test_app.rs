use bevy::{app::AppExit, prelude::*};
use copilot::{
    components::{Advisories, AircraftProfile, Criticality, FlightState},
    plugins::CopilotPlugin,
    resources::{
        snapshot_channel, Classifier, CopilotConfig, FixedScoreClassifier, FlightLog, Loadout,
        RunningFlag, SnapshotReceiver,
    },
};

/// Builder for a headless app running one flight.
pub struct TestAppBuilder {
    config: CopilotConfig,
    loadout: Loadout,
    classifier: Classifier,
    with_display: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: CopilotConfig::default().with_seed(42),
            loadout: Loadout {
                pilot_weight: 170.0,
                cargo_weight: 50.0,
            },
            classifier: Classifier::new(FixedScoreClassifier(0.0)),
            with_display: false,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: CopilotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_loadout(mut self, pilot_weight: f64, cargo_weight: f64) -> Self {
        self.loadout = Loadout::new(pilot_weight, cargo_weight).unwrap();
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    pub fn with_display(mut self) -> Self {
        self.with_display = true;
        self
    }

    /// Builds the app without running it; the first `run_steps(1)` is tick 1.
    pub fn build(self) -> TestApp {
        let running = RunningFlag::new();
        let mut plugin = CopilotPlugin::new(self.config, self.loadout, self.classifier)
            .with_running_flag(running.clone());

        let display = if self.with_display {
            let (publisher, receiver) = snapshot_channel();
            plugin = plugin.with_publisher(publisher);
            Some(receiver)
        } else {
            None
        };

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        TestApp {
            app,
            running,
            display,
        }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
    pub running: RunningFlag,
    pub display: Option<SnapshotReceiver>,
}

impl TestApp {
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    /// Runs until the flight terminates, at most `max_steps` updates.
    pub fn run_to_termination(&mut self, max_steps: usize) -> usize {
        for step in 1..=max_steps {
            self.app.update();
            if !self.log().is_running() {
                return step;
            }
        }
        panic!("flight still running after {} steps", max_steps);
    }

    pub fn log(&self) -> &FlightLog {
        self.app.world().resource::<FlightLog>()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn query_single_mut<T: Component>(&mut self) -> Option<Mut<T>> {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut T>();
        query.get_single_mut(world).ok()
    }

    pub fn state(&mut self) -> FlightState {
        *self.query_single::<FlightState>().expect("aircraft not spawned")
    }

    pub fn profile(&mut self) -> AircraftProfile {
        self.query_single::<AircraftProfile>()
            .expect("aircraft not spawned")
            .clone()
    }

    pub fn advisories(&mut self) -> Advisories {
        self.query_single::<Advisories>()
            .expect("aircraft not spawned")
            .clone()
    }

    pub fn criticality(&mut self) -> f64 {
        self.query_single::<Criticality>()
            .expect("aircraft not spawned")
            .0
    }

    pub fn exit_requested(&self) -> Option<AppExit> {
        self.app.should_exit()
    }
}
