pub mod classifier;
pub mod config;
mod flight_log;
mod snapshot;

pub use classifier::{
    Activation, Classifier, ClassifierError, CriticalityClassifier, FeatureVector,
    FixedScoreClassifier, LayerSpec, MlpClassifier, ModelSpec, FEATURE_COUNT,
};
pub use config::{
    AirframeConfig, ConfigError, CopilotConfig, EnvironmentConfig, Loadout, NoiseMode,
    PhysicsConfig, RouteConfig, RuleConfig, RuleWeights, SimulationConfig, MAX_LOADOUT_WEIGHT,
};
pub use flight_log::FlightLog;
pub use snapshot::{
    snapshot_channel, FlightSnapshot, RunningFlag, SnapshotPublisher, SnapshotReceiver,
};
