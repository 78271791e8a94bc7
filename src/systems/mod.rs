mod advisory;
mod environment;
pub mod physics;
mod publish;
mod termination;

pub use advisory::{advisory_system, evaluate, rank};
pub use environment::{environment_system, perturb, Perturbation};
pub use physics::{
    advance, clamp, constraint_system, integrator_system, lift, IntegratorNoise, MIN_ENGINE_RPM,
};
pub use publish::{exit_on_termination, publish_system, snapshot};
pub use termination::{check_termination, termination_system, tick_gate_system};
