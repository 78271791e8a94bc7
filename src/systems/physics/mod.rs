mod constraints;
mod integrator;

pub use constraints::{clamp, constraint_system, MIN_ENGINE_RPM};
pub use integrator::{advance, integrator_system, lift, IntegratorNoise};
