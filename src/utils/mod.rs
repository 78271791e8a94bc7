mod errors;
mod rng;

pub use errors::SimError;
pub use rng::{RngManager, SimRng, ENVIRONMENT_STREAM, INTEGRATOR_STREAM};
