use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Stream name used by the environment perturbation stage.
pub const ENVIRONMENT_STREAM: &str = "environment";
/// Stream name used by the state integrator.
pub const INTEGRATOR_STREAM: &str = "integrator";

/// Hands out independent, reproducible RNG streams derived from one master seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    /// Uses the configured seed when present, otherwise draws one from entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                info!("Using master seed {}", seed);
                Self::new(seed)
            }
            None => {
                let seed = rand::random();
                warn!("No seed provided, using entropy (master seed {})", seed);
                Self::new(seed)
            }
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    // Hash the stream name with the master seed so each stage gets its own sequence
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }

    pub fn streams(&self) -> SimRng {
        SimRng {
            environment: self.get_rng(ENVIRONMENT_STREAM),
            integrator: self.get_rng(INTEGRATOR_STREAM),
        }
    }
}

/// The random streams consumed by the tick stages.
#[derive(Resource, Debug, Clone)]
pub struct SimRng {
    pub environment: ChaCha8Rng,
    pub integrator: ChaCha8Rng,
}
