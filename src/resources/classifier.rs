//! Criticality classifier boundary.
//!
//! The simulation only depends on [`CriticalityClassifier::score`]; how the
//! model was produced is outside this crate. [`MlpClassifier`] evaluates a
//! pre-trained dense network loaded from a YAML model file.

use bevy::prelude::*;
use nalgebra::{DMatrix, DVector, SVector};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use thiserror::Error;

pub const FEATURE_COUNT: usize = 10;

/// altitude, airspeed, fuel, vertical speed, weather code, rpm, wind,
/// total weight, CG, distance remaining; raw units.
pub type FeatureVector = SVector<f64, FEATURE_COUNT>;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Feature {index} is not finite: {value}")]
    NonFiniteFeature { index: usize, value: f64 },
    #[error("Score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),
    #[error("Layer {layer} expects {expected} inputs but receives {actual}")]
    DimensionMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    #[error("Failed to read model file: {0}")]
    ModelFile(#[from] std::io::Error),
    #[error("Failed to parse model: {0}")]
    ModelFormat(#[from] serde_yaml::Error),
}

/// Maps a flight-state feature vector to the probability that the state is unsafe.
pub trait CriticalityClassifier: Send + Sync {
    fn score(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;
}

/// The classifier used by the advisory stage.
///
/// Inputs and outputs are checked here so that no implementation can hand a
/// malformed score to the engine.
#[derive(Resource, Clone)]
pub struct Classifier(Arc<dyn CriticalityClassifier>);

impl Classifier {
    pub fn new(classifier: impl CriticalityClassifier + 'static) -> Self {
        Self(Arc::new(classifier))
    }

    pub fn evaluate(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        if let Some((index, value)) = features
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ClassifierError::NonFiniteFeature {
                index,
                value: *value,
            });
        }

        let score = self.0.score(features)?;
        if !(0.0..=1.0).contains(&score) {
            return Err(ClassifierError::ScoreOutOfRange(score));
        }
        Ok(score)
    }
}

/// Returns the same score for every state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScoreClassifier(pub f64);

impl CriticalityClassifier for FixedScoreClassifier {
    fn score(&self, _features: &FeatureVector) -> Result<f64, ClassifierError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Identity,
    Relu,
    Sigmoid,
}

impl Activation {
    fn apply(self, value: f64) -> f64 {
        match self {
            Activation::Identity => value,
            Activation::Relu => value.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-value).exp()),
        }
    }
}

/// Serialized form of one dense layer; `weights[i]` holds the input weights of output `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: DMatrix<f64>,
    biases: DVector<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn from_spec(index: usize, spec: &LayerSpec, inputs: usize) -> Result<Self, ClassifierError> {
        let outputs = spec.weights.len();
        if outputs == 0 {
            return Err(ClassifierError::InvalidModel(format!(
                "layer {} has no outputs",
                index
            )));
        }
        if spec.biases.len() != outputs {
            return Err(ClassifierError::InvalidModel(format!(
                "layer {} has {} weight rows but {} biases",
                index,
                outputs,
                spec.biases.len()
            )));
        }
        if let Some(row) = spec.weights.iter().find(|row| row.len() != inputs) {
            return Err(ClassifierError::DimensionMismatch {
                layer: index,
                expected: row.len(),
                actual: inputs,
            });
        }
        let all_finite = spec
            .weights
            .iter()
            .flatten()
            .chain(spec.biases.iter())
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(ClassifierError::InvalidModel(format!(
                "layer {} contains non-finite parameters",
                index
            )));
        }

        Ok(Self {
            weights: DMatrix::from_fn(outputs, inputs, |row, col| spec.weights[row][col]),
            biases: DVector::from_column_slice(&spec.biases),
            activation: spec.activation,
        })
    }

    fn forward(&self, input: &DVector<f64>) -> DVector<f64> {
        let activation = self.activation;
        (&self.weights * input + &self.biases).map(|value| activation.apply(value))
    }
}

/// Feed-forward network over the raw feature vector with a single output.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    layers: Vec<DenseLayer>,
}

impl MlpClassifier {
    pub fn from_spec(spec: &ModelSpec) -> Result<Self, ClassifierError> {
        if spec.layers.is_empty() {
            return Err(ClassifierError::InvalidModel("model has no layers".into()));
        }

        let mut inputs = FEATURE_COUNT;
        let mut layers = Vec::with_capacity(spec.layers.len());
        for (index, layer_spec) in spec.layers.iter().enumerate() {
            let layer = DenseLayer::from_spec(index, layer_spec, inputs)?;
            inputs = layer.weights.nrows();
            layers.push(layer);
        }

        if inputs != 1 {
            return Err(ClassifierError::InvalidModel(format!(
                "final layer must have one output, found {}",
                inputs
            )));
        }

        Ok(Self { layers })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ClassifierError> {
        let spec: ModelSpec = serde_yaml::from_str(yaml)?;
        Self::from_spec(&spec)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        info!("Loading classifier model from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let classifier = Self::from_yaml_str(&contents)?;
        info!("Classifier loaded with {} layers", classifier.layers.len());
        Ok(classifier)
    }
}

impl CriticalityClassifier for MlpClassifier {
    fn score(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let input = DVector::from_column_slice(features.as_slice());
        let output = self
            .layers
            .iter()
            .fold(input, |activations, layer| layer.forward(&activations));
        Ok(output[0])
    }
}
