//! Trained linear sentiment model: featurizer + logistic weights.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentioError};
use crate::featurizer::{Featurizer, FeaturizerConfig, SparseVector};
use crate::types::PredictionResult;

/// Probability at or above which a text is labeled positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Immutable model produced by training.
///
/// Bundles the fitted featurizer with the classifier weights so that
/// prediction can never use a different feature space than training did.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    featurizer: Featurizer,
    weights: Vec<f64>,
    bias: f64,
}

/// On-disk representation of a [`TrainedModel`].
#[derive(Serialize, Deserialize)]
struct ModelSnapshot {
    featurizer: FeaturizerConfig,
    vocabulary: HashMap<String, u32>,
    weights: Vec<f64>,
    bias: f64,
}

impl TrainedModel {
    /// # Errors
    ///
    /// Returns `SentioError::Training` if `weights` does not match the
    /// featurizer dimension.
    pub fn new(featurizer: Featurizer, weights: Vec<f64>, bias: f64) -> Result<Self> {
        if weights.len() != featurizer.dimension() {
            return Err(SentioError::Training(format!(
                "weight vector has {} entries but the featurizer produces {} features",
                weights.len(),
                featurizer.dimension()
            )));
        }
        Ok(Self {
            featurizer,
            weights,
            bias,
        })
    }

    /// Probability of the positive class for an already featurized text.
    pub fn score_features(&self, features: &SparseVector) -> f64 {
        sigmoid(features.dot(&self.weights) + self.bias)
    }

    /// Probability of the positive class for a raw text.
    pub fn score(&self, text: &str) -> f64 {
        self.score_features(&self.featurizer.transform(text))
    }

    /// Score one text and label it.
    ///
    /// # Errors
    ///
    /// Returns `SentioError::InvalidInput` if the text is empty or whitespace-only.
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        if text.trim().is_empty() {
            return Err(SentioError::InvalidInput(
                "prediction text is empty or whitespace-only".into(),
            ));
        }

        let probability = self.score(text);
        Ok(PredictionResult {
            text: text.to_string(),
            label: probability >= DECISION_THRESHOLD,
            probability: probability as f32,
        })
    }

    /// Score each text independently, preserving input order.
    ///
    /// # Errors
    ///
    /// Fails on the first empty item.
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<PredictionResult>> {
        texts.iter().map(|t| self.predict(t.as_ref())).collect()
    }

    pub fn featurizer(&self) -> &Featurizer {
        &self.featurizer
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Write the model as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = ModelSnapshot {
            featurizer: self.featurizer.config().clone(),
            vocabulary: self.featurizer.vocabulary().clone(),
            weights: self.weights.clone(),
            bias: self.bias,
        };
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(&snapshot)?)?;
        tracing::info!(path = %path.as_ref().display(), "Model saved");
        Ok(())
    }

    /// Load a model written by [`Self::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SentioError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => SentioError::Io(e),
        })?;
        let snapshot: ModelSnapshot = serde_json::from_str(&content)?;
        let featurizer = Featurizer::from_parts(snapshot.featurizer, snapshot.vocabulary)?;
        Self::new(featurizer, snapshot.weights, snapshot.bias)
    }
}
