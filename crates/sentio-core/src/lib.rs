//! # Sentio Core
//!
//! Text featurization, the trained linear sentiment model, evaluation
//! metrics and report formatting shared by the trainer and the server.
//!
//! ## Quick Start
//!
//! ```rust
//! use sentio_core::{Featurizer, FeaturizerConfig, TrainedModel};
//!
//! let featurizer = Featurizer::fit(FeaturizerConfig::default(), ["great food"]).unwrap();
//! let weights = vec![0.5; featurizer.dimension()];
//! let model = TrainedModel::new(featurizer, weights, 0.0).unwrap();
//!
//! let result = model.predict("Great food!").unwrap();
//! assert!(result.label);
//! ```
pub mod error;
pub mod featurizer;
pub mod metrics;
pub mod model;
pub mod report;
pub mod types;

// Re-export primary API
pub use error::{Result, SentioError};
pub use featurizer::{Featurizer, FeaturizerConfig, SparseVector, Tokenizer};
pub use metrics::evaluate;
pub use model::{sigmoid, TrainedModel, DECISION_THRESHOLD};
pub use types::{DatasetSplit, EvaluationReport, LabeledExample, Polarity, PredictionResult};
