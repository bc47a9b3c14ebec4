use serde::{Deserialize, Serialize};

/// Aggregate quality metrics of a model over a held-out set.
///
/// Every ratio is in `[0.0, 1.0]`; `log_loss` is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fraction of examples whose predicted label matches the true label.
    pub accuracy: f64,

    /// Area under the ROC curve.
    pub auc: f64,

    /// Harmonic mean of precision and recall for the positive class.
    pub f1: f64,

    pub precision: f64,

    pub recall: f64,

    /// Mean binary cross-entropy of the predicted probabilities.
    pub log_loss: f64,

    /// Number of examples the metrics were computed over.
    pub test_size: usize,
}
