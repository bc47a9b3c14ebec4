//! Human-readable report blocks for training, evaluation and predictions.

use crate::types::{EvaluationReport, PredictionResult};

/// Canned text scored by the single-item sanity prediction.
pub const SAMPLE_TEXT: &str = "This place is very good";

/// Canned texts scored by the batch sanity prediction.
pub const BATCH_SAMPLES: &[&str] = &["This was a horrible meal", "I love this spaghetti."];

const TRAINING_START: &str = "=============== Create and Train the Model ===============";
const TRAINING_END: &str = "=============== End of training ===============";

/// Banner printed around model training.
pub fn training_block() -> String {
    [TRAINING_START, TRAINING_END].join("\n")
}

/// Metrics block with ratios rendered as percentages.
pub fn evaluation_block(report: &EvaluationReport) -> String {
    [
        "=============== Evaluating Model accuracy with Test data===============".to_string(),
        "Model quality metrics evaluation".to_string(),
        "--------------------------------".to_string(),
        format!("Accuracy: {}", percent(report.accuracy)),
        format!("Auc: {}", percent(report.auc)),
        format!("F1Score: {}", percent(report.f1)),
        "=============== End of model evaluation ===============".to_string(),
    ]
    .join("\n")
}

pub fn single_prediction_block(result: &PredictionResult) -> String {
    [
        "=============== Prediction Test of model with a single sample and test dataset ==============="
            .to_string(),
        result.to_string(),
        "=============== End of Predictions ===============".to_string(),
    ]
    .join("\n")
}

pub fn batch_prediction_block(results: &[PredictionResult]) -> String {
    let mut lines = vec![
        "=============== Prediction Test of loaded model with multiple samples ==============="
            .to_string(),
    ];
    lines.extend(results.iter().map(ToString::to_string));
    lines.push("=============== End of predictions ===============".to_string());
    lines.join("\n")
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> EvaluationReport {
        EvaluationReport {
            accuracy: 0.835,
            auc: 0.9,
            f1: 0.81234,
            precision: 0.8,
            recall: 0.82,
            log_loss: 0.4,
            test_size: 200,
        }
    }

    #[test]
    fn evaluation_block_renders_percentages() {
        let block = evaluation_block(&report());
        assert!(block.contains("Accuracy: 83.50%"));
        assert!(block.contains("Auc: 90.00%"));
        assert!(block.contains("F1Score: 81.23%"));
        assert!(block.starts_with("=============== Evaluating Model accuracy"));
        assert!(block.ends_with("=============== End of model evaluation ==============="));
    }

    #[test]
    fn training_block_has_both_banners() {
        let block = training_block();
        assert_eq!(block.lines().count(), 2);
        assert!(block.contains("Create and Train the Model"));
        assert!(block.contains("End of training"));
    }

    #[test]
    fn prediction_blocks_embed_prediction_lines() {
        let result = PredictionResult {
            text: SAMPLE_TEXT.into(),
            label: true,
            probability: 0.9,
        };
        let single = single_prediction_block(&result);
        assert!(single.contains("Sentiment: This place is very good | Prediction: Positive"));

        let batch = batch_prediction_block(&[result.clone(), result]);
        assert_eq!(batch.lines().count(), 4);
    }
}
