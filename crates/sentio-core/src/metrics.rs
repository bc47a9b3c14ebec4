//! Binary classification metrics over a held-out set.

use std::cmp::Ordering;

use crate::error::{Result, SentioError};
use crate::model::{TrainedModel, DECISION_THRESHOLD};
use crate::types::{EvaluationReport, LabeledExample};

/// Probabilities are clamped to `[EPSILON, 1 - EPSILON]` for log-loss.
const LOG_LOSS_EPSILON: f64 = 1e-15;

/// Score every test example with `model` and aggregate the metrics.
///
/// # Errors
///
/// Returns `SentioError::Training` if the test set is empty or holds a
/// single class (AUC is undefined).
pub fn evaluate(model: &TrainedModel, test: &[LabeledExample]) -> Result<EvaluationReport> {
    let scored: Vec<(f64, bool)> = test
        .iter()
        .map(|example| (model.score(&example.text), example.label))
        .collect();

    let report = evaluate_scores(&scored)?;
    tracing::info!(
        test_size = report.test_size,
        accuracy = report.accuracy,
        auc = report.auc,
        f1 = report.f1,
        "Evaluated model"
    );
    Ok(report)
}

/// Compute metrics from `(probability, true_label)` pairs.
pub fn evaluate_scores(scored: &[(f64, bool)]) -> Result<EvaluationReport> {
    if scored.is_empty() {
        return Err(SentioError::Training(
            "cannot evaluate a model against an empty test set".into(),
        ));
    }

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut tn = 0usize;
    let mut fn_ = 0usize;
    let mut log_loss = 0.0;

    for &(probability, label) in scored {
        let predicted = probability >= DECISION_THRESHOLD;
        match (predicted, label) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fn_ += 1,
        }

        let p = probability.clamp(LOG_LOSS_EPSILON, 1.0 - LOG_LOSS_EPSILON);
        log_loss -= if label { p.ln() } else { (1.0 - p).ln() };
    }

    let total = scored.len() as f64;
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(EvaluationReport {
        accuracy: (tp + tn) as f64 / total,
        auc: area_under_roc(scored)?,
        f1,
        precision,
        recall,
        log_loss: log_loss / total,
        test_size: scored.len(),
    })
}

/// Area under the ROC curve via the Mann-Whitney rank statistic.
///
/// Tied scores share the average of their ranks.
pub fn area_under_roc(scored: &[(f64, bool)]) -> Result<f64> {
    let positives = scored.iter().filter(|(_, label)| *label).count();
    let negatives = scored.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(SentioError::Training(format!(
            "AUC is undefined for a test set with {positives} positive and {negatives} negative examples"
        )));
    }

    let mut ranked: Vec<(f64, bool)> = scored.to_vec();
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len() && ranked[end].0 == ranked[start].0 {
            end += 1;
        }
        // ranks are 1-based: the tie group covers ranks start+1 ..= end
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = ranked[start..end].iter().filter(|(_, l)| *l).count();
        positive_rank_sum += average_rank * tied_positives as f64;
        start = end;
    }

    let p = positives as f64;
    let n = negatives as f64;
    Ok((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
