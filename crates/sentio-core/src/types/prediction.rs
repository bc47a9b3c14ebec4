use std::fmt;

use serde::{Deserialize, Serialize};

/// Human-readable sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl From<bool> for Polarity {
    fn from(label: bool) -> Self {
        if label {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// Output of scoring one text with a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The text that was scored, unchanged.
    pub text: String,

    /// Predicted label (`probability >= 0.5`).
    pub label: bool,

    /// Probability of the positive class in `[0.0, 1.0]`.
    pub probability: f32,
}

impl PredictionResult {
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        Polarity::from(self.label)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sentiment: {} | Prediction: {} | Probability: {}",
            self.text,
            self.polarity(),
            self.probability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_line_format() {
        let result = PredictionResult {
            text: "This place is very good".into(),
            label: true,
            probability: 0.75,
        };
        assert_eq!(
            result.to_string(),
            "Sentiment: This place is very good | Prediction: Positive | Probability: 0.75"
        );
    }

    #[test]
    fn negative_polarity() {
        let result = PredictionResult {
            text: "awful".into(),
            label: false,
            probability: 0.1,
        };
        assert_eq!(result.polarity(), Polarity::Negative);
        assert!(result.to_string().contains("Prediction: Negative"));
    }
}
