use serde::{Deserialize, Serialize};

/// One row of the source dataset: a text and its binary sentiment label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Raw text as it appears in the dataset.
    pub text: String,

    /// `true` for positive sentiment.
    pub label: bool,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: bool) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Disjoint training and held-out partitions of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSplit {
    pub train: Vec<LabeledExample>,
    pub test: Vec<LabeledExample>,
}

impl DatasetSplit {
    /// Total number of examples across both partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_len_counts_both_sides() {
        let split = DatasetSplit {
            train: vec![
                LabeledExample::new("good", true),
                LabeledExample::new("bad", false),
            ],
            test: vec![LabeledExample::new("fine", true)],
        };
        assert_eq!(split.len(), 3);
        assert!(!split.is_empty());
        assert!(DatasetSplit::default().is_empty());
    }
}
