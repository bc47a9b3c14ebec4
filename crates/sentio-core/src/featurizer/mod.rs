//! # N-gram Featurizer
//!
//! Turns raw text into fixed-length, L2-normalized term-frequency vectors
//! over word n-grams and character n-grams. The vocabulary is learned from
//! the training texts only and travels with the trained model, so scoring a
//! new text always uses the exact training-time feature space.

pub mod sparse;
pub mod tokenizer;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentioError};

pub use sparse::SparseVector;
pub use tokenizer::Tokenizer;

/// Prefix for word n-gram terms in the vocabulary.
const WORD_PREFIX: &str = "w:";
/// Prefix for character n-gram terms in the vocabulary.
const CHAR_PREFIX: &str = "c:";

/// Configuration for the featurizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizerConfig {
    /// Longest word n-gram (1 = unigrams only).
    pub word_ngrams: usize,
    /// Character n-gram length over each padded word (0 disables).
    pub char_ngrams: usize,
    /// Terms seen fewer times than this across the training texts are dropped.
    pub min_count: u32,
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self {
            word_ngrams: 2,
            char_ngrams: 3,
            min_count: 1,
        }
    }
}

impl FeaturizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest word n-gram. Values below 1 are raised to 1.
    pub fn with_word_ngrams(mut self, n: usize) -> Self {
        self.word_ngrams = n.max(1);
        self
    }

    /// Set the character n-gram length (0 disables character features).
    pub fn with_char_ngrams(mut self, n: usize) -> Self {
        self.char_ngrams = n;
        self
    }

    /// Set the minimum corpus count for a term to enter the vocabulary.
    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count.max(1);
        self
    }
}

/// Fitted text featurizer: settings, tokenizer and the term vocabulary.
#[derive(Debug, Clone)]
pub struct Featurizer {
    config: FeaturizerConfig,
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, u32>,
}

impl Featurizer {
    /// Learn the vocabulary from the training texts.
    ///
    /// Term indices are assigned in lexicographic order, so the same corpus
    /// always yields the same feature layout.
    pub fn fit<'a, I>(config: FeaturizerConfig, texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenizer = Tokenizer::new()?;

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for text in texts {
            for term in extract_terms(&config, &tokenizer, text) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let vocabulary: HashMap<String, u32> = counts
            .into_iter()
            .filter(|&(_, count)| count >= config.min_count)
            .enumerate()
            .map(|(idx, (term, _))| (term, idx as u32))
            .collect();

        tracing::debug!(
            vocabulary = vocabulary.len(),
            word_ngrams = config.word_ngrams,
            char_ngrams = config.char_ngrams,
            "Fitted featurizer vocabulary"
        );

        Ok(Self {
            config,
            tokenizer,
            vocabulary,
        })
    }

    /// Rebuild a featurizer from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns `SentioError::InvalidInput` if the term indices are not a
    /// permutation of `0..vocabulary.len()`.
    pub fn from_parts(config: FeaturizerConfig, vocabulary: HashMap<String, u32>) -> Result<Self> {
        let dim = vocabulary.len();
        let mut seen = vec![false; dim];
        for &idx in vocabulary.values() {
            match seen.get_mut(idx as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(SentioError::InvalidInput(format!(
                        "vocabulary index {idx} is duplicated or out of range for {dim} terms"
                    )));
                }
            }
        }

        Ok(Self {
            config,
            tokenizer: Tokenizer::new()?,
            vocabulary,
        })
    }

    /// Map a text into the fitted feature space.
    pub fn transform(&self, text: &str) -> SparseVector {
        let pairs: Vec<(u32, f64)> = extract_terms(&self.config, &self.tokenizer, text)
            .into_iter()
            .filter_map(|term| self.vocabulary.get(&term).map(|&idx| (idx, 1.0)))
            .collect();

        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    /// Fixed length of every feature vector produced by [`Self::transform`].
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &HashMap<String, u32> {
        &self.vocabulary
    }
}

/// Every n-gram term of a text, with repetitions.
fn extract_terms(config: &FeaturizerConfig, tokenizer: &Tokenizer, text: &str) -> Vec<String> {
    let words = tokenizer.tokenize(text);
    let mut terms = Vec::new();

    for n in 1..=config.word_ngrams.max(1) {
        for window in words.windows(n) {
            terms.push(format!("{WORD_PREFIX}{}", window.join(" ")));
        }
    }

    if config.char_ngrams > 0 {
        for word in &words {
            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for window in padded.windows(config.char_ngrams) {
                terms.push(format!("{CHAR_PREFIX}{}", window.iter().collect::<String>()));
            }
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_only() -> FeaturizerConfig {
        FeaturizerConfig::new().with_char_ngrams(0)
    }

    #[test]
    fn extract_word_and_char_terms() {
        let tokenizer = Tokenizer::new().unwrap();
        let config = FeaturizerConfig::default();
        let terms = extract_terms(&config, &tokenizer, "Good food");

        assert!(terms.contains(&"w:good".to_string()));
        assert!(terms.contains(&"w:food".to_string()));
        assert!(terms.contains(&"w:good food".to_string()));
        assert!(terms.contains(&"c:<go".to_string()));
        assert!(terms.contains(&"c:od>".to_string()));
    }

    #[test]
    fn vocabulary_is_sorted_and_deterministic() {
        let texts = ["bad service", "great food"];
        let a = Featurizer::fit(word_only(), texts.iter().copied()).unwrap();
        let b = Featurizer::fit(word_only(), texts.iter().rev().copied()).unwrap();

        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_eq!(a.vocabulary()["w:bad"], 0);
        assert_eq!(a.dimension(), 6);
    }

    #[test]
    fn min_count_prunes_rare_terms() {
        let texts = ["good food", "good service"];
        let featurizer =
            Featurizer::fit(word_only().with_min_count(2), texts.iter().copied()).unwrap();
        assert_eq!(featurizer.dimension(), 1);
        assert!(featurizer.vocabulary().contains_key("w:good"));
    }

    #[test]
    fn transform_is_unit_norm_and_ignores_unknown_terms() {
        let featurizer = Featurizer::fit(word_only(), ["great food"].iter().copied()).unwrap();

        let known = featurizer.transform("Great food!");
        assert_eq!(known.nnz(), 3);
        assert!((known.squared_norm() - 1.0).abs() < 1e-9);

        let unknown = featurizer.transform("terrible");
        assert!(unknown.is_empty());
    }

    #[test]
    fn transform_uses_training_vocabulary_only() {
        let featurizer = Featurizer::fit(word_only(), ["loved it"].iter().copied()).unwrap();
        let v = featurizer.transform("loved it loved it, totally new words");
        assert!(v.iter().all(|(idx, _)| idx < featurizer.dimension()));
    }

    #[test]
    fn from_parts_round_trips_vocabulary() {
        let fitted = Featurizer::fit(FeaturizerConfig::default(), ["nice place"].iter().copied())
            .unwrap();
        let rebuilt =
            Featurizer::from_parts(fitted.config().clone(), fitted.vocabulary().clone()).unwrap();
        assert_eq!(fitted.transform("nice place"), rebuilt.transform("nice place"));
    }

    #[test]
    fn from_parts_rejects_bad_indices() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("w:a".to_string(), 0);
        vocabulary.insert("w:b".to_string(), 0);
        assert!(Featurizer::from_parts(FeaturizerConfig::default(), vocabulary).is_err());
    }
}
