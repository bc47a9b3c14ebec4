//! # Word Tokenizer
//!
//! Splits free-form review text into normalized word tokens for the
//! n-gram featurizer.

use regex::Regex;

use crate::error::Result;

/// Tokenizer for sentiment text.
///
/// Lowercases the input and keeps runs of letters and digits; inner
/// apostrophes stay attached so contractions ("don't", "wasn't") remain
/// one token. Everything else acts as a delimiter.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    re_word: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer instance.
    ///
    /// # Errors
    ///
    /// Returns `SentioError::Regex` if the word pattern fails to compile
    /// (should never happen with the static pattern defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_word: Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*")?,
        })
    }

    /// Tokenize a text into lowercase word tokens.
    ///
    /// # Examples
    /// ```
    /// use sentio_core::featurizer::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new().unwrap();
    /// let tokens = tokenizer.tokenize("Wow... Loved this place.");
    /// assert_eq!(tokens, vec!["wow", "loved", "this", "place"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<String> {
        let lower = input.to_lowercase();
        self.re_word
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::new().unwrap();
        let tokens = tokenizer.tokenize("This place is VERY good!");
        assert_eq!(tokens, vec!["this", "place", "is", "very", "good"]);
    }

    #[test]
    fn test_tokenize_keeps_contractions() {
        let tokenizer = Tokenizer::new().unwrap();
        let tokens = tokenizer.tokenize("I don't think we'll be back.");
        assert!(tokens.contains(&"don't".to_string()));
        assert!(tokens.contains(&"we'll".to_string()));
    }

    #[test]
    fn test_tokenize_strips_stray_apostrophes() {
        let tokenizer = Tokenizer::new().unwrap();
        let tokens = tokenizer.tokenize("'quoted' food");
        assert_eq!(tokens, vec!["quoted", "food"]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = Tokenizer::new().unwrap();
        assert!(tokenizer.tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_only_punctuation() {
        let tokenizer = Tokenizer::new().unwrap();
        assert!(tokenizer.tokenize("!!! ... ?? --").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_digits_and_accents() {
        let tokenizer = Tokenizer::new().unwrap();
        let tokens = tokenizer.tokenize("5 stars, Café crème");
        assert_eq!(tokens, vec!["5", "stars", "café", "crème"]);
    }
}
