use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, training, evaluating or predicting.
#[derive(Debug, Error)]
pub enum SentioError {
    /// A dataset row could not be parsed into `text<TAB>label`.
    #[error("malformed dataset row at line {line}: {reason}")]
    DataFormat {
        /// 1-based line number in the source file.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// The dataset file does not exist.
    #[error("dataset file not found: {}", path.display())]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The training or evaluation set cannot produce a meaningful model or metric.
    #[error("training error: {0}")]
    Training(String),

    /// The caller supplied input the pipeline cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model (de)serialization failed.
    #[error("model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

impl SentioError {
    /// Returns `true` when the error was caused by the caller's input rather
    /// than by the dataset or the model.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias for Sentio operations.
pub type Result<T> = std::result::Result<T, SentioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SentioError::DataFormat {
            line: 7,
            reason: "missing label".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed dataset row at line 7: missing label"
        );

        let err = SentioError::FileNotFound {
            path: PathBuf::from("data/missing.txt"),
        };
        assert!(err.to_string().contains("data/missing.txt"));

        let err = SentioError::InvalidInput("prediction text is empty".into());
        assert!(err.to_string().contains("prediction text is empty"));
    }

    #[test]
    fn only_invalid_input_is_client_error() {
        assert!(SentioError::InvalidInput("x".into()).is_client_error());
        assert!(!SentioError::Training("x".into()).is_client_error());
        assert!(
            !SentioError::DataFormat {
                line: 1,
                reason: "x".into()
            }
            .is_client_error()
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SentioError>();
    }
}
