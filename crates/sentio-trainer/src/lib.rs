//! # Sentio Trainer
//!
//! Dataset loading and splitting, logistic-regression training with SDCA,
//! and the [`SentimentPipeline`] capability that front-ends (the `train`
//! CLI and the HTTP server) drive end to end.

pub mod data;
pub mod pipeline;
pub mod trainer;

pub use data::{load_labeled_dataset, split_dataset, DEFAULT_TEST_FRACTION};
pub use pipeline::{
    render_report, train_session, MlPipeline, PipelineConfig, SentimentPipeline, TrainedSession,
    DEFAULT_DATA_PATH,
};
pub use trainer::{Trainer, TrainerConfig, TrainingStats};
