//! Load, train, evaluate and predict: the capability handed to front-ends.

use std::path::{Path, PathBuf};

use sentio_core::report::{self, SAMPLE_TEXT};
use sentio_core::{
    DatasetSplit, EvaluationReport, LabeledExample, PredictionResult, Result, TrainedModel,
};

use crate::data::{load_labeled_dataset, split_dataset, DEFAULT_TEST_FRACTION};
use crate::trainer::{Trainer, TrainerConfig};

/// Default dataset location, relative to the working directory at startup.
pub const DEFAULT_DATA_PATH: &str = "data/sample_reviews.txt";

/// Everything a front-end needs from the sentiment model.
///
/// Evaluation and prediction have default implementations that defer to the
/// model itself; implementors usually only decide where the data comes from
/// and how training is configured.
pub trait SentimentPipeline: Send + Sync {
    /// Load the dataset and split it into train/test partitions.
    fn load_data(&self) -> Result<DatasetSplit>;

    /// Fit a fresh model on the training partition.
    fn train(&self, train: &[LabeledExample]) -> Result<TrainedModel>;

    fn evaluate(&self, model: &TrainedModel, test: &[LabeledExample]) -> Result<EvaluationReport> {
        sentio_core::evaluate(model, test)
    }

    fn predict(&self, model: &TrainedModel, text: &str) -> Result<PredictionResult> {
        model.predict(text)
    }

    fn predict_batch(&self, model: &TrainedModel, texts: &[&str]) -> Result<Vec<PredictionResult>> {
        model.predict_batch(texts)
    }
}

/// Configuration for [`MlPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Tab-separated dataset file.
    pub data_path: PathBuf,
    /// Share of examples held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the split; the trainer keeps its own seed.
    pub seed: Option<u64>,
    pub trainer: TrainerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
            trainer: TrainerConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Seed both the split and the trainer, making whole runs reproducible.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self.trainer.seed = seed;
        self
    }

    pub fn with_trainer(mut self, trainer: TrainerConfig) -> Self {
        self.trainer = trainer;
        self
    }
}

/// File-backed pipeline: reads the dataset from disk on every load and
/// trains with [`Trainer`].
pub struct MlPipeline {
    config: PipelineConfig,
    trainer: Trainer,
}

impl MlPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let trainer = Trainer::new(config.trainer.clone());
        Self { config, trainer }
    }

    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }
}

impl SentimentPipeline for MlPipeline {
    fn load_data(&self) -> Result<DatasetSplit> {
        let examples = load_labeled_dataset(&self.config.data_path)?;
        split_dataset(examples, self.config.test_fraction, self.config.seed)
    }

    fn train(&self, train: &[LabeledExample]) -> Result<TrainedModel> {
        self.trainer.fit(train)
    }
}

/// A trained model together with the held-out partition it never saw.
#[derive(Debug, Clone)]
pub struct TrainedSession {
    pub model: TrainedModel,
    pub test: Vec<LabeledExample>,
    pub train_size: usize,
}

impl TrainedSession {
    pub fn evaluate(&self, pipeline: &dyn SentimentPipeline) -> Result<EvaluationReport> {
        pipeline.evaluate(&self.model, &self.test)
    }
}

/// Load the data and train a model on its training partition.
pub fn train_session(pipeline: &dyn SentimentPipeline) -> Result<TrainedSession> {
    let split = pipeline.load_data()?;
    let model = pipeline.train(&split.train)?;
    Ok(TrainedSession {
        model,
        train_size: split.train.len(),
        test: split.test,
    })
}

/// Training banner, evaluation metrics and the canned sample prediction.
pub fn render_report(pipeline: &dyn SentimentPipeline, session: &TrainedSession) -> Result<String> {
    let evaluation = session.evaluate(pipeline)?;
    let sample = pipeline.predict(&session.model, SAMPLE_TEXT)?;
    Ok([
        report::training_block(),
        report::evaluation_block(&evaluation),
        report::single_prediction_block(&sample),
    ]
    .join("\n"))
}
