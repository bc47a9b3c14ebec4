//! Train the sentiment model once, print the evaluation report and
//! optionally save the model as JSON. With `--model` a saved model is
//! loaded and scored against the dataset instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sentio_core::report::{self, BATCH_SAMPLES};
use sentio_core::{FeaturizerConfig, TrainedModel};
use sentio_trainer::{
    load_labeled_dataset, render_report, train_session, MlPipeline, PipelineConfig,
    SentimentPipeline, TrainedSession, TrainerConfig, DEFAULT_DATA_PATH, DEFAULT_TEST_FRACTION,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train and evaluate the Sentio sentiment model")]
#[command(version)]
struct Cli {
    /// Tab-separated dataset (`text<TAB>label`, no header)
    #[arg(short, long, env = "SENTIO_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Share of examples held out for evaluation
    #[arg(short, long, env = "SENTIO_TEST_FRACTION", default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Seed for the split and the trainer (unseeded runs differ)
    #[arg(short, long, env = "SENTIO_SEED")]
    seed: Option<u64>,

    /// Maximum SDCA passes over the training set
    #[arg(long, default_value_t = 100)]
    max_epochs: usize,

    /// L2 regularization strength
    #[arg(long, default_value_t = 1e-3)]
    l2: f64,

    /// Longest word n-gram
    #[arg(long, default_value_t = 2)]
    word_ngrams: usize,

    /// Character n-gram length (0 disables)
    #[arg(long, default_value_t = 3)]
    char_ngrams: usize,

    /// Write the trained model to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip training: load this saved model and evaluate it on the whole dataset
    #[arg(short, long, conflicts_with = "output")]
    model: Option<PathBuf>,

    /// Print the evaluation metrics as JSON after the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let trainer = TrainerConfig::new()
        .with_featurizer(
            FeaturizerConfig::new()
                .with_word_ngrams(cli.word_ngrams)
                .with_char_ngrams(cli.char_ngrams),
        )
        .with_max_epochs(cli.max_epochs)
        .with_l2_regularization(cli.l2);
    let config = PipelineConfig::new()
        .with_data_path(cli.data)
        .with_test_fraction(cli.test_fraction)
        .with_trainer(trainer)
        .with_seed(cli.seed);
    let pipeline = MlPipeline::new(config);

    let session = match &cli.model {
        Some(model_path) => {
            info!(model = %model_path.display(), "Loading saved model");
            let model = TrainedModel::load(model_path)
                .with_context(|| format!("failed to load model from {}", model_path.display()))?;
            let examples = load_labeled_dataset(pipeline.data_path())
                .with_context(|| format!("failed to read {}", pipeline.data_path().display()))?;
            TrainedSession {
                model,
                test: examples,
                train_size: 0,
            }
        }
        None => {
            info!(data = %pipeline.data_path().display(), "Starting training run");
            train_session(&pipeline).with_context(|| {
                format!("training on {} failed", pipeline.data_path().display())
            })?
        }
    };

    if cli.model.is_some() {
        let evaluation = session.evaluate(&pipeline)?;
        let sample = pipeline.predict(&session.model, report::SAMPLE_TEXT)?;
        println!("{}", report::evaluation_block(&evaluation));
        println!("{}", report::single_prediction_block(&sample));
    } else {
        println!("{}", render_report(&pipeline, &session)?);
    }

    let batch = pipeline.predict_batch(&session.model, BATCH_SAMPLES)?;
    println!("{}", report::batch_prediction_block(&batch));

    if cli.json {
        let evaluation = session.evaluate(&pipeline)?;
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    }

    if let Some(path) = cli.output {
        session
            .model
            .save(&path)
            .with_context(|| format!("failed to save model to {}", path.display()))?;
        println!("Model saved to {}", path.display());
    }

    Ok(())
}
